const MSEC_HOUR: u64 = 3600000;
const MSEC_MINUTE: u64 = 60000;
const MSEC_SECOND: u64 = 1000;

pub struct TimeFormat {
    pub hours: usize,
    pub minutes: usize,
    pub seconds: usize,
    pub centis: usize,
    pub allow_shorten: bool,
}

impl TimeFormat {
    pub fn format_elapsed(&self, elapsed_ms: u64) -> String {
        let mut time = elapsed_ms;
        let hours = time / MSEC_HOUR;
        time -= hours * MSEC_HOUR;
        let minutes = time / MSEC_MINUTE;
        time -= minutes * MSEC_MINUTE;
        let seconds = time / MSEC_SECOND;
        time -= seconds * MSEC_SECOND;
        // hundredths truncate, they never round up
        let centis = time / 10;

        if self.allow_shorten && hours == 0 {
            return format!(
                "{}:{}.{}",
                pad_zeroes(minutes, self.minutes),
                pad_zeroes(seconds, self.seconds),
                pad_zeroes(centis, self.centis),
            );
        }
        format!(
            "{}:{}:{}.{}",
            pad_zeroes(hours, self.hours),
            pad_zeroes(minutes, self.minutes),
            pad_zeroes(seconds, self.seconds),
            pad_zeroes(centis, self.centis),
        )
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            hours: 2,
            minutes: 2,
            seconds: 2,
            centis: 2,
            allow_shorten: true,
        }
    }
}

pub fn format_compact(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / MSEC_SECOND;
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    format!("{:.1}h", seconds as f64 / 3600.0)
}

fn pad_zeroes(time: u64, length: usize) -> String {
    let str_length = time.to_string().chars().count();
    if str_length >= length {
        return format!("{}", time);
    }
    let count = length - str_length;
    let zeroes = "0".repeat(count);
    format!("{}{}", zeroes, time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(TimeFormat::default().format_elapsed(0), "00:00.00");
    }

    #[test]
    fn formats_minutes_and_hundredths() {
        assert_eq!(TimeFormat::default().format_elapsed(65340), "01:05.34");
    }

    #[test]
    fn grows_to_hours_past_one_hour() {
        assert_eq!(TimeFormat::default().format_elapsed(3661000), "01:01:01.00");
    }

    #[test]
    fn hundredths_truncate_down() {
        assert_eq!(TimeFormat::default().format_elapsed(999), "00:00.99");
        assert_eq!(TimeFormat::default().format_elapsed(65349), "01:05.34");
    }

    #[test]
    fn full_width_keeps_hours_at_zero() {
        let format = TimeFormat {
            allow_shorten: false,
            ..TimeFormat::default()
        };
        assert_eq!(format.format_elapsed(65340), "00:01:05.34");
    }

    #[test]
    fn compact_seconds_under_a_minute() {
        assert_eq!(format_compact(0), "0s");
        assert_eq!(format_compact(42000), "42s");
        assert_eq!(format_compact(59999), "59s");
    }

    #[test]
    fn compact_minutes_under_an_hour() {
        assert_eq!(format_compact(60000), "1m");
        assert_eq!(format_compact(150000), "2m");
        assert_eq!(format_compact(3599000), "59m");
    }

    #[test]
    fn compact_hours_with_one_decimal() {
        assert_eq!(format_compact(3600000), "1.0h");
        assert_eq!(format_compact(5400000), "1.5h");
        assert_eq!(format_compact(36000000), "10.0h");
    }
}
