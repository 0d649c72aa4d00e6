use crate::stopwatch::TimerSnapshot;
use crate::time_format::format_compact;

// what a platform icon rasterizer needs to draw the tray glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub text: String,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
}

pub fn glyph(snapshot: &TimerSnapshot) -> String {
    if snapshot.paused && snapshot.elapsed_ms > 0 {
        "p".to_string()
    } else if snapshot.running {
        format_compact(snapshot.elapsed_ms)
    } else {
        "—".to_string()
    }
}

pub fn tooltip(snapshot: &TimerSnapshot) -> String {
    if snapshot.paused && snapshot.elapsed_ms > 0 {
        format!("stopwatch paused: {}", format_compact(snapshot.elapsed_ms))
    } else if snapshot.running {
        format!("stopwatch: {}", format_compact(snapshot.elapsed_ms))
    } else {
        "stopwatch stopped".to_string()
    }
}

pub fn icon(snapshot: &TimerSnapshot, background: [u8; 3], foreground: [u8; 3]) -> IconSpec {
    IconSpec {
        text: glyph(snapshot),
        background,
        foreground,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(elapsed_ms: u64, running: bool, paused: bool) -> TimerSnapshot {
        TimerSnapshot {
            elapsed_ms,
            running,
            paused,
        }
    }

    #[test]
    fn paused_with_elapsed_shows_the_pause_glyph() {
        assert_eq!(glyph(&snapshot(5000, false, true)), "p");
    }

    #[test]
    fn running_shows_compact_time() {
        assert_eq!(glyph(&snapshot(0, true, false)), "0s");
        assert_eq!(glyph(&snapshot(42000, true, false)), "42s");
        assert_eq!(glyph(&snapshot(300000, true, false)), "5m");
        assert_eq!(glyph(&snapshot(5400000, true, false)), "1.5h");
    }

    #[test]
    fn stopped_shows_the_placeholder() {
        assert_eq!(glyph(&snapshot(0, false, false)), "—");
        // paused at zero has nothing worth indicating
        assert_eq!(glyph(&snapshot(0, false, true)), "—");
    }

    #[test]
    fn tooltips_mirror_the_glyph_states() {
        assert_eq!(tooltip(&snapshot(0, false, false)), "stopwatch stopped");
        assert_eq!(tooltip(&snapshot(42000, true, false)), "stopwatch: 42s");
        assert_eq!(
            tooltip(&snapshot(300000, false, true)),
            "stopwatch paused: 5m"
        );
    }

    #[test]
    fn icon_carries_the_configured_colors() {
        let icon = icon(&snapshot(42000, true, false), [16, 185, 129], [255, 255, 255]);
        assert_eq!(icon.text, "42s");
        assert_eq!(icon.background, [16, 185, 129]);
        assert_eq!(icon.foreground, [255, 255, 255]);
    }
}
