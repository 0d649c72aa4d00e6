use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSnapshot {
    pub elapsed_ms: u64,
    pub running: bool,
    pub paused: bool,
}

pub struct Stopwatch {
    phase: Phase,
    elapsed: Duration,
    epoch: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            phase: Phase::Stopped,
            elapsed: Duration::ZERO,
            epoch: None,
        }
    }

    pub fn start(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Stopped => {
                self.elapsed = Duration::ZERO;
                self.epoch = Some(now);
                self.phase = Phase::Running;
                true
            }
            Phase::Paused => {
                // resume: move the epoch back so the pause gap is excluded
                self.epoch = Some(now - self.elapsed);
                self.phase = Phase::Running;
                true
            }
            Phase::Running => false,
        }
    }

    pub fn pause(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Running => {
                self.elapsed = self.elapsed(now);
                self.epoch = None;
                self.phase = Phase::Paused;
                true
            }
            _ => false,
        }
    }

    pub fn stop(&mut self) -> bool {
        match self.phase {
            Phase::Stopped => false,
            _ => {
                self.elapsed = Duration::ZERO;
                self.epoch = None;
                self.phase = Phase::Stopped;
                true
            }
        }
    }

    // elapsed always derives from the epoch, never from counting ticks,
    // so late or missed ticks cannot drift the value
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.epoch {
            Some(epoch) => now - epoch,
            None => self.elapsed,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn snapshot(&self, now: Instant) -> TimerSnapshot {
        TimerSnapshot {
            elapsed_ms: self.elapsed(now).as_millis() as u64,
            running: self.phase == Phase::Running,
            paused: self.phase == Phase::Paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(amount: u64) -> Duration {
        Duration::from_millis(amount)
    }

    #[test]
    fn starts_stopped_at_zero() {
        let stopwatch = Stopwatch::new();
        let snapshot = stopwatch.snapshot(Instant::now());
        assert_eq!(snapshot, TimerSnapshot::default());
    }

    #[test]
    fn running_elapsed_follows_the_clock() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        assert!(stopwatch.start(base));
        assert_eq!(stopwatch.elapsed(base + ms(500)), ms(500));
        assert_eq!(stopwatch.elapsed(base + ms(1500)), ms(1500));
    }

    #[test]
    fn start_while_running_does_not_reset() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start(base);
        assert!(!stopwatch.start(base + ms(300)));
        assert_eq!(stopwatch.elapsed(base + ms(300)), ms(300));
    }

    #[test]
    fn pause_freezes_elapsed() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start(base);
        assert!(stopwatch.pause(base + ms(500)));
        assert_eq!(stopwatch.elapsed(base + ms(500)), ms(500));
        assert_eq!(stopwatch.elapsed(base + ms(9500)), ms(500));
    }

    #[test]
    fn pause_when_not_running_is_a_noop() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        assert!(!stopwatch.pause(base));
        assert_eq!(stopwatch.snapshot(base), TimerSnapshot::default());
        stopwatch.start(base);
        stopwatch.pause(base + ms(100));
        assert!(!stopwatch.pause(base + ms(200)));
        assert_eq!(stopwatch.elapsed(base + ms(200)), ms(100));
    }

    #[test]
    fn resume_continues_from_the_paused_value() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start(base);
        stopwatch.pause(base + ms(500));
        // several seconds of pause must not leak into the elapsed time
        assert!(stopwatch.start(base + ms(5500)));
        assert_eq!(stopwatch.elapsed(base + ms(5500)), ms(500));
        assert_eq!(stopwatch.elapsed(base + ms(6000)), ms(1000));
    }

    #[test]
    fn stop_resets_from_any_state() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        assert!(!stopwatch.stop());

        stopwatch.start(base);
        assert!(stopwatch.stop());
        assert_eq!(stopwatch.snapshot(base + ms(100)), TimerSnapshot::default());

        stopwatch.start(base + ms(200));
        stopwatch.pause(base + ms(700));
        assert!(stopwatch.stop());
        assert_eq!(stopwatch.snapshot(base + ms(800)), TimerSnapshot::default());
    }

    #[test]
    fn running_and_paused_are_never_both_set() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        let mut now = base;
        for _ in 0..3 {
            for command in 0..3 {
                now += ms(50);
                match command {
                    0 => {
                        stopwatch.start(now);
                    }
                    1 => {
                        stopwatch.pause(now);
                    }
                    _ => {
                        stopwatch.stop();
                    }
                }
                let snapshot = stopwatch.snapshot(now);
                assert!(!(snapshot.running && snapshot.paused));
            }
        }
    }

    #[test]
    fn elapsed_is_monotonic_while_running() {
        let base = Instant::now();
        let mut stopwatch = Stopwatch::new();
        stopwatch.start(base);
        let mut previous = Duration::ZERO;
        for step in 1u64..10 {
            let elapsed = stopwatch.elapsed(base + ms(step * 100));
            assert!(elapsed >= previous);
            previous = elapsed;
        }
    }
}
