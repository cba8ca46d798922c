use std::time::Duration;

use iced::time::Instant;

/// Length of one sweep from 0 to 1 (or back).
pub const HALF_CYCLE: Duration = Duration::from_millis(750);

/// Repeating, auto-reversing linear animation over `[0, 1]`.
///
/// The clock starts on the first tick, so the fraction is `0` until then.
#[derive(Debug, Clone, Default)]
pub struct PingPong {
    started: Option<Instant>,
}

impl PingPong {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, now: Instant) -> f32 {
        let started = *self.started.get_or_insert(now);
        fraction_after(now.saturating_duration_since(started))
    }
}

/// Fraction reached after `elapsed` time: rises for one half cycle, falls
/// for the next, and repeats.
pub fn fraction_after(elapsed: Duration) -> f32 {
    let half = HALF_CYCLE.as_millis();
    let phase = elapsed.as_millis() % (2 * half);
    let fraction = if phase <= half {
        phase as f32 / half as f32
    } else {
        (2 * half - phase) as f32 / half as f32
    };
    fraction.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_rises_then_reverses() {
        assert_eq!(fraction_after(ms(0)), 0.0);
        assert_eq!(fraction_after(ms(375)), 0.5);
        assert_eq!(fraction_after(ms(750)), 1.0);
        assert_eq!(fraction_after(ms(1125)), 0.5);
        assert_eq!(fraction_after(ms(1500)), 0.0);
        assert_eq!(fraction_after(ms(1875)), 0.5);
    }

    #[test]
    fn test_stays_in_unit_range() {
        for step in 0..10_000 {
            let fraction = fraction_after(ms(step * 7));
            assert!((0.0..=1.0).contains(&fraction), "{} at {}", fraction, step);
        }
    }

    #[test]
    fn test_monotonic_within_each_half_cycle() {
        let rising: Vec<_> = (0..=750).map(|t| fraction_after(ms(t))).collect();
        assert!(rising.windows(2).all(|w| w[0] <= w[1]));

        let falling: Vec<_> = (750..=1500).map(|t| fraction_after(ms(t))).collect();
        assert!(falling.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_clock_starts_on_first_tick() {
        let start = Instant::now();
        let mut animation = PingPong::new();

        assert_eq!(animation.advance(start + ms(5_000)), 0.0);
        assert_eq!(animation.advance(start + ms(5_375)), 0.5);
    }
}
