//! Wall-clock source for timestamp tolerance checks.

use chrono::Utc;

/// Current time in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        epoch_seconds(Utc::now().timestamp())
    }
}

/// Pre-epoch readings clamp to zero, which makes every delivery look too new.
fn epoch_seconds(now: i64) -> u64 {
    u64::try_from(now).unwrap_or_else(|_| {
        tracing::warn!(now, "system clock is before the Unix epoch; using 0");
        0
    })
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }

    #[test]
    fn pre_epoch_reading_clamps_to_zero() {
        assert_eq!(epoch_seconds(-1), 0);
        assert_eq!(epoch_seconds(i64::MIN), 0);
        assert_eq!(epoch_seconds(0), 0);
        assert_eq!(epoch_seconds(1_614_265_330), 1_614_265_330);
    }

    #[test]
    fn fixed_clock_does_not_move() {
        let clock = FixedClock(1_614_265_330);
        assert_eq!(clock.now(), 1_614_265_330);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn arc_clock_delegates() {
        let clock: std::sync::Arc<dyn Clock> = std::sync::Arc::new(FixedClock(5));
        assert_eq!(clock.now(), 5);
    }
}
