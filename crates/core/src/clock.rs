//! Wall-clock capability.
//!
//! Anything that stamps audit timestamps takes a `Clock` instead of calling
//! `Utc::now()` directly, so tests can pin time.

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use fixed::FixedClock;

#[cfg(any(test, feature = "test-util"))]
mod fixed {
    use std::sync::RwLock;

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    /// Manually driven clock for tests.
    #[derive(Debug)]
    pub struct FixedClock {
        now: RwLock<DateTime<Utc>>,
    }

    impl FixedClock {
        pub fn new(at: DateTime<Utc>) -> Self {
            Self { now: RwLock::new(at) }
        }

        pub fn set(&self, at: DateTime<Utc>) {
            if let Ok(mut now) = self.now.write() {
                *now = at;
            }
        }

        pub fn advance(&self, by: Duration) {
            if let Ok(mut now) = self.now.write() {
                *now += by;
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            match self.now.read() {
                Ok(now) => *now,
                Err(poisoned) => *poisoned.into_inner(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn fixed_clock_only_moves_when_told() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::seconds(30));
        assert_eq!(clock.now(), start + Duration::seconds(30));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
