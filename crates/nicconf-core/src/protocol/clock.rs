//! Time source for protocol delays
//!
//! Every pause the driver takes goes through a [`Clock`], so sessions can be
//! exercised without waiting out real settle and reboot delays.

use std::time::Duration;

/// Something that can block the current thread for a duration
pub trait Clock {
    /// Block for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by [`std::thread::sleep`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_system_clock_sleeps() {
        let start = Instant::now();
        SystemClock.sleep(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
