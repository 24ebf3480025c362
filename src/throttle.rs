//! Per-client-address throttling of the write path.

use crate::constants::WRITE_THROTTLE_WINDOW_MS;
use crate::error::AppError;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Mutex, MutexGuard};

/// Records the last accepted write per client address and rejects writes
/// arriving within the throttle window.
///
/// The table is never swept; stale entries are harmless and cost one
/// `(IpAddr, i64)` pair per distinct client address. Two concurrent
/// uploads from one address may both pass if they read the clock before
/// either records, which is an accepted imprecision (last-writer-wins on
/// the timestamp).
pub struct WriteThrottle {
    window_ms: i64,
    entries: Mutex<HashMap<IpAddr, i64>>,
}

impl Default for WriteThrottle {
    fn default() -> Self {
        Self::new(WRITE_THROTTLE_WINDOW_MS)
    }
}

impl WriteThrottle {
    /// Create a throttle with a custom window, in milliseconds.
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<IpAddr, i64>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Admit or reject a write from `addr` at time `now_ms`.
    ///
    /// Admission records `now_ms` for the address immediately, before the
    /// rest of the request is validated, so even an upload that later
    /// fails validation consumes the window (anti-abuse stance).
    ///
    /// # Errors
    /// [`AppError::RateLimited`] with the remaining wait rounded up to
    /// whole minutes when the previous write was less than a window ago.
    pub fn try_acquire(&self, addr: IpAddr, now_ms: i64) -> Result<(), AppError> {
        let mut entries = self.lock();
        if let Some(&last) = entries.get(&addr) {
            let elapsed = now_ms - last;
            if elapsed < self.window_ms {
                let remaining = self.window_ms - elapsed;
                let minutes = (remaining + 60_000 - 1) / 60_000;
                return Err(AppError::RateLimited {
                    minutes: minutes.max(0) as u64,
                });
            }
        }
        entries.insert(addr, now_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    const OTHER: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 2));

    #[test]
    fn second_write_within_window_is_rejected() {
        let throttle = WriteThrottle::default();
        throttle.try_acquire(ADDR, 0).unwrap();
        let err = throttle.try_acquire(ADDR, 1).unwrap_err();
        assert!(matches!(err, AppError::RateLimited { minutes: 5 }));
    }

    #[test]
    fn write_after_full_window_is_admitted() {
        let throttle = WriteThrottle::default();
        throttle.try_acquire(ADDR, 0).unwrap();
        throttle
            .try_acquire(ADDR, WRITE_THROTTLE_WINDOW_MS + 1)
            .unwrap();
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let throttle = WriteThrottle::default();
        throttle.try_acquire(ADDR, 0).unwrap();
        // elapsed == window is no longer "less than" the window.
        throttle.try_acquire(ADDR, WRITE_THROTTLE_WINDOW_MS).unwrap();
    }

    #[test]
    fn remaining_minutes_round_up() {
        let throttle = WriteThrottle::default();
        throttle.try_acquire(ADDR, 0).unwrap();
        // 30 seconds left on the window rounds up to one minute.
        let at = WRITE_THROTTLE_WINDOW_MS - 30_000;
        let err = throttle.try_acquire(ADDR, at).unwrap_err();
        assert!(matches!(err, AppError::RateLimited { minutes: 1 }));

        // Mid-window stays within [1, 5].
        let err = throttle
            .try_acquire(ADDR, WRITE_THROTTLE_WINDOW_MS / 2)
            .unwrap_err();
        assert!(matches!(err, AppError::RateLimited { minutes } if (1..=5).contains(&minutes)));
    }

    #[test]
    fn addresses_are_throttled_independently() {
        let throttle = WriteThrottle::default();
        throttle.try_acquire(ADDR, 0).unwrap();
        throttle.try_acquire(OTHER, 1).unwrap();
    }

    #[test]
    fn admission_overwrites_the_recorded_timestamp() {
        let throttle = WriteThrottle::default();
        throttle.try_acquire(ADDR, 0).unwrap();
        throttle.try_acquire(ADDR, WRITE_THROTTLE_WINDOW_MS).unwrap();
        // The second admission restarted the window.
        let err = throttle
            .try_acquire(ADDR, WRITE_THROTTLE_WINDOW_MS + 1)
            .unwrap_err();
        assert!(matches!(err, AppError::RateLimited { .. }));
    }

    #[test]
    fn zero_window_never_throttles() {
        let throttle = WriteThrottle::new(0);
        throttle.try_acquire(ADDR, 10).unwrap();
        throttle.try_acquire(ADDR, 10).unwrap();
    }
}
