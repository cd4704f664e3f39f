//! Synthesized key releases for terminals without release events.
//!
//! Most terminals only report presses (plus auto-repeat). A key is treated as
//! released once it has not been re-reported for the timeout. As soon as the
//! terminal delivers a real release event, synthesis switches off for good.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::queue::KeyTransition;
use crate::types::KeyKind;

pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

const KEYS: usize = KeyKind::ALL.len();

#[derive(Debug, Clone)]
pub struct ReleaseTimeout {
    timeout: Duration,
    /// Last press or repeat seen per key; `None` when released.
    last_seen: [Option<Instant>; KEYS],
    releases_reported: bool,
}

impl ReleaseTimeout {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_seen: [None; KEYS],
            releases_reported: false,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the terminal has shown it reports releases itself.
    pub fn releases_reported(&self) -> bool {
        self.releases_reported
    }

    /// Record a transition read from the terminal.
    pub fn observe(&mut self, transition: KeyTransition, now: Instant) {
        let slot = &mut self.last_seen[transition.key.index()];
        if transition.pressed {
            *slot = Some(now);
        } else {
            *slot = None;
            self.releases_reported = true;
        }
    }

    /// Key-ups for every key not re-reported within the timeout.
    ///
    /// Expired keys are forgotten, so each is released once.
    pub fn expire(&mut self, now: Instant) -> ArrayVec<KeyTransition, KEYS> {
        let mut out = ArrayVec::new();
        if self.releases_reported {
            return out;
        }
        for key in KeyKind::ALL {
            let slot = &mut self.last_seen[key.index()];
            if let Some(seen) = *slot {
                if now.saturating_duration_since(seen) > self.timeout {
                    *slot = None;
                    out.push(KeyTransition::up(key));
                }
            }
        }
        out
    }

    pub fn reset(&mut self) {
        self.last_seen = [None; KEYS];
    }
}

impl Default for ReleaseTimeout {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_release_triggers_after_timeout() {
        let mut rt = ReleaseTimeout::new(Duration::from_millis(50));
        let t0 = Instant::now();
        rt.observe(KeyTransition::down(KeyKind::MoveLeft), t0);

        assert!(rt.expire(t0 + Duration::from_millis(50)).is_empty());
        let released = rt.expire(t0 + Duration::from_millis(51));
        assert_eq!(released.as_slice(), &[KeyTransition::up(KeyKind::MoveLeft)]);

        // Released once only.
        assert!(rt.expire(t0 + Duration::from_millis(500)).is_empty());
    }

    #[test]
    fn test_repeat_extends_the_hold() {
        let mut rt = ReleaseTimeout::new(Duration::from_millis(50));
        let t0 = Instant::now();
        rt.observe(KeyTransition::down(KeyKind::SoftDrop), t0);
        rt.observe(
            KeyTransition::down(KeyKind::SoftDrop),
            t0 + Duration::from_millis(40),
        );
        assert!(rt.expire(t0 + Duration::from_millis(80)).is_empty());
        assert_eq!(rt.expire(t0 + Duration::from_millis(91)).len(), 1);
    }

    #[test]
    fn test_other_key_does_not_extend_timeout() {
        let mut rt = ReleaseTimeout::new(Duration::from_millis(50));
        let t0 = Instant::now();
        rt.observe(KeyTransition::down(KeyKind::MoveLeft), t0);
        rt.observe(
            KeyTransition::down(KeyKind::RotateCw),
            t0 + Duration::from_millis(45),
        );
        let released = rt.expire(t0 + Duration::from_millis(60));
        assert_eq!(released.as_slice(), &[KeyTransition::up(KeyKind::MoveLeft)]);
    }

    #[test]
    fn test_real_release_disables_synthesis() {
        let mut rt = ReleaseTimeout::new(Duration::from_millis(50));
        let t0 = Instant::now();
        rt.observe(KeyTransition::down(KeyKind::MoveRight), t0);
        rt.observe(KeyTransition::up(KeyKind::MoveRight), t0);
        rt.observe(KeyTransition::down(KeyKind::MoveLeft), t0);
        assert!(rt.releases_reported());
        assert!(rt.expire(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_default_timeout_is_non_zero() {
        assert!(ReleaseTimeout::default().timeout() > Duration::ZERO);
    }
}
