//! Reduced-motion capability.
//!
//! The host environment supplies the preference through this trait so
//! tests can pin behavior without a real display. The service reads it
//! once at construction. Scroll writes are instant either way; see
//! `ScrollerService` for the once-read flag.

/// Injected accessibility capability: does the user prefer no animated
/// transitions?
pub trait MotionPreference: Send + Sync {
    fn prefers_reduced_motion(&self) -> bool;
}

/// Fixed preference value, for hosts without a system signal and for
/// tests
#[derive(Debug, Clone, Copy)]
pub struct FixedPreference(pub bool);

impl MotionPreference for FixedPreference {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_preference() {
        assert!(FixedPreference(true).prefers_reduced_motion());
        assert!(!FixedPreference(false).prefers_reduced_motion());
    }
}
