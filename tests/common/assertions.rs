//! Custom test assertions

use chainwatch::{HealthState, SystemHealth};

/// Assertions for SystemHealth
pub trait SystemHealthAssertions {
    /// Assert the named service has the given status
    fn assert_service(&self, name: &str, status: HealthState);
}

impl SystemHealthAssertions for SystemHealth {
    fn assert_service(&self, name: &str, status: HealthState) {
        let result = self
            .service(name)
            .unwrap_or_else(|| panic!("Expected service {} in snapshot", name));
        assert_eq!(
            result.status, status,
            "Expected {} to be {}, got {}",
            name, status, result.status
        );
    }
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $epsilon,
            "assertion failed: {} is not approximately {}",
            left,
            right
        );
    }};
}
