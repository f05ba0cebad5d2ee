//! Test helpers: logging setup and assertion macros.
//!
//! Available to the crate's own unit tests and, behind the `test-internals`
//! feature, to integration tests. Not part of the stable API.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a tracing subscriber for test output.
///
/// Idempotent; safe to call at the top of every test. Honors `RUST_LOG`,
/// defaulting to `info`.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Mark the start of a test phase in the log.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(target: "aseq::test", "=== phase: {} ===", $name);
    };
}

/// Mark a test as complete in the log.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(target: "aseq::test", "=== complete: {} ===", $name);
    };
}

/// Assert a condition, logging expected and actual values on failure.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $label:expr, $expected:expr, $actual:expr) => {
        if !$cond {
            tracing::error!(
                target: "aseq::test",
                "{}: expected {:?}, actual {:?}",
                $label,
                $expected,
                $actual
            );
        }
        assert!(
            $cond,
            "{}: expected {:?}, actual {:?}",
            $label, $expected, $actual
        );
    };
}
