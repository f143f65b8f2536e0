//! Shared helpers for integration tests.

/// Routes `tracing` output through the test harness so `RUST_LOG=trace`
/// shows maker activity for a failing test.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::TRACE)
		.with_test_writer()
		.try_init();
}
