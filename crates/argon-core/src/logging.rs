//! Tracing subscriber setup.

/// Default filter: everything from Argon, quieter for the GPU stack.
pub const DEFAULT_FILTER: &str = "trace,wgpu_core=info,wgpu_hal=info,naga=info";

/// Install a global `fmt` subscriber with the default filter.
///
/// `RUST_LOG` is not consulted; use [`init_with_filter`] to override.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install a global `fmt` subscriber with an explicit `EnvFilter` directive string.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
