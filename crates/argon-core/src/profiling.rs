//! Profiling utilities based on the `puffin` crate.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

/// Address the puffin HTTP server binds to.
pub const PUFFIN_SERVER_ADDR: &str = "0.0.0.0:8585";

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    #[cfg(feature = "profiling")]
    PuffinHttp,
    /// Record scopes in-process only.
    InProcess,
}

/// Global profiling server instance.
#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use argon_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::InProcess);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        #[cfg(feature = "profiling")]
        ProfilingBackend::PuffinHttp => match puffin_http::Server::new(PUFFIN_SERVER_ADDR) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{PUFFIN_SERVER_ADDR}");
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        },
        ProfilingBackend::InProcess => {}
    }
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame, before the render pipeline executes.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
