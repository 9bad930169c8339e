//! Profiling hooks based on the `puffin` crate.
//!
//! Tessellation and dispatch entry points open a `profile_scope!`. With the
//! `profiling` feature disabled the macros expand to nothing.

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __glseries_profile_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__glseries_profile_noop as profile_scope;
#[cfg(not(feature = "profiling"))]
pub use crate::__glseries_profile_noop as profile_function;

/// Where profiling data is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Collect scopes in-process only.
    InProcess,
    /// Serve scopes to `puffin_viewer` over HTTP.
    PuffinHttp,
}

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Address the HTTP backend binds to.
pub const PUFFIN_HTTP_ADDR: &str = "127.0.0.1:8585";

/// Turn on scope collection for the given backend.
///
/// # Example
/// ```no_run
/// use glseries_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    if backend == ProfilingBackend::PuffinHttp && PROFILING_SERVER.get().is_none() {
        match puffin_http::Server::new(PUFFIN_HTTP_ADDR) {
            Ok(server) => {
                tracing::info!("puffin server listening on http://{}", PUFFIN_HTTP_ADDR);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => tracing::error!("failed to start puffin server: {}", e),
        }
    }
}

#[cfg(not(feature = "profiling"))]
pub fn init_profiling(backend: ProfilingBackend) {
    tracing::warn!(?backend, "profiling requested but the `profiling` feature is disabled");
}

/// Close the current profiler frame. Call once per rendered frame.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(all(test, feature = "profiling"))]
mod tests {
    use super::*;

    #[test]
    fn test_in_process_backend_collects_scopes() {
        init_profiling(ProfilingBackend::InProcess);
        assert!(puffin::are_scopes_on());
        assert!(PROFILING_SERVER.get().is_none());

        {
            profile_scope!("test_scope");
        }
        new_frame();
    }
}
