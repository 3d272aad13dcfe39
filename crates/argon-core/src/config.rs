use crate::logging::DEFAULT_FILTER;

/// Configuration for an Argon application.
#[derive(Debug, Clone)]
pub struct Config {
    pub benchmark: BenchmarkMode,
    /// `EnvFilter` directives passed to [`crate::logging::init_with_filter`].
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            benchmark: BenchmarkMode::Off,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Apply the logging and profiling parts of this configuration.
    pub fn apply(&self) {
        crate::logging::init_with_filter(&self.log_filter);
        match self.benchmark {
            BenchmarkMode::Off => {}
            BenchmarkMode::On => puffin::set_scopes_on(true),
            #[cfg(feature = "profiling")]
            BenchmarkMode::WithWebserver => {
                crate::profiling::init_profiling(crate::profiling::ProfilingBackend::PuffinHttp)
            }
            #[cfg(not(feature = "profiling"))]
            BenchmarkMode::WithWebserver => {
                tracing::warn!(
                    "puffin HTTP server requested but the `profiling` feature is disabled"
                );
                puffin::set_scopes_on(true);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkMode {
    /// Profiling scopes are disabled
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to external tools such as 'puffin_viewer'
    WithWebserver,
}
