//! Configuration options for joint drawing.

use serde::{Deserialize, Serialize};

/// Options controlling how correlated normals are sampled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Prefer the accelerated backend when it is compiled in.
    ///
    /// When the backend is unavailable the pivoted Cholesky sampler is used
    /// and an informational notice is emitted instead of an error.
    pub use_fast_backend: bool,

    /// Thread-count hint for the accelerated backend.
    /// `None` uses the runtime's default.
    pub cores: Option<usize>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            use_fast_backend: true,
            cores: None,
        }
    }
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that always use the pivoted Cholesky sampler.
    pub fn cholesky_only() -> Self {
        Self {
            use_fast_backend: false,
            cores: None,
        }
    }

    pub fn with_fast_backend(mut self, enable: bool) -> Self {
        self.use_fast_backend = enable;
        self
    }

    pub fn with_cores(mut self, cores: Option<usize>) -> Self {
        self.cores = cores;
        self
    }
}
