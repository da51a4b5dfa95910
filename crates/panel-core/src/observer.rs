//! Diagnostics emitted while drawing.

use std::sync::Once;

use panel_model::SamplingStrategy;
use tracing::info;

/// Receives non-fatal diagnostics from a joint draw.
pub trait DrawObserver {
    /// The accelerated backend was requested but is not compiled in.
    fn fast_backend_unavailable(&self, fallback: SamplingStrategy);
}

static FALLBACK_NOTICE: Once = Once::new();

/// Logs diagnostics through `tracing`.
///
/// The fallback notice is logged once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DrawObserver for TracingObserver {
    fn fast_backend_unavailable(&self, fallback: SamplingStrategy) {
        FALLBACK_NOTICE.call_once(|| {
            info!(
                fallback = %fallback,
                "accelerated sampler unavailable; build with the `parallel` feature for faster draws"
            );
        });
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl DrawObserver for SilentObserver {
    fn fast_backend_unavailable(&self, _fallback: SamplingStrategy) {}
}
