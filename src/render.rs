mod canvas;
mod scene;

pub use canvas::CanvasPainter;
pub use scene::GpuScene;

/// Why a layer has nothing to draw into.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("2d context unavailable on #{id}: {reason}")]
    NoContext { id: String, reason: String },
    #[error("no WebGPU adapter")]
    NoAdapter,
    #[error("surface reports no texture formats")]
    NoFormat,
    #[error("WebGPU device request failed: {0}")]
    Device(String),
}
