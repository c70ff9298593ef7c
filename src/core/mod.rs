pub mod aura;
pub mod camera;
pub mod color;
pub mod constants;
pub mod engine;
pub mod geometry;
pub mod gradient;
pub mod paint;
pub mod particles;
pub mod pointer;
pub mod shapes;

pub use aura::CursorAuraEngine;
pub use camera::Camera;
pub use color::{Color, ColorPair, ColorStop};
pub use engine::{
    Engine, EngineLoop, FrameHandle, FrameInput, FrameScheduler, InputLatch, LoopState, PendingInput,
    stop_or_defer, SurfaceSource,
};
pub use geometry::ShapeKind;
pub use gradient::{GradientFieldEngine, GradientParams};
pub use paint::{DrawSurface, Painter, Viewport};
pub use particles::{ParticleFieldEngine, ParticleParams};
pub use pointer::{PointerSample, PointerTracker, SmoothedPointerState};
pub use shapes::{SceneBackend, ShapeParams, VolumetricShapeEngine};

// Shaders bundled as string constants
pub static WIREFRAME_WGSL: &str = include_str!("../../shaders/wireframe.wgsl");
