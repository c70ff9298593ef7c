// Tuning constants for the backdrop engines.
//
// Distances are in viewport pixels, ages in frames unless suffixed `_MS`,
// hues in degrees.

// Pointer smoothing
pub const POINTER_SMOOTHING: f32 = 0.12; // fraction of the remaining gap closed per frame
pub const NOMINAL_FRAME_MS: f64 = 16.67; // 60 Hz reference interval for velocity scaling
pub const MAX_FRAME_DT_MS: f64 = 100.0; // longer gaps (backgrounded tab) count as this

// Gradient field
pub const BLOB_COUNT: usize = 4;
pub const BLOB_INFLUENCE_RADIUS: f32 = 500.0;
pub const BLOB_ATTRACTION: f32 = 0.3; // share of the pointer offset applied at full force
pub const BLOB_INFLATE: f32 = 0.5; // radius grows up to 1 + this
pub const BLOB_DRIFT_SPEED: f32 = 0.8; // px/frame along the drift heading
pub const BLOB_MAX_VELOCITY: f32 = 0.4; // linear velocity range is ±this
pub const BLOB_MAX_ANGULAR_VELOCITY: f32 = 0.015; // rad/frame, ±this
pub const BLOB_BLUR_PX: f32 = 80.0;
pub const FIELD_PERSISTENCE_ALPHA: f32 = 0.08; // overlay alpha instead of a full clear
pub const FIELD_GLOW_RADIUS: f32 = 200.0;
pub const FIELD_GLOW_BLUR_PX: f32 = 50.0;
pub const FIELD_TIME_STEP: f32 = 0.01; // per frame
pub const FIELD_GLOW_HUE_RATE: f32 = 30.0; // degrees per unit of field time

// Particle field
pub const PARTICLE_COUNT: usize = 60;
pub const PARTICLE_HISTORY: usize = 20;
pub const PARTICLE_INFLUENCE_RADIUS: f32 = 400.0;
pub const PARTICLE_REPEL: f32 = 8.0;
pub const PARTICLE_SWIRL: f32 = 5.0;
pub const PARTICLE_FADE_FRAMES: u32 = 60;
pub const PARTICLE_PEAK_OPACITY: f32 = 0.8;
pub const PARTICLE_MIN_SIZE: f32 = 1.5;
pub const PARTICLE_MAX_SIZE: f32 = 8.0;
pub const PARTICLE_SIZE_DECAY: f32 = 0.08;
pub const PARTICLE_HUE_MIN: f32 = 220.0; // blue
pub const PARTICLE_HUE_SPAN: f32 = 60.0; // .. purple
pub const PARTICLE_MIN_AGE: u32 = 300;
pub const PARTICLE_AGE_SPAN: u32 = 500;
pub const PARTICLE_POINTER_HUE_RATE: f32 = 0.5; // degrees per px of pointer travel
pub const LINK_DISTANCE: f32 = 150.0;
pub const LINK_BASE_OPACITY: f32 = 0.4;
pub const LINK_POINTER_RADIUS: f32 = 350.0;
pub const LINK_POINTER_BOOST: f32 = 0.6;

// Cursor aura
pub const TRAIL_MAX_LEN: usize = 8;
pub const TRAIL_MAX_AGE_MS: f64 = 800.0;
pub const TRAIL_SPEED_THRESHOLD: f32 = 0.5; // px per nominal frame
pub const TRAIL_HUE_STEP: f32 = 8.0;
pub const TRAIL_RADIUS: f32 = 60.0;
pub const AURA_HUE_PER_SPEED: f32 = 1.5;

// Volumetric shapes
pub const SHAPE_ROTATION_LERP: f32 = 0.05;
pub const SHAPE_ROTATION_GAIN: f32 = 2.0; // normalized pointer -> radians
pub const SHAPE_SPIN_RATE: f32 = 0.3; // rad/s around z
pub const SHAPE_SCALE_POINTER: f32 = 0.3;
pub const SHAPE_SCALE_PULSE: f32 = 0.1;
pub const SHAPE_OPACITY: f32 = 0.75;
pub const SHAPE_EMISSIVE: f32 = 1.2;

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOV_DEG: f32 = 60.0;
