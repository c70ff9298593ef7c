/// Page-level layout of the backdrop layers.
///
/// Each engine draws into its own fixed, full-viewport canvas. Ids match the
/// markup the composition layer may already provide; missing canvases are
/// created on mount.
pub const GRADIENT_CANVAS_ID: &str = "gradient-mesh";
pub const PARTICLE_CANVAS_ID: &str = "particle-field";
pub const AURA_CANVAS_ID: &str = "cursor-aura";
pub const SHAPES_CANVAS_ID: &str = "volumetric-shapes";

// Stacking order, back to front. Negative so in-flow page content paints on top.
pub const GRADIENT_Z: i32 = -4;
pub const PARTICLE_Z: i32 = -3;
pub const AURA_Z: i32 = -2;
pub const SHAPES_Z: i32 = -1;

// Layers never take pointer input; listeners live on window or a page element.
pub const LAYER_POINTER_EVENTS: &str = "none";

// Optional page element whose own pointer moves steer the shapes.
pub const SHAPES_CONTAINER_ID: &str = "volumetric-shapes-container";
