// Host-side tests for constants and their relationships.
// The page-layout constants are wasm-only, so we include them directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use backdrop_fx::core::constants::*;
use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_constants_are_within_reasonable_bounds() {
    // Smoothing must close part of the gap without overshooting
    assert!(POINTER_SMOOTHING > 0.0 && POINTER_SMOOTHING < 1.0);
    assert!(MAX_FRAME_DT_MS > NOMINAL_FRAME_MS);

    // Falloff-scaled forces
    assert!(BLOB_ATTRACTION > 0.0 && BLOB_ATTRACTION < 1.0);
    assert!(BLOB_INFLATE > 0.0 && BLOB_INFLATE <= 0.5);
    assert!(FIELD_PERSISTENCE_ALPHA > 0.0 && FIELD_PERSISTENCE_ALPHA < 1.0);

    // Fade windows must fit inside the shortest lifetime
    assert!(2 * PARTICLE_FADE_FRAMES <= PARTICLE_MIN_AGE);
    assert!(PARTICLE_MIN_SIZE < PARTICLE_MAX_SIZE);
    assert!(PARTICLE_HUE_MIN + PARTICLE_HUE_SPAN <= 360.0);
    assert!(PARTICLE_PEAK_OPACITY <= 1.0);

    // Full link opacity stays in range even at the pointer
    assert!(LINK_BASE_OPACITY + LINK_POINTER_BOOST <= 1.0);
    assert!(LINK_DISTANCE < PARTICLE_INFLUENCE_RADIUS);

    assert!(TRAIL_MAX_LEN > 0);
    assert!(TRAIL_MAX_AGE_MS > 0.0);
    assert!(SHAPE_ROTATION_LERP > 0.0 && SHAPE_ROTATION_LERP < 1.0);
    assert!(SHAPE_OPACITY <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layers_stack_behind_page_content() {
    assert!(GRADIENT_Z < PARTICLE_Z);
    assert!(PARTICLE_Z < AURA_Z);
    assert!(AURA_Z < SHAPES_Z);
    // In-flow page content has no z-index, so layers must sit below zero
    for z in [GRADIENT_Z, PARTICLE_Z, AURA_Z, SHAPES_Z] {
        assert!(z < 0, "layer z-index {} would paint over the page", z);
    }
    assert_eq!(LAYER_POINTER_EVENTS, "none");

    let ids = [
        GRADIENT_CANVAS_ID,
        PARTICLE_CANVAS_ID,
        AURA_CANVAS_ID,
        SHAPES_CANVAS_ID,
        SHAPES_CONTAINER_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
