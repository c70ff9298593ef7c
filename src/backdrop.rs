use crate::constants::*;
use crate::core::{
    CursorAuraEngine, Engine, EngineLoop, GradientFieldEngine, GradientParams, Painter,
    ParticleFieldEngine, ParticleParams, SceneBackend, ShapeParams, SurfaceSource, Viewport,
    VolumetricShapeEngine, stop_or_defer,
};
use crate::dom;
use crate::events;
use crate::frame::{self, RafScheduler, SharedLoop};
use crate::render::{CanvasPainter, GpuScene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

trait Layer {
    fn unmount(&self);
}

impl<E: Engine + 'static> Layer for SharedLoop<E> {
    fn unmount(&self) {
        // A busy loop is stopped once the running frame returns.
        stop_or_defer(self, |job| spawn_local(async move { job() }));
    }
}

/// Handle to the four mounted backdrop layers.
///
/// Dropping the handle (or calling `free()` from JS) unmounts everything.
#[wasm_bindgen]
pub struct Backdrop {
    layers: Vec<Box<dyn Layer>>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Create or adopt the layer canvases and start every engine.
    pub fn mount() -> Result<Backdrop, JsValue> {
        mount_all().map_err(|e| JsValue::from_str(&format!("{:?}", e)))
    }

    /// Stop all engines and remove their listeners. Idempotent.
    pub fn unmount(&mut self) {
        for layer in self.layers.drain(..) {
            layer.unmount();
        }
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn mount_all() -> anyhow::Result<Backdrop> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let viewport = dom::viewport().unwrap_or_default();
    log::info!(
        "[backdrop] mounting at {}x{}",
        viewport.width,
        viewport.height
    );

    let mut layers: Vec<Box<dyn Layer>> = Vec::with_capacity(4);
    layers.push(Box::new(mount_painter(
        &document,
        GRADIENT_CANVAS_ID,
        GRADIENT_Z,
        GradientFieldEngine::new(GradientParams::default(), viewport, random_seed()),
        viewport,
    )?));
    layers.push(Box::new(mount_painter(
        &document,
        PARTICLE_CANVAS_ID,
        PARTICLE_Z,
        ParticleFieldEngine::new(ParticleParams::default(), viewport, random_seed()),
        viewport,
    )?));
    layers.push(Box::new(mount_painter(
        &document,
        AURA_CANVAS_ID,
        AURA_Z,
        CursorAuraEngine::new(),
        viewport,
    )?));
    layers.push(Box::new(mount_shapes(&document, viewport)?));
    Ok(Backdrop { layers })
}

fn mount_painter<E>(
    document: &web::Document,
    id: &str,
    z_index: i32,
    engine: E,
    viewport: Viewport,
) -> anyhow::Result<SharedLoop<E>>
where
    E: Engine<Surface = dyn Painter> + 'static,
{
    let canvas = dom::ensure_layer_canvas(document, id, z_index)?;
    let acquire: SurfaceSource<dyn Painter> = Box::new(move || {
        match CanvasPainter::from_canvas(&canvas) {
            Ok(p) => Some(Box::new(p) as Box<dyn Painter>),
            Err(e) => {
                log::debug!("[{}] {}", E::NAME, e);
                None
            }
        }
    });
    let mut engine_loop = EngineLoop::new(engine, viewport, RafScheduler::default(), acquire);
    wire_window_input(&mut engine_loop)?;
    Ok(frame::start_loop(engine_loop))
}

fn mount_shapes(
    document: &web::Document,
    viewport: Viewport,
) -> anyhow::Result<SharedLoop<VolumetricShapeEngine>> {
    let canvas = dom::ensure_layer_canvas(document, SHAPES_CANVAS_ID, SHAPES_Z)?;
    dom::size_canvas(&canvas, viewport, dom::device_pixel_ratio());

    // Filled once WebGPU init resolves; frames before that are no-ops.
    let slot: Rc<RefCell<Option<GpuScene>>> = Rc::new(RefCell::new(None));
    {
        let slot = slot.clone();
        let canvas = canvas.clone();
        spawn_local(async move {
            match GpuScene::new(&canvas).await {
                Ok(scene) => *slot.borrow_mut() = Some(scene),
                Err(e) => log::error!("[shapes] WebGPU init error: {:?}", e),
            }
        });
    }
    let acquire: SurfaceSource<dyn SceneBackend> = Box::new(move || {
        slot.borrow_mut()
            .take()
            .map(|s| Box::new(s) as Box<dyn SceneBackend>)
    });

    let engine = VolumetricShapeEngine::new(ShapeParams::default(), viewport);
    let mut engine_loop = EngineLoop::new(engine, viewport, RafScheduler::default(), acquire);
    wire_window_input(&mut engine_loop)?;
    // Without a container the shapes follow the window pointer alone.
    match dom::find_element(document, SHAPES_CONTAINER_ID) {
        Some(container) => {
            let local = events::wire_local_pointer(&container, engine_loop.input())?;
            engine_loop.on_detach(move || local.detach());
        }
        None => log::info!("[shapes] no #{}, using window pointer", SHAPES_CONTAINER_ID),
    }
    Ok(frame::start_loop(engine_loop))
}

fn wire_window_input<E: Engine>(engine_loop: &mut EngineLoop<E, RafScheduler>) -> anyhow::Result<()> {
    let pointer = events::wire_pointer(engine_loop.input())?;
    engine_loop.on_detach(move || pointer.detach());
    let resize = events::wire_resize(engine_loop.input())?;
    engine_loop.on_detach(move || resize.detach());
    Ok(())
}

#[inline]
fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}
