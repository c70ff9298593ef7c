//! Engine loop and lifecycle shared by all backdrop layers.
//!
//! Event listeners only write into an [`InputLatch`]. The frame callback is the
//! sole reader of the latch and the only place simulation state changes, so
//! there is exactly one writer and one reader per engine.

use crate::core::paint::{DrawSurface, Viewport};
use crate::core::pointer::{PointerSample, PointerTracker, SmoothedPointerState};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything an engine may read during one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub now_ms: f64,
    /// Frames completed before this one.
    pub frame: u64,
    /// Seconds since the first frame.
    pub elapsed_sec: f32,
    pub pointer: SmoothedPointerState,
    /// Latest raw pointer position.
    pub target: Vec2,
    /// Whether any pointer event has arrived yet.
    pub pointer_seen: bool,
    /// Raw pointer path length since the previous frame.
    pub travel: f32,
    /// Latest container-local pointer in `[-1, 1]`; zero until it first fires.
    pub local_pointer: Vec2,
    pub viewport: Viewport,
}

pub trait Engine {
    type Surface: DrawSurface + ?Sized;
    const NAME: &'static str;

    /// Viewport changed. Simulation state is kept.
    fn resize(&mut self, viewport: Viewport);
    fn update(&mut self, frame: &FrameInput);
    /// Called once when the surface first becomes available.
    fn attach(&mut self, _surface: &mut Self::Surface) {}
    fn draw(&mut self, surface: &mut Self::Surface);
}

/// Latest-sample handoff between event listeners and the frame callback.
#[derive(Debug, Default)]
pub struct InputLatch {
    pointer: Option<PointerSample>,
    last_raw: Vec2,
    travel: f32,
    local: Option<Vec2>,
    viewport: Option<Viewport>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PendingInput {
    pub pointer: Option<PointerSample>,
    pub travel: f32,
    pub local: Option<Vec2>,
    pub viewport: Option<Viewport>,
}

impl InputLatch {
    pub fn pointer_moved(&mut self, sample: PointerSample) {
        let p = sample.position();
        self.travel += p.distance(self.last_raw);
        self.last_raw = p;
        self.pointer = Some(sample);
    }

    pub fn local_pointer_moved(&mut self, normalized: Vec2) {
        self.local = Some(normalized);
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn take(&mut self) -> PendingInput {
        PendingInput {
            pointer: self.pointer.take(),
            travel: std::mem::take(&mut self.travel),
            local: self.local.take(),
            viewport: self.viewport.take(),
        }
    }
}

pub type FrameHandle = i32;

/// The host's per-frame callback primitive (`requestAnimationFrame` on the web).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub type SurfaceSource<S> = Box<dyn FnMut() -> Option<Box<S>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Mounted,
    Running,
    Unmounted,
}

pub struct EngineLoop<E: Engine, F: FrameScheduler> {
    engine: E,
    tracker: PointerTracker,
    input: Rc<RefCell<InputLatch>>,
    surface: Option<Box<E::Surface>>,
    acquire: SurfaceSource<E::Surface>,
    scheduler: F,
    pending: Option<FrameHandle>,
    state: LoopState,
    viewport: Viewport,
    local_pointer: Vec2,
    pointer_seen: bool,
    started_ms: Option<f64>,
    frames: u64,
    detach: Vec<Box<dyn FnOnce()>>,
}

impl<E: Engine, F: FrameScheduler> EngineLoop<E, F> {
    pub fn new(engine: E, viewport: Viewport, scheduler: F, acquire: SurfaceSource<E::Surface>) -> Self {
        Self {
            engine,
            tracker: PointerTracker::new(),
            input: Rc::new(RefCell::new(InputLatch::default())),
            surface: None,
            acquire,
            scheduler,
            pending: None,
            state: LoopState::Mounted,
            viewport,
            local_pointer: Vec2::ZERO,
            pointer_seen: false,
            started_ms: None,
            frames: 0,
            detach: Vec::new(),
        }
    }

    /// Handle for listeners to write into.
    pub fn input(&self) -> Rc<RefCell<InputLatch>> {
        self.input.clone()
    }

    /// Register a hook run by [`stop`](Self::stop), typically a listener removal.
    pub fn on_detach(&mut self, hook: impl FnOnce() + 'static) {
        self.detach.push(Box::new(hook));
    }

    pub fn start(&mut self) {
        if self.state != LoopState::Mounted {
            return;
        }
        self.state = LoopState::Running;
        self.pending = self.scheduler.request_frame();
        log::info!("[{}] running", E::NAME);
    }

    /// Run one frame. Returns whether the engine updated and drew.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.pending = None;

        if self.surface.is_none() {
            match (self.acquire)() {
                Some(mut surface) => {
                    surface.resize(self.viewport);
                    self.engine.attach(&mut *surface);
                    self.surface = Some(surface);
                    log::info!("[{}] surface attached", E::NAME);
                }
                None => {
                    log::debug!("[{}] surface unavailable, skipping frame", E::NAME);
                    self.pending = self.scheduler.request_frame();
                    return false;
                }
            }
        }

        let pending = self.input.borrow_mut().take();
        if let Some(vp) = pending.viewport {
            self.viewport = vp;
            self.engine.resize(vp);
            if let Some(surface) = self.surface.as_mut() {
                surface.resize(vp);
            }
        }
        if let Some(sample) = pending.pointer {
            self.tracker.set_target(sample);
            self.pointer_seen = true;
        }
        if let Some(local) = pending.local {
            self.local_pointer = local;
        }

        let started = *self.started_ms.get_or_insert(now_ms);
        let pointer = self.tracker.tick(now_ms);
        let frame = FrameInput {
            now_ms,
            frame: self.frames,
            elapsed_sec: ((now_ms - started).max(0.0) / 1000.0) as f32,
            pointer,
            target: self.tracker.target(),
            pointer_seen: self.pointer_seen,
            travel: pending.travel,
            local_pointer: self.local_pointer,
            viewport: self.viewport,
        };
        self.engine.update(&frame);
        if let Some(surface) = self.surface.as_mut() {
            self.engine.draw(&mut **surface);
        }
        self.frames += 1;

        self.pending = self.scheduler.request_frame();
        true
    }

    /// Detach listeners and cancel the pending frame. Nothing runs afterwards.
    pub fn stop(&mut self) {
        if self.state == LoopState::Unmounted {
            return;
        }
        for hook in self.detach.drain(..) {
            hook();
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Unmounted;
        log::info!("[{}] unmounted after {} frames", E::NAME, self.frames);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }
}

/// Stop a shared loop, or hand `defer` a job that stops it later if a frame
/// holds the borrow. The job owns the loop, so its listeners stay alive until
/// they are detached.
pub fn stop_or_defer<E, F>(
    shared: &Rc<RefCell<EngineLoop<E, F>>>,
    defer: impl FnOnce(Box<dyn FnOnce()>),
) where
    E: Engine + 'static,
    F: FrameScheduler + 'static,
{
    if let Ok(mut l) = shared.try_borrow_mut() {
        l.stop();
        return;
    }
    log::debug!("[{}] unmount during a frame, deferring", E::NAME);
    let shared = shared.clone();
    defer(Box::new(move || match shared.try_borrow_mut() {
        Ok(mut l) => l.stop(),
        Err(_) => log::warn!("[{}] still busy, unmount dropped", E::NAME),
    }));
}
