use crate::scheduler::{FrameRequest, FrameScheduler, ManualScheduler};
use marchview_camera::CameraState;
use marchview_input::InputState;
use marchview_render::{RenderView, Renderer};

/// Whether a frame is currently scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame scheduled.
    Idle,
    /// Exactly one frame scheduled, identified by its request.
    Running(FrameRequest),
}

/// Input-driven render loop.
///
/// Owns the camera and the held-key state. Key-down from [`LoopState::Idle`]
/// requests one frame; each [`tick`](Self::tick) updates the camera, renders,
/// and requests another frame only while some key is still held.
pub struct RenderLoop<S: FrameScheduler> {
    camera: CameraState,
    input: InputState,
    scheduler: S,
    state: LoopState,
    ticks: u64,
}

impl<S: FrameScheduler> RenderLoop<S> {
    pub fn new(camera: CameraState, scheduler: S) -> Self {
        Self {
            camera,
            input: InputState::new(),
            scheduler,
            state: LoopState::Idle,
            ticks: 0,
        }
    }

    /// The startup render, issued once before any input arrives.
    pub fn start<R: Renderer>(&mut self, renderer: &mut R) -> R::Output {
        tracing::info!(eye = ?self.camera.position, "initial render");
        self.redraw(renderer)
    }

    /// Render the current view without advancing the camera or scheduling.
    pub fn redraw<R: Renderer>(&self, renderer: &mut R) -> R::Output {
        renderer.render(&self.view())
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.press(key);
        if self.state == LoopState::Idle {
            let request = self.scheduler.request_frame();
            tracing::debug!(key, ?request, "render loop running");
            self.state = LoopState::Running(request);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.release(key);
    }

    /// One scheduled frame: advance the camera, render, then reschedule or go idle.
    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> R::Output {
        self.camera.advance(&self.input);
        self.ticks += 1;
        let output = renderer.render(&self.view());

        // The request this tick answers is spent; withdraw it so at most one
        // stays in flight even if the host ticked without it firing.
        if let LoopState::Running(request) = self.state {
            self.scheduler.cancel_frame(request);
        }
        if self.input.any_held() {
            self.state = LoopState::Running(self.scheduler.request_frame());
        } else {
            self.state = LoopState::Idle;
            tracing::debug!(ticks = self.ticks, eye = ?self.camera.position, "render loop idle");
        }
        output
    }

    /// Host repaint. Ticks only when `fired` reports that the scheduled
    /// frame arrived; a repaint the host initiated just redraws.
    pub fn on_redraw<R: Renderer>(&mut self, fired: bool, renderer: &mut R) -> R::Output {
        if fired && self.is_running() {
            self.tick(renderer)
        } else {
            self.redraw(renderer)
        }
    }

    pub fn view(&self) -> RenderView {
        RenderView::from_camera(&self.camera)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl RenderLoop<ManualScheduler> {
    /// Fire the next pending frame, if any, and tick it.
    pub fn step<R: Renderer>(&mut self, renderer: &mut R) -> Option<R::Output> {
        self.scheduler.fire()?;
        Some(self.tick(renderer))
    }
}
