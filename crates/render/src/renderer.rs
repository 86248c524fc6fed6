use glam::Vec3;
use marchview_camera::CameraState;

/// The camera vectors a frame is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit vector opposite the viewing direction.
    pub back: Vec3,
    /// Normalized reference up vector.
    pub up: Vec3,
}

impl RenderView {
    pub fn from_camera(camera: &CameraState) -> Self {
        let basis = camera.basis();
        Self {
            eye: camera.position,
            back: basis.back,
            up: basis.up,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&CameraState::default())
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer receives the camera vectors for one frame and draws the
/// full-screen quad with them.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&mut self, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable line per frame and counts frames drawn.
/// Useful for CLI output, logging, and testing the render loop.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, view: &RenderView) -> String {
        self.frames += 1;
        let line = format!(
            "frame {}: eye=({:.4}, {:.4}, {:.4}) back=({:.4}, {:.4}, {:.4}) up=({:.4}, {:.4}, {:.4})",
            self.frames,
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.back.x,
            view.back.y,
            view.back.z,
            view.up.x,
            view.up.y,
            view.up.z
        );
        tracing::trace!("{line}");
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_from_default_camera() {
        let view = RenderView::default();
        assert_eq!(view.eye, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(view.back, Vec3::NEG_Z);
        assert_eq!(view.up, Vec3::Y);
    }

    #[test]
    fn view_carries_normalized_up() {
        let camera = CameraState {
            up: Vec3::new(0.0, 0.0, 9.0),
            yaw: 0.4,
            ..CameraState::default()
        };
        let view = RenderView::from_camera(&camera);
        assert_eq!(view.up, Vec3::Z);
        assert_eq!(view.back, camera.back());
    }

    #[test]
    fn debug_renderer_counts_frames() {
        let mut renderer = DebugTextRenderer::new();
        let view = RenderView::default();
        let first = renderer.render(&view);
        let second = renderer.render(&view);

        assert!(first.starts_with("frame 1:"));
        assert!(second.starts_with("frame 2:"));
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn debug_renderer_prints_vectors() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&RenderView::default());
        assert!(output.contains("eye=(0.0000, 0.0000, -2.0000)"));
        assert!(output.contains("up=(0.0000, 1.0000, 0.0000)"));
    }
}
