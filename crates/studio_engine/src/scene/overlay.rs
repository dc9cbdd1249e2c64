//! Screen-space indicator rectangle
//!
//! Drawn last with its own orthographic projection over the framebuffer, so
//! the camera has no effect on it. The status display recolours it every
//! frame.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::backend::{RenderBackend, RenderError};
use crate::scene::geometry;
use crate::scene::object::{FrameContext, ObjectBase, ObjectType, SceneObject};

/// Translucency of the indicator
pub const OVERLAY_ALPHA: f32 = 0.3;

/// Full-screen tinted rectangle
#[derive(Debug, Clone)]
pub struct OverlayRect {
    base: ObjectBase,
}

impl OverlayRect {
    /// Indicator in `color`
    pub fn new(color: Vec3) -> Self {
        Self {
            base: ObjectBase::new(geometry::quad(), color),
        }
    }

    /// Stretch the unit quad over a `width` x `height` screen
    pub fn fit_screen(&mut self, width: f32, height: f32) {
        let half = Vec3::new(width / 2.0, height / 2.0, 1.0);
        self.base.transform(half, Vec3::new(half.x, half.y, 0.0));
    }
}

impl SceneObject for OverlayRect {
    fn object_type(&self) -> ObjectType {
        ObjectType::Overlay
    }

    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn draw(
        &self,
        frame: &FrameContext<'_>,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let screen = frame.env.screen_size;
        let model = self.base.model_matrix(&Mat4::identity());
        let mut params = self.base.draw_params(ObjectType::Overlay, frame, model);
        params.view = Mat4::identity();
        params.projection = Mat4::ortho_2d(0.0, screen.x, 0.0, screen.y);
        params.color = self.base.shade_color(OVERLAY_ALPHA);
        backend.draw_object(&params)
    }
}
