use crate::ambient::AmbientView;
use crate::geometry::{self, Path, Stroke};
use crate::label::LabelView;
use crate::motion::Pose;
use crate::presence::PresenceView;

/// Everything the host needs to draw one frame of the control.
///
/// Derived from indicator state on demand; never stored by the indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub boundary: Path,
    pub text_curve: Path,
    pub offset_y: f32,
    pub rotation_deg: f32,
    pub stroke: Stroke,
    pub label: LabelView,
    pub ambient: Vec<AmbientView>,
    pub presence: PresenceView,
}

impl RenderFrame {
    /// Shapes and container transform for `pose`, with the supplied overlays.
    pub fn compose(
        shape: Pose,
        container: Pose,
        label: LabelView,
        ambient: Vec<AmbientView>,
        presence: PresenceView,
    ) -> Self {
        let shape = shape.clamped();
        let container = container.clamped();
        Self {
            boundary: geometry::boundary_path(shape.warp),
            text_curve: geometry::text_curve(shape.warp),
            offset_y: container.offset_y,
            rotation_deg: container.rotation_deg,
            stroke: geometry::stroke(shape.warp),
            label,
            ambient,
            presence,
        }
    }

    /// True when shapes, stroke and container transform are at rest.
    pub fn is_resting_geometry(&self) -> bool {
        self.boundary == geometry::resting_boundary()
            && self.text_curve == geometry::resting_text_curve()
            && self.offset_y == 0.0
            && self.rotation_deg == 0.0
            && self.stroke == Stroke::RESTING
    }

    pub fn is_finite(&self) -> bool {
        self.boundary.is_finite()
            && self.text_curve.is_finite()
            && self.offset_y.is_finite()
            && self.rotation_deg.is_finite()
            && self.stroke.width.is_finite()
            && self.stroke.alpha.is_finite()
            && self
                .ambient
                .iter()
                .all(|a| a.position.is_finite() && a.opacity.is_finite())
    }
}
