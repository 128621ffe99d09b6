//! Pose -> vector geometry.
//!
//! All shapes live in the control's 240x140 viewBox. Every function here is
//! pure; a zero warp reproduces the resting shapes exactly and flipping the
//! sign of the warp mirrors the deformation.

use crate::constants::{
    BOUNDARY_SKEW, BOUNDARY_WARP, MAX_WARP_AMPLITUDE, STROKE_ALPHA_GAIN, STROKE_ALPHA_MAX_EXTRA,
    STROKE_BASE_ALPHA, STROKE_BASE_WIDTH, STROKE_WIDTH_GAIN, STROKE_WIDTH_MAX_EXTRA, TEXT_WARP,
};
use smallvec::SmallVec;
use std::fmt;

// Capsule layout
const LEFT: f32 = 20.0;
const RIGHT: f32 = 220.0;
const TOP: f32 = 25.0;
const BOTTOM: f32 = 95.0;
const MID_X: f32 = 120.0;
const CORNER: f32 = 25.0;

// Text baseline
const TEXT_START_X: f32 = 68.0;
const TEXT_END_X: f32 = 172.0;
const TEXT_Y: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    VerticalTo { y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
    /// Relative quarter arc (no rotation, small arc, clockwise sweep).
    ArcBy { radius: f32, dx: f32, dy: f32 },
    Close,
}

impl PathCommand {
    fn is_finite(&self) -> bool {
        match *self {
            PathCommand::MoveTo { x, y } => x.is_finite() && y.is_finite(),
            PathCommand::VerticalTo { y } => y.is_finite(),
            PathCommand::QuadTo { cx, cy, x, y } => {
                cx.is_finite() && cy.is_finite() && x.is_finite() && y.is_finite()
            }
            PathCommand::ArcBy { radius, dx, dy } => {
                radius.is_finite() && dx.is_finite() && dy.is_finite()
            }
            PathCommand::Close => true,
        }
    }
}

/// A short path; the indicator's shapes never exceed twelve commands.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    commands: SmallVec<[PathCommand; 12]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: PathCommand) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(PathCommand::is_finite)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *cmd {
                PathCommand::MoveTo { x, y } => write!(f, "M{},{}", Num(x), Num(y))?,
                PathCommand::VerticalTo { y } => write!(f, "V{}", Num(y))?,
                PathCommand::QuadTo { cx, cy, x, y } => {
                    write!(f, "Q{},{} {},{}", Num(cx), Num(cy), Num(x), Num(y))?
                }
                PathCommand::ArcBy { radius, dx, dy } => write!(
                    f,
                    "a{},{} 0 0 1 {},{}",
                    Num(radius),
                    Num(radius),
                    Num(dx),
                    Num(dy)
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Path-data number: two decimals, trailing zeros trimmed.
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        // avoid "-0"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        let s = format!("{:.2}", rounded);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        f.write_str(s)
    }
}

#[inline]
fn bounded(warp: f32) -> f32 {
    if warp.is_finite() {
        warp.clamp(-MAX_WARP_AMPLITUDE, MAX_WARP_AMPLITUDE)
    } else {
        0.0
    }
}

/// Closed capsule outline with bowed top and bottom edges.
pub fn boundary_path(warp: f32) -> Path {
    let w = bounded(warp);
    let ctrl_x = MID_X + w * BOUNDARY_SKEW;
    let top_y = TOP + w * BOUNDARY_WARP;
    let bottom_y = BOTTOM + w * BOUNDARY_WARP;

    let mut p = Path::new();
    p.push(PathCommand::MoveTo { x: LEFT, y: TOP })
        .push(PathCommand::QuadTo {
            cx: ctrl_x,
            cy: top_y,
            x: RIGHT,
            y: TOP,
        })
        .push(PathCommand::ArcBy {
            radius: CORNER,
            dx: CORNER,
            dy: CORNER,
        })
        .push(PathCommand::VerticalTo { y: BOTTOM - CORNER })
        .push(PathCommand::ArcBy {
            radius: CORNER,
            dx: -CORNER,
            dy: CORNER,
        })
        .push(PathCommand::QuadTo {
            cx: ctrl_x,
            cy: bottom_y,
            x: LEFT,
            y: BOTTOM,
        })
        .push(PathCommand::ArcBy {
            radius: CORNER,
            dx: -CORNER,
            dy: -CORNER,
        })
        .push(PathCommand::VerticalTo { y: TOP + CORNER })
        .push(PathCommand::ArcBy {
            radius: CORNER,
            dx: CORNER,
            dy: -CORNER,
        })
        .push(PathCommand::Close);
    p
}

/// Open baseline the label text is laid along.
pub fn text_curve(warp: f32) -> Path {
    let w = bounded(warp);
    let mut p = Path::new();
    p.push(PathCommand::MoveTo {
        x: TEXT_START_X,
        y: TEXT_Y,
    })
    .push(PathCommand::QuadTo {
        cx: MID_X,
        cy: TEXT_Y + w * TEXT_WARP,
        x: TEXT_END_X,
        y: TEXT_Y,
    });
    p
}

pub fn resting_boundary() -> Path {
    boundary_path(0.0)
}

pub fn resting_text_curve() -> Path {
    text_curve(0.0)
}

/// Outline emphasis; thickens and brightens with the deformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub alpha: f32,
}

impl Stroke {
    pub const RESTING: Stroke = Stroke {
        width: STROKE_BASE_WIDTH,
        alpha: STROKE_BASE_ALPHA,
    };
}

pub fn stroke(warp: f32) -> Stroke {
    let m = bounded(warp).abs();
    Stroke {
        width: STROKE_BASE_WIDTH + (m * STROKE_WIDTH_GAIN).min(STROKE_WIDTH_MAX_EXTRA),
        alpha: STROKE_BASE_ALPHA + (m * STROKE_ALPHA_GAIN).min(STROKE_ALPHA_MAX_EXTRA),
    }
}

/// Vertical displacement of the top edge's control point, used to compare
/// deformation magnitude and direction.
pub fn boundary_bow(path: &Path) -> Option<f32> {
    path.commands().iter().find_map(|c| match *c {
        PathCommand::QuadTo { cy, y, .. } => Some(cy - y),
        _ => None,
    })
}
