pub mod ambient;
pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod indicator;
pub mod label;
pub mod motion;
pub mod navigation;
pub mod presence;

pub use ambient::{AmbientField, AmbientMode, AmbientView};
pub use config::IndicatorConfig;
pub use error::ConfigError;
pub use frame::RenderFrame;
pub use geometry::{Path, PathCommand, Stroke};
pub use host::{FrameHandle, Host, ManualHost, TimerHandle, TimerSlot};
pub use indicator::ScrollReactiveIndicator;
pub use label::{LabelPhase, LabelView};
pub use motion::{Direction, MotionPhase, MotionState, MotionTick, Pose};
pub use navigation::{navigate_with_transition, Navigator, ScrollThresholdTrigger, TransitionEffect};
pub use presence::PresenceView;
