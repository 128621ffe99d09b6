use std::time::Duration;

// Shared tuning constants for the scroll-reactive indicator.

// Leaky integrator
pub const DAMPING: f32 = 0.82; // amplitude retained per tick
pub const EXCITATION: f32 = 0.08; // |velocity| -> amplitude gain
pub const VELOCITY_DECAY: f32 = 0.6; // velocity retained per tick once consumed
pub const VELOCITY_SNAP: f32 = 1e-3; // below this velocity is treated as zero

// Sample filtering
pub const NOISE_FLOOR: f32 = 2.0; // minimum |delta| of a qualifying sample
pub const MAX_SAMPLE_DELTA: f32 = 4000.0; // hard clamp on a single sample delta

// Continuation test
pub const REST_AMPLITUDE: f32 = 0.3;
pub const REST_VELOCITY: f32 = 2.0;

// Geometry inputs are clamped to this amplitude before mapping
pub const MAX_WARP_AMPLITUDE: f32 = 18.0;

// Container response to instantaneous velocity
pub const OFFSET_GAIN: f32 = 0.1; // px per unit of velocity
pub const OFFSET_LIMIT: f32 = 12.0; // px
pub const ROTATION_GAIN: f32 = 0.0015; // degrees per unit of velocity
pub const ROTATION_LIMIT: f32 = 0.6; // degrees

// Warp coefficients
pub const BOUNDARY_WARP: f32 = 1.6;
pub const BOUNDARY_SKEW: f32 = 0.9;
pub const TEXT_WARP: f32 = 2.5;
pub const AMBIENT_WARP: f32 = 0.35;

// Stroke emphasis
pub const STROKE_BASE_WIDTH: f32 = 1.6;
pub const STROKE_WIDTH_GAIN: f32 = 0.12;
pub const STROKE_WIDTH_MAX_EXTRA: f32 = 1.4;
pub const STROKE_BASE_ALPHA: f32 = 0.4;
pub const STROKE_ALPHA_GAIN: f32 = 0.03;
pub const STROKE_ALPHA_MAX_EXTRA: f32 = 0.45;

// Timing
pub const LABEL_QUIET: Duration = Duration::from_millis(900);
pub const LABEL_CUE_FADE: Duration = Duration::from_millis(200);
pub const LABEL_REVERT_FADE: Duration = Duration::from_millis(800);
pub const LABEL_CUE_OPACITY: f32 = 0.85;
pub const AMBIENT_WINDOW: Duration = Duration::from_millis(220);
pub const AMBIENT_FADE: Duration = Duration::from_millis(350);
pub const SETTLE_DURATION: Duration = Duration::from_millis(1500);
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(1800);
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100); // dt cap after a stalled tab

// Settle easing (elastic.out amplitude/period)
pub const SETTLE_ELASTIC_AMPLITUDE: f32 = 1.4;
pub const SETTLE_PATH_PERIOD: f32 = 0.3;
pub const SETTLE_CONTAINER_PERIOD: f32 = 0.35;

// Entrance
pub const ENTRANCE_SCALE_FROM: f32 = 0.88;
pub const ENTRANCE_BLUR_FROM: f32 = 12.0; // px

// Ambient elements
pub const AMBIENT_COUNT: usize = 6;
pub const MAX_AMBIENT_ELEMENTS: usize = 64;
pub const AMBIENT_IDLE_OPACITY: f32 = 0.35;
pub const AMBIENT_ACTIVE_OPACITY: f32 = 1.0;
pub const AMBIENT_IDLE_SPEED: f32 = 0.2; // fraction of an element's base speed
pub const AMBIENT_ACTIVE_SPEED: f32 = 2.4;
pub const AMBIENT_SPEED_MIN: f32 = 6.0; // viewBox units per second
pub const AMBIENT_SPEED_MAX: f32 = 18.0;
pub const AMBIENT_RADIUS_MIN: f32 = 1.2;
pub const AMBIENT_RADIUS_MAX: f32 = 2.6;
pub const AMBIENT_SEED: u64 = 7;

// Canvas of the control (SVG viewBox)
pub const VIEW_WIDTH: f32 = 240.0;
pub const VIEW_HEIGHT: f32 = 140.0;

// Labels and navigation
pub const DEFAULT_CAPTION: &str = "View Works";
pub const CUE_DOWN: &str = "Keep Going";
pub const CUE_UP: &str = "Going Up";
pub const DEFAULT_ROUTE: &str = "/works";
pub const AUTONAV_THRESHOLD: f32 = 600.0; // scroll offset that triggers auto navigation
