// DOM contract of the indicator markup.

pub const CONTAINER_ID: &str = "nav-indicator"; // fixed-position wrapper, carries config attributes
pub const SHAPE_ID: &str = "nav-indicator-shape"; // deformable capsule <path>
pub const TEXT_WAVE_ID: &str = "textWave"; // baseline <path> referenced by the <textPath>
pub const LABEL_ID: &str = "nav-indicator-label"; // <textPath>
pub const AMBIENT_GROUP_ID: &str = "nav-indicator-ambient"; // <g> receiving generated circles
pub const LINK_ID: &str = "nav-indicator-link"; // activation target

pub const CONFIG_ATTR_PREFIX: &str = "data-indicator-";
pub const AUTONAV_ATTR: &str = "data-autonav"; // present -> navigate once past the threshold

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const STROKE_RGB: &str = "180, 180, 255";
