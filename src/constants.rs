/// DOM names the front-end binds to.
///
/// Selectors, attribute names and media queries live here so the wiring code
/// reads as behavior rather than string literals.
// Canvas elements that host a background (first match wins)
pub const CANVAS_SELECTOR: &str = ".bg-network, .bg-planet-particles";
pub const GLOBE_CANVAS_CLASS: &str = "bg-planet-particles"; // globe-only default layers

// Class added to <html> while a globe background is running
pub const GLOBE_ROOT_CLASS: &str = "has-particle-planet";

// Page hints for the quality factor
pub const GALLERY_SELECTOR: &str = ".gallery-main";
pub const DEFAULT_HARDWARE_CORES: u32 = 4; // when navigator.hardwareConcurrency is unavailable

// Theme marker on the root element
pub const THEME_ATTRIBUTE: &str = "data-theme";

// Canvas data attributes
pub const ATTR_LAYERS: &str = "data-layers";
pub const ATTR_GLOBE_ORDER: &str = "data-globe-order";
pub const ATTR_QUALITY: &str = "data-quality";
pub const ATTR_ADAPTIVE_QUALITY: &str = "data-adaptive-quality";
pub const ATTR_ILLUMINATION: &str = "data-illumination";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";
