pub const DEFAULT_VOLUME: f32 = 0.5;
pub const DEFAULT_TEMPO: u32 = 80;

/// Exponential decay never reaches zero, so envelopes ramp toward this floor
pub const ENVELOPE_FLOOR: f32 = 0.01;

/// Canonical canvas used when an input event carries no coordinates
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
