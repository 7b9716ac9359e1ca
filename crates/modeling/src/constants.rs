/// Default weld tolerance for coincident corners.
pub use facet_config::DEFAULT_WELD_EPSILON;

/// Floats per triangle corner.
pub const FLOATS_PER_CORNER: usize = 3;

/// Floats per triangle in a flat buffer.
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// Below this length a vector is treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// Minimum weight a face contributes to a region normal/centroid.
pub const MIN_FACE_WEIGHT: f32 = 1e-8;

/// Extrude distances are clamped to +/- this value.
pub const MAX_EXTRUDE_DISTANCE: f32 = 10.0;

/// Amounts and distances below this magnitude are a no-op.
pub const MIN_OPERATION_AMOUNT: f32 = 1e-6;

/// Bevel amount clamp range.
pub const MIN_BEVEL_AMOUNT: f32 = 0.001;
pub const MAX_BEVEL_AMOUNT: f32 = 2.0;

/// Bevel inset factor is `amount * BEVEL_INSET_SCALE`, clamped to this range.
pub const BEVEL_INSET_SCALE: f32 = 0.35;
pub const MIN_BEVEL_INSET: f32 = 0.03;
pub const MAX_BEVEL_INSET: f32 = 0.46;

/// Bevel height is `amount * BEVEL_HEIGHT_SCALE`, clamped to this range.
pub const BEVEL_HEIGHT_SCALE: f32 = 0.5;
pub const MIN_BEVEL_HEIGHT: f32 = 0.005;
pub const MAX_BEVEL_HEIGHT: f32 = 1.5;

/// Triangles emitted per beveled face (6 outer ring + 6 upper ring + 1 cap).
pub const BEVEL_TRIANGLES_PER_FACE: usize = 13;
