//! Shared application-wide constants.
//! Centralizes tweakable values used by the canvas engine and the UI.

// Viewport
/// Smallest zoom factor the viewport accepts.
pub const MIN_ZOOM: f32 = 0.6;
/// Largest zoom factor the viewport accepts.
pub const MAX_ZOOM: f32 = 2.0;
/// Multiplier applied (or divided out) by a single zoom step.
pub const ZOOM_STEP: f32 = 1.2;

// Vertices
/// Base vertex radius in world units.
pub const VERTEX_RADIUS: f32 = 20.0;
/// Radius multiplier while a vertex is being dragged.
pub const DRAGGING_RADIUS_SCALE: f32 = 0.9;
/// Radius multiplier while a vertex is hovered.
pub const HOVER_RADIUS_SCALE: f32 = 1.1;

// Edges
/// Perpendicular distance (world units) between neighbouring parallel edges.
pub const PARALLEL_EDGE_SPACING: f32 = 18.0;
/// Edges shorter than this are treated as degenerate and not drawn.
pub const MIN_EDGE_LENGTH: f32 = 1e-3;

// Placement
/// How long a re-dropped unit stays highlighted, in seconds.
pub const HIGHLIGHT_DURATION_SECS: f64 = 1.5;

// Search
/// Default base URL of the unit search/filter service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

// Canvas
/// Background grid spacing in world units.
pub const GRID_SIZE: f32 = 40.0;
