//! 2D collision detection and body integration core for a game runtime.
//!
//! The pipeline per tick: every [`Body`] integrates its velocity, the
//! [`QuadTree`] broad phase is rebuilt from the bodies' bounding rectangles,
//! and each body's broad-phase candidates are narrowed by exact SAT tests.
//! Confirmed overlaps populate a [`Response`] and trigger the registered
//! collision callbacks plus positional correction.

pub mod collision;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::bounds::Bounds;
pub use collision::quadtree::QuadTree;
pub use collision::response::Response;
pub use math::vec2::Vec2;
pub use objects::body::Body;
pub use shapes::{Ellipse, Line, Polygon, Rect, Shape, ShapeError};
pub use world::{CollisionWorld, FrameStats, WorldConfig};
