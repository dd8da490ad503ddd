pub mod bounds;
pub mod quadtree;
pub mod response;
pub mod sat;
pub mod types;

// Re-export key types
pub use bounds::Bounds;
pub use quadtree::QuadTree;
pub use response::Response;
pub use types::{should_collide, ALL_OBJECT, NO_OBJECT};
