//! World container and per-frame collision orchestration.
//!
//! Each tick the world integrates every body, rebuilds the broad-phase
//! quadtree from their bounds, and tests every moving body against its
//! broad-phase candidates. Hits run the registered user callbacks and, when
//! allowed, the positional correction on the first participant.
//!
//! Both orderings of a pair are visited, since each body queries the tree
//! independently. Callbacks must tolerate being invoked for (A, B) as well
//! as (B, A) within the same frame.

use log::{debug, trace};

use crate::collision::bounds::Bounds;
use crate::collision::quadtree::{
    QuadTree, QuadTreeError, DEFAULT_MAX_LEVELS, DEFAULT_MAX_OBJECTS,
};
use crate::collision::response::Response;
use crate::collision::sat;
use crate::collision::types;
use crate::objects::body::Body;

/// Tuning knobs for a [`CollisionWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// World extent covered by the broad phase.
    pub bounds: Bounds,
    /// Downward gravity inherited by bodies without a per-body override.
    pub gravity: f64,
    /// Quadtree node capacity before it splits.
    pub max_objects: usize,
    /// Maximum quadtree depth.
    pub max_levels: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            bounds: Bounds::from_rect(0.0, 0.0, 1024.0, 768.0),
            gravity: 0.98,
            max_objects: DEFAULT_MAX_OBJECTS,
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }
}

/// Per-frame counters returned by [`CollisionWorld::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Broad-phase candidate pairings, before any filtering.
    pub candidates: usize,
    /// Narrow-phase shape tests dispatched after mask and bounds filtering.
    pub tests: usize,
    /// Shape tests that reported a hit.
    pub collisions: usize,
}

/// Invoked once per narrow-phase hit involving the body it is registered
/// for. Returning `false` opts the body out of automatic positional
/// correction for that hit, which is how trigger volumes avoid pushing
/// anything.
type CollisionCallback = Box<dyn FnMut(&Response) -> bool>;

/// Container for bodies plus the per-frame collision pipeline.
pub struct CollisionWorld {
    bodies: Vec<Body>,
    callbacks: Vec<Option<CollisionCallback>>,
    quadtree: QuadTree,
    response: Response,
    gravity: f64,
}

impl CollisionWorld {
    /// Creates an empty world. Fails when the configured bounds have no
    /// area.
    pub fn new(config: WorldConfig) -> Result<Self, QuadTreeError> {
        Ok(CollisionWorld {
            bodies: Vec::new(),
            callbacks: Vec::new(),
            quadtree: QuadTree::new(config.bounds, config.max_objects, config.max_levels)?,
            response: Response::default(),
            gravity: config.gravity,
        })
    }

    /// Adds a body and returns its index. A body without a gravity override
    /// inherits the world gravity.
    pub fn add_body(&mut self, mut body: Body) -> usize {
        if body.gravity.is_none() {
            body.gravity = Some(self.gravity);
        }
        self.bodies.push(body);
        self.callbacks.push(None);
        self.bodies.len() - 1
    }

    pub fn body(&self, index: usize) -> &Body {
        &self.bodies[index]
    }

    pub fn body_mut(&mut self, index: usize) -> &mut Body {
        &mut self.bodies[index]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Registers the collision callback for the body at `index`, replacing
    /// any previous one. Without a callback the body's hits are reported in
    /// the frame stats but trigger no positional correction.
    pub fn set_callback(
        &mut self,
        index: usize,
        callback: impl FnMut(&Response) -> bool + 'static,
    ) {
        self.callbacks[index] = Some(Box::new(callback));
    }

    pub fn clear_callback(&mut self, index: usize) {
        self.callbacks[index] = None;
    }

    /// Runs one tick: integration, broad phase rebuild, narrow phase and
    /// response.
    pub fn update(&mut self, tick: f64) -> FrameStats {
        let mut stats = FrameStats::default();

        for body in &mut self.bodies {
            body.update(tick);
        }

        self.quadtree.rebuild(
            self.bodies
                .iter()
                .enumerate()
                .map(|(id, body)| (id, body.bounds())),
        );

        let mut candidates: Vec<usize> = Vec::new();
        for a in 0..self.bodies.len() {
            if self.bodies[a].is_static {
                continue;
            }
            let bounds_a = self.bodies[a].bounds();
            candidates.clear();
            self.quadtree.retrieve(&bounds_a, &mut candidates);

            for slot in 0..candidates.len() {
                let b = candidates[slot];
                if b == a {
                    continue;
                }
                stats.candidates += 1;

                let body_a = &self.bodies[a];
                let body_b = &self.bodies[b];
                if !types::should_collide(
                    body_a.collision_type,
                    body_a.collision_mask,
                    body_b.collision_type,
                    body_b.collision_mask,
                ) {
                    continue;
                }
                if !body_a.bounds().overlaps(&body_b.bounds()) {
                    continue;
                }

                let shapes_a = body_a.shapes().len();
                let shapes_b = body_b.shapes().len();
                for index_a in 0..shapes_a {
                    for index_b in 0..shapes_b {
                        stats.tests += 1;
                        self.response.a = a;
                        self.response.b = b;
                        self.response.clear();

                        let hit = {
                            let body_a = &self.bodies[a];
                            let body_b = &self.bodies[b];
                            sat::test_shapes(
                                body_a.position,
                                &body_a.shapes()[index_a],
                                body_b.position,
                                &body_b.shapes()[index_b],
                                &mut self.response,
                            )
                        };
                        if !hit {
                            continue;
                        }

                        self.response.shape_index_a = index_a;
                        self.response.shape_index_b = index_b;
                        stats.collisions += 1;
                        trace!(
                            "hit: body {a} shape {index_a} into body {b} shape {index_b}, overlap {:.3}",
                            self.response.overlap
                        );

                        let respond = match self.callbacks[a].as_mut() {
                            Some(callback) => callback(&self.response),
                            None => false,
                        };
                        if let Some(callback) = self.callbacks[b].as_mut() {
                            callback(&self.response);
                        }
                        if respond {
                            self.bodies[a].respond_to_collision(&self.response);
                        }
                    }
                }
            }
        }

        debug!(
            "frame: {} candidates, {} tests, {} collisions",
            stats.candidates, stats.tests, stats.collisions
        );
        stats
    }
}
