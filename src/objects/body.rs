use crate::collision::bounds::Bounds;
use crate::collision::response::Response;
use crate::collision::types;
use crate::math::vec2::Vec2;
use crate::shapes::{Rect, Shape, ShapeError};

/// A movable physics body: one or more shapes plus the state the per-tick
/// integrator works on.
///
/// Velocity is measured in units per frame; `update` adds it to the position
/// directly after gravity, friction and clamping have been applied. Collision
/// resolution is positional, not impulse based: `respond_to_collision`
/// subtracts the penetration vector reported by the narrow phase.
///
/// The `falling` and `jumping` flags are derived state. Gravity pulling the
/// velocity downward sets `falling`; the sign of the last resolved vertical
/// overlap re-derives both.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// World position of the body's local origin.
    pub position: Vec2,
    /// Displacement per frame, after `compute_velocity`.
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Per-axis velocity decay, in units per frame. Zero disables friction.
    pub friction: Vec2,
    /// Per-axis velocity cap, applied symmetrically around zero.
    pub max_velocity: Vec2,
    /// Per-body gravity override; `None` inherits the world setting when the
    /// body is added to a world.
    pub gravity: Option<f64>,
    pub falling: bool,
    pub jumping: bool,
    /// Static bodies skip integration and never initiate collision tests;
    /// they still block and report collisions as the second participant.
    pub is_static: bool,
    /// The single category bit this body belongs to.
    pub collision_type: u32,
    /// Categories this body is willing to collide with.
    pub collision_mask: u32,
    shapes: Vec<Shape>,
    local_bounds: Bounds,
}

impl Body {
    /// Creates a body with no shapes at `position`.
    ///
    /// Defaults to the [`ENEMY_OBJECT`](types::ENEMY_OBJECT) category with a
    /// mask accepting every category, and no velocity cap.
    pub fn new(position: Vec2) -> Self {
        Body {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            friction: Vec2::ZERO,
            max_velocity: Vec2::new(f64::INFINITY, f64::INFINITY),
            gravity: None,
            falling: false,
            jumping: false,
            is_static: false,
            collision_type: types::ENEMY_OBJECT,
            collision_mask: types::ALL_OBJECT,
            shapes: Vec::new(),
            local_bounds: Bounds::new(Vec2::ZERO, Vec2::ZERO),
        }
    }

    /// Creates a body covered by a single full-size rectangle, the usual
    /// starting point for an entity that has no custom collision shape.
    pub fn with_size(position: Vec2, width: f64, height: f64) -> Result<Self, ShapeError> {
        let mut body = Body::new(position);
        body.add_shape(Rect::new(Vec2::ZERO, width, height)?.into());
        Ok(body)
    }

    /// Attaches a shape and returns its index within the body.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.update_bounds();
        self.shapes.len() - 1
    }

    /// Detaches and returns the shape at `index`, or `None` when out of
    /// range.
    pub fn remove_shape(&mut self, index: usize) -> Option<Shape> {
        if index >= self.shapes.len() {
            return None;
        }
        let shape = self.shapes.remove(index);
        self.update_bounds();
        Some(shape)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to a shape. Call [`update_bounds`](Self::update_bounds)
    /// after changing its geometry.
    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    /// Recomputes the cached union of all shape bounds. A body with no
    /// shapes collapses to a point at its origin.
    pub fn update_bounds(&mut self) {
        let mut shapes = self.shapes.iter();
        let mut union = match shapes.next() {
            Some(shape) => shape.bounds(),
            None => Bounds::new(Vec2::ZERO, Vec2::ZERO),
        };
        for shape in shapes {
            union.merge(&shape.bounds());
        }
        self.local_bounds = union;
    }

    /// World-space bounding rectangle: the shape union translated by the
    /// body position.
    pub fn bounds(&self) -> Bounds {
        self.local_bounds.translated(self.position)
    }

    /// Applies acceleration, gravity, friction and the velocity cap for one
    /// tick.
    ///
    /// Gravity pulls `velocity.y`; a downward velocity marks the body as
    /// falling and a falling body is no longer jumping. Friction decays each
    /// axis toward zero by a fixed amount per tick and never crosses it.
    pub fn compute_velocity(&mut self, tick: f64) {
        self.velocity += self.acceleration * tick;

        let gravity = self.gravity.unwrap_or(0.0);
        if gravity != 0.0 {
            self.velocity.y += gravity * tick;
            self.falling = self.velocity.y > 0.0;
            if self.falling {
                self.jumping = false;
            }
        }

        self.velocity.x = apply_friction(self.velocity.x, self.friction.x, tick);
        self.velocity.y = apply_friction(self.velocity.y, self.friction.y, tick);

        self.velocity.x = self.velocity.x.clamp(-self.max_velocity.x, self.max_velocity.x);
        self.velocity.y = self.velocity.y.clamp(-self.max_velocity.y, self.max_velocity.y);
    }

    /// Advances the body by one tick and reports whether it moved. Static
    /// bodies never move.
    pub fn update(&mut self, tick: f64) -> bool {
        if self.is_static {
            return false;
        }
        self.compute_velocity(tick);
        self.position += self.velocity;
        self.velocity.x != 0.0 || self.velocity.y != 0.0
    }

    /// Applies the positional correction from a narrow-phase hit where this
    /// body was participant A.
    ///
    /// Subtracts the penetration vector from the position, snaps the
    /// affected velocity axes to whole units so resting contact settles, and
    /// re-derives `falling`/`jumping` from the vertical overlap: a push out
    /// of the ground (overlap pointing down by at least one unit) lands the
    /// body, a push out of a ceiling ends the jump.
    pub fn respond_to_collision(&mut self, response: &Response) {
        let overlap = response.overlap_vector;
        self.position -= overlap;

        if overlap.x != 0.0 {
            self.velocity.x = snap(self.velocity.x - overlap.x);
        }
        if overlap.y != 0.0 {
            self.velocity.y = snap(self.velocity.y - overlap.y);
            self.falling = overlap.y >= 1.0;
            self.jumping = overlap.y <= -1.0;
        }
    }
}

/// Moves `velocity` toward zero by `friction * tick` without crossing it.
fn apply_friction(velocity: f64, friction: f64, tick: f64) -> f64 {
    if friction <= 0.0 {
        return velocity;
    }
    let decay = friction * tick;
    if velocity > decay {
        velocity - decay
    } else if velocity < -decay {
        velocity + decay
    } else {
        0.0
    }
}

// Truncate at the half step so sub-unit remainders drop to zero.
fn snap(value: f64) -> f64 {
    (value + 0.5).trunc()
}
