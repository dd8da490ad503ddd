//! Broad-phase spatial index.
//!
//! The tree is cleared and rebuilt once per frame from the world's body
//! bounds. Nodes live in a flat arena and are recycled through a free list,
//! so a rebuild does not allocate once the arena has warmed up.

use crate::collision::bounds::Bounds;
use thiserror::Error;

pub const DEFAULT_MAX_OBJECTS: usize = 4;
pub const DEFAULT_MAX_LEVELS: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum QuadTreeError {
    #[error("quadtree bounds must have positive extent, got {width} x {height}")]
    DegenerateBounds { width: f64, height: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Item {
    id: usize,
    bounds: Bounds,
}

#[derive(Debug)]
struct Node {
    bounds: Bounds,
    level: usize,
    objects: Vec<Item>,
    /// Either a leaf or exactly four children, in fixed order:
    /// top-right, top-left, bottom-left, bottom-right.
    children: Option<[u32; 4]>,
}

/// Which child quadrant fully contains `item`, if any.
///
/// Index 0 is top-right, 1 top-left, 2 bottom-left, 3 bottom-right. An item
/// that straddles the center lines fits no quadrant and stays at the node.
fn quadrant(bounds: &Bounds, item: &Bounds) -> Option<usize> {
    let center = bounds.center();
    let top = item.max.y < center.y;
    let bottom = item.min.y > center.y;
    if item.min.x > center.x {
        if top {
            return Some(0);
        }
        if bottom {
            return Some(3);
        }
    } else if item.max.x < center.x {
        if top {
            return Some(1);
        }
        if bottom {
            return Some(2);
        }
    }
    None
}

#[derive(Debug)]
pub struct QuadTree {
    nodes: Vec<Node>,
    free: Vec<u32>,
    root: u32,
    max_objects: usize,
    max_levels: usize,
}

impl QuadTree {
    /// Creates a tree covering `bounds`. A node splits when it holds more
    /// than `max_objects` items, down to a depth of `max_levels`.
    pub fn new(
        bounds: Bounds,
        max_objects: usize,
        max_levels: usize,
    ) -> Result<Self, QuadTreeError> {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(QuadTreeError::DegenerateBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        Ok(QuadTree {
            nodes: vec![Node {
                bounds,
                level: 0,
                objects: Vec::new(),
                children: None,
            }],
            free: Vec::new(),
            root: 0,
            max_objects,
            max_levels,
        })
    }

    pub fn with_default_limits(bounds: Bounds) -> Result<Self, QuadTreeError> {
        QuadTree::new(bounds, DEFAULT_MAX_OBJECTS, DEFAULT_MAX_LEVELS)
    }

    /// Bounds of the root node.
    pub fn bounds(&self) -> Bounds {
        self.nodes[self.root as usize].bounds
    }

    /// Inserts an item by id and bounding rectangle.
    pub fn insert(&mut self, id: usize, bounds: Bounds) {
        self.insert_item(self.root, Item { id, bounds });
    }

    /// Clears the tree and re-inserts every item.
    pub fn rebuild(&mut self, items: impl IntoIterator<Item = (usize, Bounds)>) {
        self.clear();
        for (id, bounds) in items {
            self.insert(id, bounds);
        }
    }

    fn insert_item(&mut self, node_idx: u32, item: Item) {
        // Descend while the item fits entirely inside one child
        if let Some(children) = self.nodes[node_idx as usize].children {
            if let Some(q) = quadrant(&self.nodes[node_idx as usize].bounds, &item.bounds) {
                return self.insert_item(children[q], item);
            }
        }

        let node = &mut self.nodes[node_idx as usize];
        node.objects.push(item);

        if node.objects.len() > self.max_objects && node.level < self.max_levels {
            let children = match node.children {
                Some(children) => children,
                None => self.split(node_idx),
            };
            // Redistribute: push down every held object that now fits a
            // child, keep the straddlers here
            let node_bounds = self.nodes[node_idx as usize].bounds;
            let mut i = 0;
            while i < self.nodes[node_idx as usize].objects.len() {
                let held = self.nodes[node_idx as usize].objects[i];
                match quadrant(&node_bounds, &held.bounds) {
                    Some(q) => {
                        self.nodes[node_idx as usize].objects.swap_remove(i);
                        self.insert_item(children[q], held);
                    }
                    None => i += 1,
                }
            }
        }
    }

    fn split(&mut self, node_idx: u32) -> [u32; 4] {
        let (bounds, level) = {
            let node = &self.nodes[node_idx as usize];
            (node.bounds, node.level)
        };
        let half_w = bounds.width() / 2.0;
        let half_h = bounds.height() / 2.0;
        let (x, y) = (bounds.min.x, bounds.min.y);
        let quads = [
            Bounds::from_rect(x + half_w, y, half_w, half_h),
            Bounds::from_rect(x, y, half_w, half_h),
            Bounds::from_rect(x, y + half_h, half_w, half_h),
            Bounds::from_rect(x + half_w, y + half_h, half_w, half_h),
        ];
        let children = quads.map(|quad| self.alloc_node(quad, level + 1));
        self.nodes[node_idx as usize].children = Some(children);
        children
    }

    fn alloc_node(&mut self, bounds: Bounds, level: usize) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                let node = &mut self.nodes[idx as usize];
                node.bounds = bounds;
                node.level = level;
                node.objects.clear();
                node.children = None;
                idx
            }
            None => {
                self.nodes.push(Node {
                    bounds,
                    level,
                    objects: Vec::new(),
                    children: None,
                });
                (self.nodes.len() - 1) as u32
            }
        }
    }

    /// Appends to `out` every stored id whose node the query touches.
    ///
    /// The result is a superset of everything that can overlap `bounds`:
    /// false positives are expected and narrowed by the caller, false
    /// negatives never happen.
    pub fn retrieve(&self, bounds: &Bounds, out: &mut Vec<usize>) {
        self.retrieve_from(self.root, bounds, out);
    }

    fn retrieve_from(&self, node_idx: u32, bounds: &Bounds, out: &mut Vec<usize>) {
        let node = &self.nodes[node_idx as usize];
        out.extend(node.objects.iter().map(|item| item.id));
        if let Some(children) = node.children {
            match quadrant(&node.bounds, bounds) {
                Some(q) => self.retrieve_from(children[q], bounds, out),
                // The query straddles a boundary: every child may hold a match
                None => {
                    for &child in &children {
                        self.retrieve_from(child, bounds, out);
                    }
                }
            }
        }
    }

    /// Empties the tree, recycling every child node into the free list.
    /// The root becomes a leaf again; its bounds are unchanged.
    pub fn clear(&mut self) {
        self.release_children(self.root);
        self.nodes[self.root as usize].objects.clear();
    }

    /// Clears the tree and gives the root new bounds (used when the world
    /// size changes between levels).
    pub fn resize(&mut self, bounds: Bounds) -> Result<(), QuadTreeError> {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(QuadTreeError::DegenerateBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        self.clear();
        self.nodes[self.root as usize].bounds = bounds;
        Ok(())
    }

    fn release_children(&mut self, node_idx: u32) {
        if let Some(children) = self.nodes[node_idx as usize].children.take() {
            for child in children {
                self.release_children(child);
                // Keep the object Vec so its capacity survives recycling
                self.nodes[child as usize].objects.clear();
                self.free.push(child);
            }
        }
    }
}
