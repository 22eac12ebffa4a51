/// Collision detection for world potions, obstacles and actors
///
/// This module provides the axis-aligned bounding box (AABB) primitives the
/// spawner and the collection check are built on.
///
/// # Architecture
///
/// - `Rect`: integer bounding box with exclusive right/bottom edges
/// - `Collidable` trait: anything that moves and has bounds (actors, potions)
/// - `StaticCollidable` trait: immovable world geometry (walls, rocks)
/// - `CollisionCheck` trait: the overlap test itself, injected by the host
///   so a game with its own physics can replace the plain AABB test
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels.
///
/// `x`/`y` are the top-left corner. The right and bottom edges are exclusive,
/// so two rectangles that only touch do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// Trait for entities that move around and can touch world potions.
///
/// # Example
///
/// ```ignore
/// impl Collidable for Character {
///     fn get_bounds(&self) -> Rect {
///         Rect::new(self.x, self.y, self.width, self.height)
///     }
/// }
/// ```
pub trait Collidable {
    /// Returns the axis-aligned bounding box for this entity.
    fn get_bounds(&self) -> Rect;
}

/// Trait for static (non-moving) world objects that block potion placement.
pub trait StaticCollidable {
    /// Returns the axis-aligned bounding box for this static object.
    fn get_bounds(&self) -> Rect;
}

/// A generic static world object (wall, rock, table, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticObject {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl StaticObject {
    /// Creates a new static object at the given position with the given size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        StaticObject {
            x,
            y,
            width,
            height,
        }
    }
}

impl StaticCollidable for StaticObject {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The overlap test used by the spawner, supplied by the embedding game.
pub trait CollisionCheck {
    fn collides(&self, a: &Rect, b: &Rect) -> bool;
}

/// Plain AABB overlap, the default `CollisionCheck`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbCollision;

impl CollisionCheck for AabbCollision {
    fn collides(&self, a: &Rect, b: &Rect) -> bool {
        aabb_intersect(a, b)
    }
}

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Two rectangles intersect if they overlap on both the X and Y axes. For
/// them NOT to intersect, one must lie completely to the left, right, above
/// or below the other.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.x() < b.right() && a.right() > b.x();
    let y_overlap = a.y() < b.bottom() && a.bottom() > b.y();

    x_overlap && y_overlap
}
