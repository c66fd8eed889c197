//! Core types for the intersection simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub SimId);

/// Compass direction of travel, fixed at vehicle creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The road axis this direction travels along
    pub fn axis(&self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }

    /// Whether another direction crosses this one at the intersection
    pub fn conflicts_with(&self, other: Direction) -> bool {
        self.axis() != other.axis()
    }
}

/// The axis a direction-pair shares. North/South vehicles travel the
/// NorthSouth axis, East/West vehicles the EastWest axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// Lane role of a vehicle
///
/// Inbound vehicles approach the intersection and are subject to
/// arbitration. Outbound vehicles have already cleared it and move
/// unconditionally until they exit the simulated area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Inbound,
    Outbound,
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Inbound, Lane::Outbound];
}

/// A 2D position in the simulation
///
/// The y axis points down, matching the screen-space convention of the
/// rendering shell. A vehicle's position is the top-left corner of its
/// footprint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, used for the simulated bounds, the
/// intersection region, and vehicle footprints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.min_y + self.max_y) / 2.0
    }

    /// Strict overlap test: rectangles that merely touch do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}
