//! Vehicle state and movement logic
//!
//! Standalone implementation that doesn't depend on Bevy.

use ordered_float::OrderedFloat;

use super::config::SimConfig;
use super::types::{Direction, Lane, Position, Rect, VehicleId};

/// A single traffic participant
///
/// `position` is the top-left corner of the footprint. `direction` and
/// `lane` never change after creation. Outbound vehicles never wait.
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub direction: Direction,
    pub lane: Lane,
    pub position: Position,
    /// Footprint width and height in world units
    pub width: f32,
    pub height: f32,
    /// Units per second while moving
    pub speed: f32,
    /// True means the vehicle does not advance this tick
    pub waiting: bool,
    /// Set once arbitration clears the vehicle; granted vehicles are never
    /// re-arbitrated
    pub granted: bool,
    /// Creation timestamp; the FCFS queue key
    pub arrival_time: OrderedFloat<f32>,
}

impl SimVehicle {
    /// Create a vehicle at its entry point
    ///
    /// Inbound vehicles enter at the boundary of the simulated area on the
    /// approach lane. Outbound vehicles have already cleared the
    /// intersection: they enter just past the far edge of the region on the
    /// exit lane, moving away from it.
    pub fn spawn(
        id: VehicleId,
        direction: Direction,
        lane: Lane,
        now: f32,
        config: &SimConfig,
    ) -> Self {
        let (w, h) = config.vehicle_size;
        let bounds = &config.bounds;
        let region = config.intersection_region();
        let cx = bounds.center_x();
        let cy = bounds.center_y();
        let half_lane = config.lane_width() / 2.0;

        let position = match (direction, lane) {
            (Direction::North, Lane::Inbound) => {
                Position::new(cx - half_lane - w / 2.0, bounds.max_y - h)
            }
            (Direction::North, Lane::Outbound) => {
                Position::new(cx + half_lane - w / 2.0, region.max_y)
            }
            (Direction::South, Lane::Inbound) => {
                Position::new(cx + half_lane - w / 2.0, bounds.min_y)
            }
            (Direction::South, Lane::Outbound) => {
                Position::new(cx - half_lane - w / 2.0, region.min_y - h)
            }
            (Direction::East, Lane::Inbound) => {
                Position::new(bounds.min_x, cy - half_lane - h / 2.0)
            }
            (Direction::East, Lane::Outbound) => {
                Position::new(region.min_x - w, cy + half_lane - h / 2.0)
            }
            (Direction::West, Lane::Inbound) => {
                Position::new(bounds.max_x - w, cy + half_lane - h / 2.0)
            }
            (Direction::West, Lane::Outbound) => {
                Position::new(region.max_x, cy - half_lane - h / 2.0)
            }
        };

        Self {
            id,
            direction,
            lane,
            position,
            width: w,
            height: h,
            speed: config.speed,
            waiting: lane == Lane::Inbound,
            granted: false,
            arrival_time: OrderedFloat(now),
        }
    }

    /// Unit step along the travel axis; the sign depends on the lane
    fn step(&self) -> (f32, f32) {
        match (self.direction, self.lane) {
            (Direction::North, Lane::Inbound) => (0.0, -1.0),
            (Direction::North, Lane::Outbound) => (0.0, 1.0),
            (Direction::South, Lane::Inbound) => (0.0, 1.0),
            (Direction::South, Lane::Outbound) => (0.0, -1.0),
            (Direction::East, Lane::Inbound) => (1.0, 0.0),
            (Direction::East, Lane::Outbound) => (-1.0, 0.0),
            (Direction::West, Lane::Inbound) => (-1.0, 0.0),
            (Direction::West, Lane::Outbound) => (1.0, 0.0),
        }
    }

    /// Move by `speed * delta` along the direction axis, unless waiting
    pub fn advance(&mut self, delta_secs: f32) {
        if self.waiting {
            return;
        }
        let (dx, dy) = self.step();
        self.position.x += dx * self.speed * delta_secs;
        self.position.y += dy * self.speed * delta_secs;
    }

    /// The footprint occupied by this vehicle
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Whether an Inbound vehicle's leading edge has reached the
    /// arbitration boundary of the intersection region
    ///
    /// Pure geometry; always false for Outbound vehicles.
    pub fn at_intersection(&self, region: &Rect) -> bool {
        if self.lane != Lane::Inbound {
            return false;
        }
        match self.direction {
            Direction::North => self.position.y <= region.max_y,
            Direction::South => self.position.y + self.height >= region.min_y,
            Direction::East => self.position.x + self.width >= region.min_x,
            Direction::West => self.position.x <= region.max_x,
        }
    }

    /// Whether the vehicle is moving through the intersection box right now
    pub fn is_crossing(&self, region: &Rect) -> bool {
        !self.waiting && self.rect().overlaps(region)
    }

    /// Whether the position has strictly exited the simulated rectangle on
    /// any side; a pure query with no side effects
    pub fn is_out_of_bounds(&self, bounds: &Rect) -> bool {
        self.position.x < bounds.min_x - self.width
            || self.position.x > bounds.max_x
            || self.position.y < bounds.min_y - self.height
            || self.position.y > bounds.max_y
    }

    /// Identity color for the renderer, keyed by direction
    pub fn color(&self) -> [f32; 3] {
        match self.direction {
            Direction::North => [1.0, 0.0, 0.0],
            Direction::South => [0.0, 0.0, 1.0],
            Direction::East => [0.0, 1.0, 0.0],
            Direction::West => [1.0, 1.0, 0.0],
        }
    }

    /// Map glyph showing the actual heading (outbound vehicles move with
    /// the opposite sign of their inbound counterparts)
    pub fn glyph(&self) -> char {
        match self.step() {
            (_, dy) if dy < 0.0 => '^',
            (_, dy) if dy > 0.0 => 'v',
            (dx, _) if dx > 0.0 => '>',
            _ => '<',
        }
    }
}
