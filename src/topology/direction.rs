use crate::math::{same_coordinate, Parameter};

/// A compass direction in the `(s, t)` domain. North is `+t`, east is `+s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// All directions in counter-clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::East,
    ];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
            Self::East => Self::West,
        }
    }

    /// The direction a quarter turn counter-clockwise from this one.
    #[must_use]
    pub fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// The direction a quarter turn clockwise from this one.
    #[must_use]
    pub fn turn_right(self) -> Self {
        self.turn_left().opposite()
    }

    /// Returns `true` for north and south, which move along `t`.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Classifies the axis-aligned segment `from → to`.
    ///
    /// Returns `None` for diagonal or zero-length segments.
    #[must_use]
    pub fn of_segment(from: &Parameter, to: &Parameter) -> Option<Self> {
        let same_s = same_coordinate(from.x, to.x);
        let same_t = same_coordinate(from.y, to.y);
        match (same_s, same_t) {
            (true, false) if to.y > from.y => Some(Self::North),
            (true, false) => Some(Self::South),
            (false, true) if to.x > from.x => Some(Self::East),
            (false, true) => Some(Self::West),
            _ => None,
        }
    }
}

/// Four named slots, one per compass direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Compass<T> {
    pub north: T,
    pub west: T,
    pub south: T,
    pub east: T,
}

impl<T> Compass<T> {
    #[must_use]
    pub fn new(north: T, west: T, south: T, east: T) -> Self {
        Self {
            north,
            west,
            south,
            east,
        }
    }

    #[must_use]
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::North => &self.north,
            Direction::West => &self.west,
            Direction::South => &self.south,
            Direction::East => &self.east,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::North => &mut self.north,
            Direction::West => &mut self.west,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
        }
    }

    pub fn set(&mut self, direction: Direction, value: T) {
        *self.get_mut(direction) = value;
    }

    /// Iterates the slots in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

impl<T: Copy> Compass<Option<T>> {
    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.iter().filter(|(_, slot)| slot.is_some()).count()
    }

    /// Directions whose slot is empty.
    #[must_use]
    pub fn missing(&self) -> Vec<Direction> {
        self.iter()
            .filter(|(_, slot)| slot.is_none())
            .map(|(d, _)| d)
            .collect()
    }

    /// The value in `direction`, copied out.
    #[must_use]
    pub fn at(&self, direction: Direction) -> Option<T> {
        *self.get(direction)
    }
}
