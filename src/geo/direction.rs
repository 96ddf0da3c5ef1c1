use strum_macros::{Display, IntoStaticStr};

/// One of the eight 45° compass sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

const SLICE_DEG: f64 = 22.5;

// Sixteen 22.5° slices, two per sector, N wrapping around 0°.
const DIRECTION_LUT: [Direction; 16] = [
    Direction::N,
    Direction::NE,
    Direction::NE,
    Direction::E,
    Direction::E,
    Direction::SE,
    Direction::SE,
    Direction::S,
    Direction::S,
    Direction::SW,
    Direction::SW,
    Direction::W,
    Direction::W,
    Direction::NW,
    Direction::NW,
    Direction::N,
];

/// Classify a bearing in degrees into a compass octant.
pub fn octant(angle: f64) -> Direction {
    let angle = angle.rem_euclid(360.0);
    let slice = ((angle / SLICE_DEG).floor() as usize).min(DIRECTION_LUT.len() - 1);
    DIRECTION_LUT[slice]
}
