use std::cmp::Ordering;
use std::ops::{Add, Sub};

use approx::AbsDiffEq;
use ordered_float::OrderedFloat;

/// A WGS84 coordinate, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-7
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.lon, &other.lon, epsilon)
            && f64::abs_diff_eq(&self.lat, &other.lat, epsilon)
    }
}

/// A metric length, always non-negative and never `NaN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Length(OrderedFloat<f64>);

impl Length {
    pub const ZERO: Length = Length(OrderedFloat(0.0));

    pub fn from_meters(meters: f64) -> Self {
        Self(OrderedFloat(meters.max(0.0)))
    }

    pub fn meters(&self) -> f64 {
        self.0.into_inner()
    }
}

impl Eq for Length {}

impl Ord for Length {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Self) -> Self::Output {
        Length::from_meters(self.meters() + rhs.meters())
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Self) -> Self::Output {
        Length::from_meters(self.meters() - rhs.meters())
    }
}

impl std::iter::Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Length::ZERO, Add::add)
    }
}

/// A similarity score in `[0,1]`; higher is a better match.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Score(OrderedFloat<f64>);

impl Score {
    pub const ZERO: Score = Score(OrderedFloat(0.0));

    pub fn new(value: f64) -> Self {
        Self(OrderedFloat(value.clamp(0.0, 1.0)))
    }

    pub fn value(&self) -> f64 {
        self.0.into_inner()
    }
}

impl Eq for Score {}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Self) -> Self::Output {
        Score::new(self.value() + rhs.value())
    }
}

/// Functional Road Class: 0 is the most important road class, 7 the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Frc {
    Frc0 = 0,
    Frc1 = 1,
    Frc2 = 2,
    Frc3 = 3,
    Frc4 = 4,
    Frc5 = 5,
    #[default]
    Frc6 = 6,
    Frc7 = 7,
}

impl Frc {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Form of Way: road shape category, used as a row/column index into the
/// stand-in scoring matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Fow {
    #[default]
    Undefined = 0,
    Motorway = 1,
    MultipleCarriageway = 2,
    SingleCarriageway = 3,
    Roundabout = 4,
    TrafficSquare = 5,
    Sliproad = 6,
    Other = 7,
}

impl Fow {
    pub fn as_usize(self) -> usize {
        self as usize
    }
}

/// Side of road a point lies on, relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideOfRoad {
    #[default]
    OnRoadOrUnknown,
    Right,
    Left,
    Both,
}

/// Direction in which a point is relevant for the digitized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    NoOrientationOrUnknown,
    AgainstDigitizingDirection,
    WithDigitizingDirection,
    BothDirections,
}

/// One anchor of an OpenLR reference: coordinate, road class, form of way,
/// bearing, and (for all but the last LRP in a sequence) the constraints on
/// the path leading to the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lrp {
    pub coordinate: Coordinate,
    pub frc: Frc,
    pub fow: Fow,
    /// Forward azimuth in degrees, `[0, 360)`.
    pub bearing: f64,
    /// Lowest FRC that may be traversed before the next LRP. Meaningless on
    /// the last LRP of a sequence.
    pub lowest_frc_to_next: Frc,
    /// Distance to the next LRP, in meters. Meaningless on the last LRP.
    pub distance_to_next: Length,
}

impl Lrp {
    pub fn new(coordinate: Coordinate, frc: Frc, fow: Fow, bearing: f64) -> Self {
        Self {
            coordinate,
            frc,
            fow,
            bearing,
            lowest_frc_to_next: Frc::Frc7,
            distance_to_next: Length::ZERO,
        }
    }

    pub fn with_path_to_next(mut self, lowest_frc_to_next: Frc, distance_to_next: Length) -> Self {
        self.lowest_frc_to_next = lowest_frc_to_next;
        self.distance_to_next = distance_to_next;
        self
    }
}

/// A line location reference: an ordered sequence of LRPs plus the
/// fractions to trim from the start and end of the resolved path.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLocationReference {
    pub points: Vec<Lrp>,
    pub positive_offset: f64,
    pub negative_offset: f64,
}

/// A point-along-line location reference: two LRPs bracketing the line the
/// point sits on, a positive offset fraction, and side/orientation flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAlongLineLocationReference {
    pub points: [Lrp; 2],
    pub positive_offset: f64,
    pub side: SideOfRoad,
    pub orientation: Orientation,
}

/// A point of interest with an access point: identical to
/// [`PointAlongLineLocationReference`], plus the POI's own coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiWithAccessPointLocationReference {
    pub points: [Lrp; 2],
    pub positive_offset: f64,
    pub side: SideOfRoad,
    pub orientation: Orientation,
    pub poi: Coordinate,
}
