//! FDI tooth positions and the adjacency relation.
//!
//! Positions are the two-digit FDI numbers 11-48: the first digit is the
//! quadrant (1 upper right, 2 upper left, 3 lower left, 4 lower right), the
//! second is the tooth within the quadrant counted from the midline
//! (1 central incisor .. 8 third molar).
//!
//! Two positions are adjacent iff they are consecutive within the same
//! quadrant's arch-ordered sequence, or they form one of the fixed
//! cross-midline pairs in [`crate::rules::CROSS_MIDLINE_PAIRS`]. Connections
//! never cross the jaw boundary.

use std::fmt;

use crate::ModelError;
use crate::rules::CROSS_MIDLINE_PAIRS;

/// Upper or lower jaw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Jaw {
    Upper,
    Lower,
}

impl Jaw {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jaw::Upper => "upper",
            Jaw::Lower => "lower",
        }
    }
}

impl fmt::Display for Jaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four FDI quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// The FDI quadrant digit (1-4).
    pub fn digit(&self) -> u8 {
        match self {
            Quadrant::UpperRight => 1,
            Quadrant::UpperLeft => 2,
            Quadrant::LowerLeft => 3,
            Quadrant::LowerRight => 4,
        }
    }

    pub fn jaw(&self) -> Jaw {
        match self {
            Quadrant::UpperRight | Quadrant::UpperLeft => Jaw::Upper,
            Quadrant::LowerLeft | Quadrant::LowerRight => Jaw::Lower,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::UpperRight => "upper-right",
            Quadrant::UpperLeft => "upper-left",
            Quadrant::LowerLeft => "lower-left",
            Quadrant::LowerRight => "lower-right",
        }
    }

    fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Quadrant::UpperRight),
            2 => Some(Quadrant::UpperLeft),
            3 => Some(Quadrant::LowerLeft),
            4 => Some(Quadrant::LowerRight),
            _ => None,
        }
    }
}

/// A validated FDI tooth position (11-48).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    pub fn new(fdi: u8) -> Result<Self, ModelError> {
        let quadrant = fdi / 10;
        let tooth = fdi % 10;
        if !(1..=4).contains(&quadrant) || !(1..=8).contains(&tooth) {
            return Err(ModelError::InvalidPosition(fdi));
        }
        Ok(Self(fdi))
    }

    /// The raw FDI number.
    pub fn fdi(&self) -> u8 {
        self.0
    }

    pub fn quadrant(&self) -> Quadrant {
        // Constructor guarantees a valid quadrant digit.
        Quadrant::from_digit(self.0 / 10).unwrap_or(Quadrant::UpperRight)
    }

    pub fn jaw(&self) -> Jaw {
        self.quadrant().jaw()
    }

    /// Index within the quadrant's arch-ordered sequence
    /// (0 central incisor .. 7 third molar).
    pub fn arch_index(&self) -> u8 {
        self.0 % 10 - 1
    }

    /// Quadrant-relative Palmer notation label (1-8, display only).
    pub fn palmer(&self) -> u8 {
        self.0 % 10
    }

    /// All 32 positions in chart order: upper arch from the patient's
    /// right third molar across the midline, then the lower arch the
    /// same way.
    pub fn all() -> impl Iterator<Item = Position> {
        let upper_right = (1..=8).rev().map(|t| Position(10 + t));
        let upper_left = (1..=8).map(|t| Position(20 + t));
        let lower_right = (1..=8).rev().map(|t| Position(40 + t));
        let lower_left = (1..=8).map(|t| Position(30 + t));
        upper_right
            .chain(upper_left)
            .chain(lower_right)
            .chain(lower_left)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Position {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Position::new(value)
    }
}

impl serde::Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fdi = u8::deserialize(deserializer)?;
        Position::new(fdi).map_err(serde::de::Error::custom)
    }
}

/// Whether two positions share a jaw. Cross-jaw connections are invalid.
pub fn same_jaw(a: Position, b: Position) -> bool {
    a.jaw() == b.jaw()
}

/// The adjacency relation over the chart.
///
/// True iff `a` and `b` are consecutive within one quadrant's arch-ordered
/// sequence, or form one of the fixed cross-midline pairs.
pub fn is_adjacent(a: Position, b: Position) -> bool {
    if a == b {
        return false;
    }
    if a.quadrant() == b.quadrant() {
        return a.arch_index().abs_diff(b.arch_index()) == 1;
    }
    CROSS_MIDLINE_PAIRS
        .iter()
        .any(|&(x, y)| (a.fdi(), b.fdi()) == (x, y) || (a.fdi(), b.fdi()) == (y, x))
}

/// Whether an ordered member sequence forms one contiguous adjacency chain
/// with no repeats. Singleton sequences are trivially contiguous; empty
/// sequences are not chains.
pub fn is_contiguous_chain(members: &[Position]) -> bool {
    if members.is_empty() {
        return false;
    }
    for window in members.windows(2) {
        if !is_adjacent(window[0], window[1]) {
            return false;
        }
    }
    let mut seen = std::collections::BTreeSet::new();
    members.iter().all(|p| seen.insert(*p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fdi: u8) -> Position {
        Position::new(fdi).unwrap()
    }

    #[test]
    fn rejects_unknown_ids() {
        assert!(Position::new(0).is_err());
        assert!(Position::new(10).is_err());
        assert!(Position::new(19).is_err());
        assert!(Position::new(50).is_err());
        assert!(Position::new(29).is_err());
    }

    #[test]
    fn quadrant_and_jaw_derivation() {
        assert_eq!(pos(18).quadrant(), Quadrant::UpperRight);
        assert_eq!(pos(25).quadrant(), Quadrant::UpperLeft);
        assert_eq!(pos(33).quadrant(), Quadrant::LowerLeft);
        assert_eq!(pos(41).quadrant(), Quadrant::LowerRight);
        assert_eq!(pos(14).jaw(), Jaw::Upper);
        assert_eq!(pos(44).jaw(), Jaw::Lower);
    }

    #[test]
    fn palmer_is_quadrant_relative() {
        assert_eq!(pos(11).palmer(), 1);
        assert_eq!(pos(28).palmer(), 8);
        assert_eq!(pos(36).palmer(), 6);
    }

    #[test]
    fn consecutive_in_quadrant_are_adjacent() {
        assert!(is_adjacent(pos(17), pos(18)));
        assert!(is_adjacent(pos(18), pos(17)));
        assert!(is_adjacent(pos(11), pos(12)));
        assert!(!is_adjacent(pos(16), pos(18)));
        assert!(!is_adjacent(pos(14), pos(14)));
    }

    #[test]
    fn cross_midline_pairs() {
        assert!(is_adjacent(pos(11), pos(21)));
        assert!(is_adjacent(pos(21), pos(11)));
        assert!(is_adjacent(pos(31), pos(41)));
        assert!(is_adjacent(pos(32), pos(42)));
        assert!(!is_adjacent(pos(12), pos(22)));
        assert!(!is_adjacent(pos(33), pos(43)));
    }

    #[test]
    fn cross_jaw_is_never_adjacent() {
        assert!(!is_adjacent(pos(11), pos(41)));
        assert!(!is_adjacent(pos(21), pos(31)));
        assert!(!same_jaw(pos(11), pos(41)));
    }

    #[test]
    fn chain_contiguity() {
        let chain: Vec<Position> = [18, 17, 16].iter().map(|&f| pos(f)).collect();
        assert!(is_contiguous_chain(&chain));
        let gap: Vec<Position> = [18, 16].iter().map(|&f| pos(f)).collect();
        assert!(!is_contiguous_chain(&gap));
        let repeat: Vec<Position> = [17, 18, 17].iter().map(|&f| pos(f)).collect();
        assert!(!is_contiguous_chain(&repeat));
        assert!(is_contiguous_chain(&[pos(14)]));
        assert!(!is_contiguous_chain(&[]));
    }

    #[test]
    fn all_enumerates_32_positions() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 32);
        assert_eq!(all[0], pos(18));
        assert_eq!(all[7], pos(11));
        assert_eq!(all[8], pos(21));
        assert_eq!(all[16], pos(48));
        assert_eq!(all[31], pos(38));
    }
}
