//! Chart geometry: where each position sits in logical pixels.

use std::collections::BTreeMap;

use resto_model::Position;

/// A point in logical pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f32,
    pub y: f32,
}

impl ChartPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_squared(&self, other: ChartPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Horizontal spacing of the default layout. Wider than twice the
/// proximity radius so neighbouring hit circles never overlap.
const DEFAULT_SPACING: f32 = 44.0;
const UPPER_ROW_Y: f32 = 60.0;
const LOWER_ROW_Y: f32 = 220.0;

/// Maps every chart position to a logical-pixel point.
///
/// The default layout places the two arches as rows in chart order
/// (patient's right to left). Custom layouts can be supplied for other
/// chart renderings.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    points: BTreeMap<Position, ChartPoint>,
}

impl Default for ChartLayout {
    fn default() -> Self {
        let mut points = BTreeMap::new();
        for (index, position) in Position::all().enumerate() {
            let column = (index % 16) as f32;
            let y = if index < 16 { UPPER_ROW_Y } else { LOWER_ROW_Y };
            points.insert(
                position,
                ChartPoint::new(DEFAULT_SPACING * (column + 1.0), y),
            );
        }
        Self { points }
    }
}

impl ChartLayout {
    /// Build a layout from explicit coordinates. Positions absent from the
    /// map are simply unreachable by pointer gestures.
    pub fn from_points(points: BTreeMap<Position, ChartPoint>) -> Self {
        Self { points }
    }

    pub fn point_of(&self, position: Position) -> Option<ChartPoint> {
        self.points.get(&position).copied()
    }

    /// Nearest position within `radius` of `point`, skipping any position
    /// for which `exclude` returns true. Ties resolve to the first in
    /// chart order.
    pub fn nearest_within<F>(&self, point: ChartPoint, radius: f32, exclude: F) -> Option<Position>
    where
        F: Fn(Position) -> bool,
    {
        let radius_squared = radius * radius;
        let mut best: Option<(Position, f32)> = None;
        for (&position, &location) in &self.points {
            if exclude(position) {
                continue;
            }
            let d = point.distance_squared(location);
            if d > radius_squared {
                continue;
            }
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((position, d));
            }
        }
        best.map(|(position, _)| position)
    }

    /// Hit-test without exclusions.
    pub fn hit_test(&self, point: ChartPoint, radius: f32) -> Option<Position> {
        self.nearest_within(point, radius, |_| false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fdi: u8) -> Position {
        Position::new(fdi).unwrap()
    }

    #[test]
    fn default_layout_covers_all_positions() {
        let layout = ChartLayout::default();
        for position in Position::all() {
            assert!(layout.point_of(position).is_some(), "missing {position}");
        }
    }

    #[test]
    fn hit_test_finds_nearest_within_radius() {
        let layout = ChartLayout::default();
        let at_18 = layout.point_of(pos(18)).unwrap();
        let near = ChartPoint::new(at_18.x + 5.0, at_18.y - 3.0);
        assert_eq!(layout.hit_test(near, 20.0), Some(pos(18)));

        let far = ChartPoint::new(at_18.x, at_18.y + 60.0);
        assert_eq!(layout.hit_test(far, 20.0), None);
    }

    #[test]
    fn exclusion_skips_already_included() {
        let layout = ChartLayout::default();
        let at_17 = layout.point_of(pos(17)).unwrap();
        let hit = layout.nearest_within(at_17, 20.0, |p| p == pos(17));
        assert_eq!(hit, None);
    }
}
