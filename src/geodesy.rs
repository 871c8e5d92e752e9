//! WGS84 geodesy primitives. Pure functions over coordinate sequences,
//! implemented on top of `geo`'s Haversine model rather than hand-rolled
//! trigonometry, so rounding matches an ecosystem-standard implementation.

use geo::{Bearing, Closest, Distance, Haversine, HaversineClosestPoint, InterpolatableLine, Point};

use crate::model::{Coordinate, Length};

fn to_point(c: Coordinate) -> Point {
    Point::new(c.lon, c.lat)
}

fn from_point(p: Point) -> Coordinate {
    Coordinate::new(p.x(), p.y())
}

fn segment_point_at_ratio(a: Coordinate, b: Coordinate, ratio: f64) -> Coordinate {
    let line = geo::Line::new(to_point(a), to_point(b));
    let point = line
        .point_at_ratio_from_start(&Haversine, ratio)
        .unwrap_or_else(|| if ratio <= 0.5 { to_point(a) } else { to_point(b) });
    from_point(point)
}

/// Great-circle distance between two coordinates, in meters.
pub fn distance(a: Coordinate, b: Coordinate) -> Length {
    Length::from_meters(Haversine.distance(to_point(a), to_point(b)))
}

/// Forward azimuth from `a` to `b`, in degrees `[0, 360)`.
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.bearing(to_point(a), to_point(b))
}

/// Total great-circle length of a polyline. Test-only: library code
/// never needs to recompute a line's length from its geometry, since
/// `Map::get_line` already hands back an authoritative `Length`.
#[cfg(test)]
fn path_length(polyline: &[Coordinate]) -> Length {
    polyline
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum()
}

/// Walks `d` meters from the start of `polyline` along its segments and
/// returns the coordinate reached. If `d` exceeds the polyline's length,
/// returns its last vertex. An empty polyline has no projection.
pub fn project_along_path(polyline: &[Coordinate], d: Length) -> Option<Coordinate> {
    let last = *polyline.last()?;
    if polyline.len() == 1 {
        return Some(last);
    }

    let mut remaining = d.meters().max(0.0);
    for window in polyline.windows(2) {
        let (a, b) = (window[0], window[1]);
        let segment_length = distance(a, b).meters();
        if segment_length <= f64::EPSILON {
            continue;
        }
        if remaining <= segment_length {
            return Some(segment_point_at_ratio(a, b, remaining / segment_length));
        }
        remaining -= segment_length;
    }
    Some(last)
}

/// Perpendicularly projects `point` onto `polyline`, returning the
/// distance from the polyline's start to the closest point, and the
/// perpendicular distance from `point` to that closest point. `None` for
/// a degenerate (fewer than two vertices) polyline.
pub fn project_point_onto_path(polyline: &[Coordinate], point: Coordinate) -> Option<(Length, Length)> {
    if polyline.len() < 2 {
        return None;
    }

    let query = to_point(point);
    let mut accumulated = 0.0;
    let mut best: Option<(f64, f64)> = None;

    for window in polyline.windows(2) {
        let (a, b) = (window[0], window[1]);
        let segment = geo::Line::new(to_point(a), to_point(b));
        let closest = match segment.haversine_closest_point(&query) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => p,
            Closest::Indeterminate => to_point(a),
        };

        let distance_along = accumulated + Haversine.distance(to_point(a), closest);
        let perpendicular = Haversine.distance(query, closest);

        if best.is_none_or(|(_, best_perp)| perpendicular < best_perp) {
            best = Some((distance_along, perpendicular));
        }

        accumulated += Haversine.distance(to_point(a), to_point(b));
    }

    best.map(|(along, perp)| (Length::from_meters(along), Length::from_meters(perp)))
}

/// Splits `polyline` at the point `d` meters from its start into the
/// sub-polyline before that point and the one after it. Either half is
/// `None` when `d` is exactly at the start or end (or beyond the end) of
/// the polyline.
pub fn split_path_at(
    polyline: &[Coordinate],
    d: Length,
) -> (Option<Vec<Coordinate>>, Option<Vec<Coordinate>>) {
    if polyline.len() < 2 {
        return (None, None);
    }

    let mut remaining = d.meters().max(0.0);
    let mut before = Vec::with_capacity(polyline.len());
    before.push(polyline[0]);

    for (i, window) in polyline.windows(2).enumerate() {
        let (a, b) = (window[0], window[1]);
        let segment_length = distance(a, b).meters();
        if segment_length <= f64::EPSILON {
            continue;
        }
        if remaining < segment_length {
            let split_point = segment_point_at_ratio(a, b, remaining / segment_length);
            before.push(split_point);
            let mut after = vec![split_point];
            after.extend_from_slice(&polyline[i + 1..]);
            let before = if before.len() < 2 { None } else { Some(before) };
            let after = if after.len() < 2 { None } else { Some(after) };
            return (before, after);
        }
        remaining -= segment_length;
        before.push(b);
    }

    // `d` reaches or exceeds the polyline's full length.
    (Some(before), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    #[test]
    fn project_along_path_clamps_past_the_end() {
        let polyline = [c(13.0, 52.0), c(13.01, 52.0)];
        let end = *polyline.last().unwrap();
        let projected = project_along_path(&polyline, Length::from_meters(1_000_000.0)).unwrap();
        assert!(distance(projected, end).meters() < 1.0);
    }

    #[test]
    fn project_along_path_at_zero_returns_start() {
        let polyline = [c(13.0, 52.0), c(13.01, 52.0)];
        let start = polyline[0];
        let projected = project_along_path(&polyline, Length::ZERO).unwrap();
        assert!(distance(projected, start).meters() < 1.0);
    }

    #[test]
    fn split_path_at_zero_has_no_before() {
        let polyline = vec![c(13.0, 52.0), c(13.01, 52.0), c(13.02, 52.0)];
        let (before, after) = split_path_at(&polyline, Length::ZERO);
        assert!(before.is_none());
        assert_eq!(after.unwrap().len(), 3);
    }

    #[test]
    fn split_path_at_end_has_no_after() {
        let polyline = vec![c(13.0, 52.0), c(13.01, 52.0), c(13.02, 52.0)];
        let total = path_length(&polyline);
        let (before, after) = split_path_at(&polyline, total);
        assert_eq!(before.unwrap().len(), 3);
        assert!(after.is_none());
    }
}
