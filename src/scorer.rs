//! Candidate scoring: FOW stand-in matrix, FRC distance, geographic
//! decay, and a bearing probe, combined as a weighted sum. The bearing
//! probe walks the zero-based sub-polyline produced by
//! [`crate::route::PointOnLine::split`] (reversed for the last LRP,
//! whose expected bearing points back along the approach).

use crate::config::{DecoderConfig, ScoreWeights};
use crate::geodesy;
use crate::model::{Fow, Frc, Length, Lrp, Score};
use crate::route::PointOnLine;

/// `FOW_STAND_IN[wanted][actual]`: how well a candidate's form-of-way
/// fits as a replacement for the expected one, per the OpenLR form-of-way
/// stand-in table. Row/column order follows [`Fow`]'s declaration order.
pub const FOW_STAND_IN: [[f64; 8]; 8] = [
    [0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50], // Undefined
    [0.50, 1.00, 0.75, 0.00, 0.00, 0.00, 0.00, 0.00], // Motorway
    [0.50, 0.75, 1.00, 0.75, 0.50, 0.00, 0.00, 0.00], // MultipleCarriageway
    [0.50, 0.00, 0.75, 1.00, 0.50, 0.50, 0.00, 0.00], // SingleCarriageway
    [0.50, 0.00, 0.50, 0.50, 1.00, 0.50, 0.00, 0.00], // Roundabout
    [0.50, 0.00, 0.00, 0.50, 0.50, 1.00, 0.00, 0.00], // TrafficSquare
    [0.50, 0.00, 0.00, 0.00, 0.00, 0.00, 1.00, 0.00], // Sliproad
    [0.50, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 1.00], // Other
];

pub fn score_fow(wanted: Fow, actual: Fow) -> f64 {
    FOW_STAND_IN[wanted.as_usize()][actual.as_usize()]
}

pub fn score_frc(wanted: Frc, actual: Frc) -> f64 {
    (1.0 - (actual.as_u8() as f64 - wanted.as_u8() as f64).abs() / 7.0).clamp(0.0, 1.0)
}

/// `1 - distance/radius` if within `radius`, else `0`. The `is_last_lrp`
/// flag is accepted but intentionally unused here; it exists so an
/// alternative scoring strategy could special-case the last LRP without
/// changing this function's signature.
pub fn score_geolocation(wanted_coord: crate::model::Coordinate, candidate: crate::model::Coordinate, radius: Length, _is_last_lrp: bool) -> f64 {
    let dist = geodesy::distance(wanted_coord, candidate).meters();
    let radius = radius.meters();
    if dist < radius { 1.0 - dist / radius } else { 0.0 }
}

/// Similarity of two angles, in degrees: `1.0` at `0°` difference, `0.0`
/// at `180°`, symmetric modulo 360°.
pub fn score_angle_difference(angle1: f64, angle2: f64) -> f64 {
    let difference = ((angle1 - angle2).abs() + 180.0) % 360.0 - 180.0;
    1.0 - difference.abs() / 180.0
}

/// Scores the difference between the LRP's expected bearing and the
/// candidate's actual forward bearing, probed `bearing_probe_distance`
/// meters ahead along the relevant sub-polyline.
pub fn score_bearing<LineId: Copy, NodeId: Copy>(
    wanted: &Lrp,
    candidate: &PointOnLine<LineId, NodeId>,
    is_last_lrp: bool,
    bearing_probe_distance: Length,
) -> f64 {
    let (before, after) = candidate.split();

    let coordinates = if is_last_lrp {
        match before {
            Some(mut coords) => {
                coords.reverse();
                coords
            }
            None => return 0.0,
        }
    } else {
        match after {
            Some(coords) => coords,
            None => return 0.0,
        }
    };

    let Some(bearing_point) = geodesy::project_along_path(&coordinates, bearing_probe_distance) else {
        return 0.0;
    };

    let actual_bearing = geodesy::bearing(candidate.position(), bearing_point);
    score_angle_difference(wanted.bearing, actual_bearing)
}

/// The weighted sum of the four sub-scores for one LRP/candidate pair.
pub fn score_candidate<LineId: Copy, NodeId: Copy>(
    wanted: &Lrp,
    candidate: &PointOnLine<LineId, NodeId>,
    is_last_lrp: bool,
    config: &DecoderConfig,
) -> Score {
    let ScoreWeights {
        fow,
        frc,
        geographic,
        bearing,
    } = config.score_weights;

    let fow_score = score_fow(wanted.fow, candidate.line.fow);
    let frc_score = score_frc(wanted.frc, candidate.line.frc);
    let geo_score = score_geolocation(wanted.coordinate, candidate.position(), config.search_radius, is_last_lrp);
    let bearing_score = score_bearing(wanted, candidate, is_last_lrp, config.bearing_probe_distance);

    tracing::trace!(fow_score, frc_score, geo_score, bearing_score, "scored candidate");

    Score::new(fow * fow_score + frc * frc_score + geographic * geo_score + bearing * bearing_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fow_stand_in_diagonal_is_one() {
        for fow in [
            Fow::Undefined,
            Fow::Motorway,
            Fow::MultipleCarriageway,
            Fow::SingleCarriageway,
            Fow::Roundabout,
            Fow::TrafficSquare,
            Fow::Sliproad,
            Fow::Other,
        ] {
            assert_eq!(score_fow(fow, fow), 1.0);
        }
    }

    #[test]
    fn fow_stand_in_undefined_row_and_column_are_half() {
        for actual in 0..8u8 {
            assert_eq!(FOW_STAND_IN[0][actual as usize], 0.5);
            assert_eq!(FOW_STAND_IN[actual as usize][0], 0.5);
        }
    }

    #[test]
    fn frc_score_matches_reference_corners() {
        assert_eq!(score_frc(Frc::Frc3, Frc::Frc3), 1.0);
        assert_eq!(score_frc(Frc::Frc0, Frc::Frc7), 0.0);
    }

    #[test]
    fn angle_difference_matches_reference_corners() {
        assert_eq!(score_angle_difference(45.0, 45.0), 1.0);
        assert_eq!(score_angle_difference(0.0, 180.0), 0.0);
        assert_eq!(score_angle_difference(350.0, 10.0), score_angle_difference(10.0, 350.0));
    }

    #[test]
    fn geolocation_score_is_linear_in_distance() {
        let a = crate::model::Coordinate::new(13.0, 52.0);
        let b = crate::model::Coordinate::new(13.0, 52.0);
        assert_eq!(score_geolocation(a, b, Length::from_meters(100.0), false), 1.0);

        let far = crate::model::Coordinate::new(14.0, 52.0);
        assert_eq!(score_geolocation(a, far, Length::from_meters(100.0), false), 0.0);
    }
}
