//! Candidate generation: node lookup, perpendicular projection, dedup,
//! scoring, and a descending-score sort.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::map::Map;
use crate::model::Lrp;
use crate::observer::Observer;
use crate::route::PointOnLine;
use crate::scorer::score_candidate;

/// A scored point-on-line attached to one LRP.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<LineId, NodeId> {
    pub point: PointOnLine<LineId, NodeId>,
    pub score: crate::model::Score,
}

/// Enumerates, scores, filters and sorts candidates for one LRP.
pub fn find_candidates<M: Map>(
    map: &M,
    lrp: &Lrp,
    lrp_index: usize,
    is_last_lrp: bool,
    config: &DecoderConfig,
    observer: &mut dyn Observer<M::LineId, M::NodeId>,
) -> Result<Vec<Candidate<M::LineId, M::NodeId>>, DecodeError<M::Error>> {
    debug!(lrp_index, ?lrp.coordinate, radius = config.search_radius.meters(), "finding candidates for LRP");

    let mut seen: FxHashSet<(M::LineId, u64)> = FxHashSet::default();
    let mut points = Vec::new();

    for node in map
        .find_nodes_close_to(lrp.coordinate, config.search_radius)
        .map_err(DecodeError::Map)?
    {
        for line in map.outgoing_lines(node.id).map_err(DecodeError::Map)? {
            if seen.insert((line.id, 0.0f64.to_bits())) {
                points.push(PointOnLine::at_start(line));
            }
        }
        for line in map.incoming_lines(node.id).map_err(DecodeError::Map)? {
            if seen.insert((line.id, 1.0f64.to_bits())) {
                points.push(PointOnLine::at_end(line));
            }
        }
    }

    for line in map
        .find_lines_close_to(lrp.coordinate, config.search_radius)
        .map_err(DecodeError::Map)?
    {
        let Some((distance_along, perpendicular)) =
            crate::geodesy::project_point_onto_path(&line.geometry, lrp.coordinate)
        else {
            continue;
        };
        if perpendicular > config.search_radius {
            continue;
        }
        let relative_offset = (distance_along.meters() / line.length.meters().max(f64::EPSILON)).clamp(0.0, 1.0);
        if seen.insert((line.id, relative_offset.to_bits())) {
            points.push(PointOnLine {
                line,
                relative_offset,
            });
        }
    }

    let mut candidates: Vec<_> = points
        .into_iter()
        .map(|point| {
            let score = score_candidate(lrp, &point, is_last_lrp, config);
            Candidate { point, score }
        })
        .collect();

    candidates.retain(|candidate| {
        let accepted = candidate.score.value() >= config.minimum_candidate_score;
        if accepted {
            observer.candidate_enumerated(lrp_index, &candidate.point, candidate.score);
        } else {
            observer.candidate_rejected(lrp_index, &candidate.point, candidate.score);
        }
        accepted
    });

    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.point.line.id.cmp(&b.point.line.id))
            .then_with(|| a.point.relative_offset.total_cmp(&b.point.relative_offset))
    });

    debug!(lrp_index, accepted = candidates.len(), "candidates ranked for LRP");

    Ok(candidates)
}
