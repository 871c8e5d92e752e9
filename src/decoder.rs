//! Line-location decoding: orchestrates per-LRP candidate lists,
//! backtracks across candidate combinations on routing failure, stitches
//! per-pair routes, and trims by the reference's offsets.

use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::candidates::{Candidate, find_candidates};
use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::map::{Line, Map};
use crate::model::{Length, LineLocationReference};
use crate::observer::Observer;
use crate::path_search::{RouteOutcome, find_route};
use crate::route::{PointOnLine, Route};

/// The decoded result of a line location: a start point, the whole lines
/// traversed in between, and an end point.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLocation<LineId, NodeId> {
    pub start: PointOnLine<LineId, NodeId>,
    pub intermediate: Vec<Line<LineId, NodeId>>,
    pub end: PointOnLine<LineId, NodeId>,
}

/// Decodes a line location reference against `map`.
pub fn decode_line<M: Map>(
    map: &M,
    reference: &LineLocationReference,
    config: &DecoderConfig,
    observer: &mut dyn Observer<M::LineId, M::NodeId>,
    cancel: &dyn CancellationToken,
) -> Result<LineLocation<M::LineId, M::NodeId>, DecodeError<M::Error>> {
    if reference.points.len() < 2 || reference.positive_offset + reference.negative_offset >= 1.0 {
        return Err(DecodeError::InvalidReference);
    }

    debug!(lrps = reference.points.len(), "decoding line location");

    let routes = resolve_routes(map, &reference.points, config, observer, cancel)?;
    let combined = Route::concat(routes);

    let result = trim(&combined, reference.positive_offset, reference.negative_offset);

    match &result {
        Ok(_) => observer.decode_succeeded(),
        Err(_) => observer.decode_failed(),
    }

    result
}

/// Builds each LRP's candidate list and resolves an admissible route for
/// every consecutive pair, backtracking across candidate choices on
/// failure. Realized as an explicit odometer over per-LRP candidate
/// cursors rather than recursion, so backtracking never grows the call
/// stack with the number of LRPs.
fn resolve_routes<M: Map>(
    map: &M,
    lrps: &[crate::model::Lrp],
    config: &DecoderConfig,
    observer: &mut dyn Observer<M::LineId, M::NodeId>,
    cancel: &dyn CancellationToken,
) -> Result<Vec<Route<M::LineId, M::NodeId>>, DecodeError<M::Error>> {
    let n = lrps.len();

    let candidates: Vec<Vec<Candidate<M::LineId, M::NodeId>>> = lrps
        .iter()
        .enumerate()
        .map(|(index, lrp)| find_candidates(map, lrp, index, index == n - 1, config, observer))
        .collect::<Result<_, _>>()?;

    for (index, list) in candidates.iter().enumerate() {
        if list.is_empty() {
            return Err(DecodeError::NoCandidates(index));
        }
    }

    let counts: Vec<usize> = candidates.iter().map(Vec::len).collect();
    let mut chosen = vec![0usize; n];
    let mut routes: Vec<Option<Route<M::LineId, M::NodeId>>> = vec![None; n - 1];
    let mut pair = 0usize;

    loop {
        if cancel.is_cancelled() {
            return Err(DecodeError::Cancelled);
        }

        let from = &candidates[pair][chosen[pair]].point;
        let to = &candidates[pair + 1][chosen[pair + 1]].point;
        let target_distance = lrps[pair].distance_to_next;
        let lowest_frc = lrps[pair].lowest_frc_to_next;

        match find_route(map, from, to, target_distance, lowest_frc, config, cancel)? {
            RouteOutcome::Admissible(route) => {
                debug!(pair, length = route.length().meters(), "candidate pair route found");
                observer.route_found(pair, &route);
                routes[pair] = Some(route);

                if pair == n - 2 {
                    return Ok(routes.into_iter().map(|r| r.expect("all pairs resolved")).collect());
                }

                pair += 1;
                chosen[pair + 1] = 0;
            }
            RouteOutcome::Rejected(reason) => {
                warn!(pair, ?reason, "candidate pair route rejected, backtracking");
                observer.route_rejected(pair, reason);

                loop {
                    chosen[pair + 1] += 1;
                    if chosen[pair + 1] < counts[pair + 1] {
                        break;
                    }
                    chosen[pair + 1] = 0;

                    if pair == 0 {
                        chosen[0] += 1;
                        if chosen[0] >= counts[0] {
                            return Err(DecodeError::NoRoute {
                                from_index: 0,
                                to_index: n - 1,
                            });
                        }
                        break;
                    }

                    pair -= 1;
                }
            }
        }
    }
}

/// Trims the concatenated route by the reference's positive and negative
/// offset fractions.
fn trim<LineId: Copy + PartialEq, NodeId: Copy, E: std::error::Error>(
    combined: &Route<LineId, NodeId>,
    positive_offset: f64,
    negative_offset: f64,
) -> Result<LineLocation<LineId, NodeId>, DecodeError<E>> {
    let total = combined.length();
    let pos_m = Length::from_meters(total.meters() * positive_offset);
    let neg_m = Length::from_meters(total.meters() * negative_offset);

    if pos_m.meters() + neg_m.meters() >= total.meters() {
        return Err(DecodeError::EmptyLocation);
    }

    let (start_line, start_offset) = combined.project_at(pos_m)?;
    let end_distance = Length::from_meters(total.meters() - neg_m.meters());
    let (end_line, end_offset) = combined.project_at(end_distance)?;

    let start = PointOnLine {
        relative_offset: (start_offset.meters() / start_line.length.meters().max(f64::EPSILON)).clamp(0.0, 1.0),
        line: start_line.clone(),
    };
    let end = PointOnLine {
        relative_offset: (end_offset.meters() / end_line.length.meters().max(f64::EPSILON)).clamp(0.0, 1.0),
        line: end_line.clone(),
    };

    let intermediate = if start_line.id == end_line.id {
        Vec::new()
    } else {
        let mut lines = Vec::new();
        let mut collecting = false;
        for line in std::iter::once(&combined.start.line)
            .chain(combined.intermediate.iter())
            .chain(std::iter::once(&combined.end.line))
        {
            if line.id == start_line.id {
                collecting = true;
                continue;
            }
            if line.id == end_line.id {
                break;
            }
            if collecting {
                lines.push(line.clone());
            }
        }
        lines
    };

    Ok(LineLocation {
        start,
        intermediate,
        end,
    })
}
