//! Constrained shortest-path search between two chosen candidates: a
//! binary heap ordered by accumulated length with a custom reversed `Ord`
//! for min-heap use, stopping as soon as the destination node is popped
//! and rejecting (rather than merely ignoring) lines whose FRC exceeds
//! the ceiling during relaxation.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cancel::CancellationToken;
use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::map::Map;
use crate::model::{Frc, Length};
use crate::observer::RouteRejection;
use crate::route::{PointOnLine, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry<NodeId> {
    length: Length,
    node: NodeId,
}

impl<NodeId: Ord> Ord for HeapEntry<NodeId> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest length
        // first; ties broken by node id for determinism.
        other
            .length
            .cmp(&self.length)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<NodeId: Ord> PartialOrd for HeapEntry<NodeId> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra from `origin` to `destination`, traversing only lines with
/// `frc <= lowest_frc`, pruning the frontier at `max_length`. Returns the
/// ordered list of lines traversed (empty if `origin == destination`), or
/// `None` if the destination is unreachable within the bound.
fn shortest_path<M: Map>(
    map: &M,
    origin: M::NodeId,
    destination: M::NodeId,
    lowest_frc: Frc,
    max_length: Length,
    cancel: &dyn CancellationToken,
) -> Result<Option<Vec<crate::map::Line<M::LineId, M::NodeId>>>, DecodeError<M::Error>> {
    if origin == destination {
        return Ok(Some(Vec::new()));
    }

    debug!(?origin, ?destination, ?lowest_frc, "computing shortest path");

    let mut distances: FxHashMap<M::NodeId, Length> = FxHashMap::default();
    let mut previous: FxHashMap<M::NodeId, crate::map::Line<M::LineId, M::NodeId>> = FxHashMap::default();
    let mut heap = BinaryHeap::new();

    distances.insert(origin, Length::ZERO);
    heap.push(HeapEntry {
        length: Length::ZERO,
        node: origin,
    });

    while let Some(HeapEntry { length, node }) = heap.pop() {
        if cancel.is_cancelled() {
            return Err(DecodeError::Cancelled);
        }

        if node == destination {
            let mut path = Vec::new();
            let mut cursor = destination;
            while let Some(line) = previous.get(&cursor) {
                cursor = line.start_node;
                path.push(line.clone());
            }
            path.reverse();
            return Ok(Some(path));
        }

        if let Some(&best) = distances.get(&node)
            && length > best
        {
            continue;
        }

        for line in map.outgoing_lines(node).map_err(DecodeError::Map)? {
            if line.frc > lowest_frc {
                continue;
            }

            let candidate_length = Length::from_meters(length.meters() + line.length.meters());
            if candidate_length > max_length {
                continue;
            }

            let is_shorter = distances
                .get(&line.end_node)
                .is_none_or(|&known| candidate_length < known);

            if is_shorter {
                distances.insert(line.end_node, candidate_length);
                previous.insert(line.end_node, line.clone());
                heap.push(HeapEntry {
                    length: candidate_length,
                    node: line.end_node,
                });
            }
        }
    }

    Ok(None)
}

/// The outcome of a single candidate-pair route search: an admissible
/// route, or one of the two reasons [`crate::observer::Observer`] is told
/// about when no admissible route exists.
pub enum RouteOutcome<LineId, NodeId> {
    Admissible(Route<LineId, NodeId>),
    Rejected(RouteRejection),
}

/// Resolves the route for one candidate pair: the in-line shortcut when both
/// candidates sit on the same line, otherwise a bounded Dijkstra search.
/// Returns a rejection reason (not an error) when no admissible route
/// exists, so the caller can backtrack.
pub fn find_route<M: Map>(
    map: &M,
    start: &PointOnLine<M::LineId, M::NodeId>,
    end: &PointOnLine<M::LineId, M::NodeId>,
    target_distance: Length,
    lowest_frc: Frc,
    config: &DecoderConfig,
    cancel: &dyn CancellationToken,
) -> Result<RouteOutcome<M::LineId, M::NodeId>, DecodeError<M::Error>> {
    let (lower, upper) = config.distance_window(target_distance);

    if start.line.id == end.line.id && end.relative_offset >= start.relative_offset {
        let route = Route::same_line(start.line.clone(), start.relative_offset, end.relative_offset);
        let length = route.length();
        return Ok(if length >= lower && length <= upper {
            RouteOutcome::Admissible(route)
        } else {
            debug!(length = length.meters(), lower = lower.meters(), upper = upper.meters(), "same-line route out of tolerance");
            RouteOutcome::Rejected(RouteRejection::OutOfTolerance)
        });
    }

    let start_remaining = Length::from_meters(start.line.length.meters() * (1.0 - start.relative_offset));
    let end_remaining = Length::from_meters(end.line.length.meters() * end.relative_offset);
    let max_path_length = Length::from_meters((upper.meters() - start_remaining.meters() - end_remaining.meters()).max(0.0));

    let Some(path) = shortest_path(map, start.line.end_node, end.line.start_node, lowest_frc, max_path_length, cancel)?
    else {
        debug!("destination unreachable within the distance window");
        return Ok(RouteOutcome::Rejected(RouteRejection::Unreachable));
    };

    let route = Route {
        start: start.clone(),
        intermediate: path,
        end: end.clone(),
    };
    let length = route.length();

    Ok(if length >= lower && length <= upper {
        RouteOutcome::Admissible(route)
    } else {
        debug!(length = length.meters(), lower = lower.meters(), upper = upper.meters(), "route out of tolerance");
        RouteOutcome::Rejected(RouteRejection::OutOfTolerance)
    })
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::map::{Line, Node};
    use crate::model::{Coordinate, Fow};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct NodeId(u32);
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct LineId(u32);

    struct LineMap {
        lines: Vec<Line<LineId, NodeId>>,
    }

    impl Map for LineMap {
        type LineId = LineId;
        type NodeId = NodeId;
        type Error = Infallible;

        fn get_line(&self, id: Self::LineId) -> Result<Option<Line<Self::LineId, Self::NodeId>>, Self::Error> {
            Ok(self.lines.iter().find(|l| l.id == id).cloned())
        }

        fn get_lines(&self) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
            Ok(self.lines.clone())
        }

        fn find_nodes_close_to(&self, _coordinate: Coordinate, _radius: Length) -> Result<Vec<Node<Self::NodeId>>, Self::Error> {
            Ok(Vec::new())
        }

        fn find_lines_close_to(&self, _coordinate: Coordinate, _radius: Length) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
            Ok(Vec::new())
        }

        fn outgoing_lines(&self, node: Self::NodeId) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
            Ok(self.lines.iter().filter(|l| l.start_node == node).cloned().collect())
        }

        fn incoming_lines(&self, node: Self::NodeId) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
            Ok(self.lines.iter().filter(|l| l.end_node == node).cloned().collect())
        }
    }

    fn line(id: u32, start: u32, end: u32, length: f64, frc: Frc) -> Line<LineId, NodeId> {
        Line {
            id: LineId(id),
            length: Length::from_meters(length),
            fow: Fow::SingleCarriageway,
            frc,
            geometry: vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)],
            start_node: NodeId(start),
            end_node: NodeId(end),
        }
    }

    #[test]
    fn same_origin_and_destination_is_a_zero_length_path() {
        let map = LineMap {
            lines: vec![line(1, 0, 1, 100.0, Frc::Frc3)],
        };
        let path = shortest_path(&map, NodeId(0), NodeId(0), Frc::Frc7, Length::from_meters(1000.0), &()).unwrap();
        assert_eq!(path.unwrap().len(), 0);
    }

    #[test]
    fn unreachable_destination_is_none() {
        let map = LineMap {
            lines: vec![line(1, 0, 1, 100.0, Frc::Frc3)],
        };
        let path = shortest_path(&map, NodeId(0), NodeId(2), Frc::Frc7, Length::from_meters(1000.0), &()).unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn frc_ceiling_excludes_a_shortcut() {
        let map = LineMap {
            lines: vec![
                line(1, 0, 2, 100.0, Frc::Frc5),
                line(2, 0, 3, 100.0, Frc::Frc2),
                line(3, 3, 2, 100.0, Frc::Frc2),
            ],
        };
        let path = shortest_path(&map, NodeId(0), NodeId(2), Frc::Frc3, Length::from_meters(1000.0), &())
            .unwrap()
            .unwrap();
        assert_eq!(path.iter().map(|l| l.id).collect::<Vec<_>>(), vec![LineId(2), LineId(3)]);
    }

    #[test]
    fn max_length_prunes_an_otherwise_reachable_destination() {
        let map = LineMap {
            lines: vec![line(1, 0, 1, 5000.0, Frc::Frc3)],
        };
        let path = shortest_path(&map, NodeId(0), NodeId(1), Frc::Frc7, Length::from_meters(10.0), &()).unwrap();
        assert!(path.is_none());
    }
}
