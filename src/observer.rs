//! Non-authoritative decode telemetry: a small set of callback hooks with
//! a no-op default, so callers that don't care about progress pay nothing
//! for it.

use crate::model::Score;
use crate::route::{PointOnLine, Route};

/// Why a candidate-pair route search did not produce an admissible route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRejection {
    /// The graph search never reached the destination node.
    Unreachable,
    /// A path was found but its length fell outside the distance window.
    OutOfTolerance,
}

/// Observes decode progress at the decision points named in the design:
/// candidate enumeration/rejection, per-pair route search, and overall
/// success/failure. Calls must not influence algorithm state.
pub trait Observer<LineId, NodeId> {
    fn candidate_enumerated(&mut self, _lrp_index: usize, _candidate: &PointOnLine<LineId, NodeId>, _score: Score) {}

    fn candidate_rejected(&mut self, _lrp_index: usize, _candidate: &PointOnLine<LineId, NodeId>, _score: Score) {}

    fn route_found(&mut self, _from_lrp_index: usize, _route: &Route<LineId, NodeId>) {}

    fn route_rejected(&mut self, _from_lrp_index: usize, _reason: RouteRejection) {}

    fn decode_succeeded(&mut self) {}

    fn decode_failed(&mut self) {}
}

/// The default observer: every hook is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl<LineId, NodeId> Observer<LineId, NodeId> for NullObserver {}
