//! Point-along-line, POI-with-access-point, and geo-coordinate decoders:
//! each resolves its anchor line location first, then walks a fraction
//! of the resolved route's total length to find the final point.

use crate::cancel::CancellationToken;
use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::geodesy;
use crate::map::{Line, Map};
use crate::model::{Coordinate, Length, Orientation, PoiWithAccessPointLocationReference, PointAlongLineLocationReference, SideOfRoad};
use crate::observer::Observer;
use crate::route::Route;

/// A dereferenced point along a line: the line it was located on, its
/// offset in meters from that line's start, and the side-of-road and
/// orientation carried through from the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAlongLine<LineId, NodeId> {
    pub line: Line<LineId, NodeId>,
    pub offset: Length,
    pub side: SideOfRoad,
    pub orientation: Orientation,
}

impl<LineId: Copy, NodeId: Copy> PointAlongLine<LineId, NodeId> {
    /// The geographic coordinate, re-derived from the line's own
    /// geometry — never by re-running the decoder.
    pub fn coordinates(&self) -> Coordinate {
        geodesy::project_along_path(&self.line.geometry, self.offset)
            .unwrap_or_else(|| self.line.start_coordinate())
    }
}

/// A dereferenced point of interest with an access point: the resolved
/// access-point location, plus the POI's own coordinate, carried through
/// unchanged and never snapped to the map.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiWithAccessPoint<LineId, NodeId> {
    pub access_point: PointAlongLine<LineId, NodeId>,
    pub poi: Coordinate,
}

/// Resolves the two-LRP route a point-location reference is anchored to,
/// as an ordinary two-LRP line-location decode with no further trimming.
fn resolve_anchor_route<M: Map>(
    map: &M,
    points: &[crate::model::Lrp; 2],
    config: &DecoderConfig,
    observer: &mut dyn Observer<M::LineId, M::NodeId>,
    cancel: &dyn CancellationToken,
) -> Result<Route<M::LineId, M::NodeId>, DecodeError<M::Error>> {
    let reference = crate::model::LineLocationReference {
        points: points.to_vec(),
        positive_offset: 0.0,
        negative_offset: 0.0,
    };
    let location = crate::decoder::decode_line(map, &reference, config, observer, cancel)?;
    Ok(Route {
        start: location.start,
        intermediate: location.intermediate,
        end: location.end,
    })
}

/// Walks `d` meters into `route` and returns `(line, offset_in_meters)`.
/// A thin wrapper over [`Route::project_at`] kept here so callers read
/// the point-decoder's own vocabulary.
fn point_along_route<LineId: Copy + PartialEq, NodeId: Copy, E: std::error::Error>(
    route: &Route<LineId, NodeId>,
    d: Length,
) -> Result<(Line<LineId, NodeId>, Length), DecodeError<E>> {
    route.project_at(d)
}

pub fn decode_point_along_line<M: Map>(
    map: &M,
    reference: &PointAlongLineLocationReference,
    config: &DecoderConfig,
    observer: &mut dyn Observer<M::LineId, M::NodeId>,
    cancel: &dyn CancellationToken,
) -> Result<PointAlongLine<M::LineId, M::NodeId>, DecodeError<M::Error>> {
    let route = resolve_anchor_route(map, &reference.points, config, observer, cancel)?;
    let absolute_offset = Length::from_meters(route.length().meters() * reference.positive_offset);
    let (line, offset) = point_along_route(&route, absolute_offset)?;

    Ok(PointAlongLine {
        line,
        offset,
        side: reference.side,
        orientation: reference.orientation,
    })
}

pub fn decode_poi_with_access_point<M: Map>(
    map: &M,
    reference: &PoiWithAccessPointLocationReference,
    config: &DecoderConfig,
    observer: &mut dyn Observer<M::LineId, M::NodeId>,
    cancel: &dyn CancellationToken,
) -> Result<PoiWithAccessPoint<M::LineId, M::NodeId>, DecodeError<M::Error>> {
    let route = resolve_anchor_route(map, &reference.points, config, observer, cancel)?;
    let absolute_offset = Length::from_meters(route.length().meters() * reference.positive_offset);
    let (line, offset) = point_along_route(&route, absolute_offset)?;

    Ok(PoiWithAccessPoint {
        access_point: PointAlongLine {
            line,
            offset,
            side: reference.side,
            orientation: reference.orientation,
        },
        poi: reference.poi,
    })
}

/// Pass-through: a bare coordinate reference returns itself, never
/// touching the map and therefore never failing.
pub fn decode_geo_coordinate(coordinate: Coordinate) -> Coordinate {
    coordinate
}
