//! A small hand-built in-memory map fixture implementing the `Map`
//! trait, using `rstar` for its spatial index.

use std::convert::Infallible;

use geo::{BoundingRect, Closest, Distance, Haversine, HaversineClosestPoint};
use openlr_decoder::{Coordinate, Length, Line, Map, Node};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u32);

struct NodeEntry {
    id: NodeId,
    coordinate: Coordinate,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.coordinate.lon, self.coordinate.lat])
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let query = geo::Point::new(point[0], point[1]);
        let here = geo::Point::new(self.coordinate.lon, self.coordinate.lat);
        Haversine.distance(query, here).powi(2)
    }
}

struct LineEntry {
    id: LineId,
    geometry: geo::LineString,
}

impl RTreeObject for LineEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let rect = self.geometry.bounding_rect().expect("line geometry is never empty");
        AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
    }
}

impl PointDistance for LineEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let query = geo::Point::new(point[0], point[1]);
        match self.geometry.haversine_closest_point(&query) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => Haversine.distance(query, p).powi(2),
            Closest::Indeterminate => f64::INFINITY,
        }
    }
}

pub struct TestMap {
    lines: Vec<Line<LineId, NodeId>>,
    node_tree: RTree<NodeEntry>,
    line_tree: RTree<LineEntry>,
}

impl TestMap {
    pub fn new(lines: Vec<Line<LineId, NodeId>>, nodes: Vec<(NodeId, Coordinate)>) -> Self {
        let node_tree = RTree::bulk_load(
            nodes
                .into_iter()
                .map(|(id, coordinate)| NodeEntry { id, coordinate })
                .collect(),
        );

        let line_tree = RTree::bulk_load(
            lines
                .iter()
                .map(|line| LineEntry {
                    id: line.id,
                    geometry: geo::LineString::from_iter(
                        line.geometry.iter().map(|c| geo::coord! { x: c.lon, y: c.lat }),
                    ),
                })
                .collect(),
        );

        Self {
            lines,
            node_tree,
            line_tree,
        }
    }
}

impl Map for TestMap {
    type LineId = LineId;
    type NodeId = NodeId;
    type Error = Infallible;

    fn get_line(&self, id: Self::LineId) -> Result<Option<Line<Self::LineId, Self::NodeId>>, Self::Error> {
        Ok(self.lines.iter().find(|line| line.id == id).cloned())
    }

    fn get_lines(&self) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
        Ok(self.lines.clone())
    }

    fn find_nodes_close_to(&self, coordinate: Coordinate, radius: Length) -> Result<Vec<Node<Self::NodeId>>, Self::Error> {
        let radius_squared = radius.meters().powi(2);
        Ok(self
            .node_tree
            .locate_within_distance([coordinate.lon, coordinate.lat], radius_squared)
            .map(|entry| Node {
                id: entry.id,
                coordinate: entry.coordinate,
            })
            .collect())
    }

    fn find_lines_close_to(&self, coordinate: Coordinate, radius: Length) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
        let radius_squared = radius.meters().powi(2);
        let ids: Vec<LineId> = self
            .line_tree
            .locate_within_distance([coordinate.lon, coordinate.lat], radius_squared)
            .map(|entry| entry.id)
            .collect();
        Ok(self.lines.iter().filter(|line| ids.contains(&line.id)).cloned().collect())
    }

    fn outgoing_lines(&self, node: Self::NodeId) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
        Ok(self.lines.iter().filter(|line| line.start_node == node).cloned().collect())
    }

    fn incoming_lines(&self, node: Self::NodeId) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error> {
        Ok(self.lines.iter().filter(|line| line.end_node == node).cloned().collect())
    }
}

/// One degree of latitude, in meters, close enough to Berlin's latitude
/// for fixture purposes.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

pub fn north_of(origin: Coordinate, meters: f64) -> Coordinate {
    Coordinate::new(origin.lon, origin.lat + meters / METERS_PER_DEGREE_LAT)
}
