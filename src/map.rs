//! The abstract contract over lines and nodes that the decoder uses for
//! candidate enumeration and graph traversal: an associated-type
//! abstraction with its own fallible `Error`, so a reader backed by disk
//! or network storage can surface failures through
//! [`crate::error::DecodeError::Map`] instead of the core silently
//! treating them as "no data".

use std::fmt::Debug;
use std::hash::Hash;

use crate::model::{Coordinate, Fow, Frc, Length};

/// A directed road segment as exposed by the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<LineId, NodeId> {
    pub id: LineId,
    pub length: Length,
    pub fow: Fow,
    pub frc: Frc,
    /// Polyline of coordinates, start to end.
    pub geometry: Vec<Coordinate>,
    pub start_node: NodeId,
    pub end_node: NodeId,
}

impl<LineId: Copy, NodeId: Copy> Line<LineId, NodeId> {
    pub fn start_coordinate(&self) -> Coordinate {
        *self.geometry.first().expect("line geometry is never empty")
    }

    pub fn end_coordinate(&self) -> Coordinate {
        *self.geometry.last().expect("line geometry is never empty")
    }
}

/// A node of the road graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<NodeId> {
    pub id: NodeId,
    pub coordinate: Coordinate,
}

/// A map reader the decoder queries for lines, nodes, and adjacency. The
/// core assumes no particular spatial index; it only requires that radius
/// queries are consistent with the reported coordinates.
pub trait Map {
    type LineId: Debug + Copy + Eq + Ord + Hash;
    type NodeId: Debug + Copy + Eq + Ord + Hash;
    type Error: std::error::Error + 'static;

    fn get_line(&self, id: Self::LineId) -> Result<Option<Line<Self::LineId, Self::NodeId>>, Self::Error>;

    fn get_lines(&self) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error>;

    fn find_nodes_close_to(
        &self,
        coordinate: Coordinate,
        radius: Length,
    ) -> Result<Vec<Node<Self::NodeId>>, Self::Error>;

    fn find_lines_close_to(
        &self,
        coordinate: Coordinate,
        radius: Length,
    ) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error>;

    fn outgoing_lines(
        &self,
        node: Self::NodeId,
    ) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error>;

    fn incoming_lines(
        &self,
        node: Self::NodeId,
    ) -> Result<Vec<Line<Self::LineId, Self::NodeId>>, Self::Error>;
}
