//! `PointOnLine` and `Route`: the two composite types candidate
//! generation, path search, and trimming are built around. Offsets are
//! fractional (`[0,1]` along a line) rather than absolute meters, which
//! is what the scorer's bearing probe and the trimming walk both need.

use crate::error::DecodeError;
use crate::geodesy;
use crate::map::Line;
use crate::model::{Coordinate, Length};

/// A fractional position along one line: `relative_offset` in `[0,1]`,
/// where `0` is the line's start node and `1` its end node.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOnLine<LineId, NodeId> {
    pub line: Line<LineId, NodeId>,
    pub relative_offset: f64,
}

impl<LineId: Copy, NodeId: Copy> PointOnLine<LineId, NodeId> {
    pub fn at_start(line: Line<LineId, NodeId>) -> Self {
        Self {
            line,
            relative_offset: 0.0,
        }
    }

    pub fn at_end(line: Line<LineId, NodeId>) -> Self {
        Self {
            line,
            relative_offset: 1.0,
        }
    }

    /// Distance from the line's start to this point, in meters.
    pub fn offset(&self) -> Length {
        Length::from_meters(self.line.length.meters() * self.relative_offset)
    }

    /// The geographic coordinate of this point.
    pub fn position(&self) -> Coordinate {
        geodesy::project_along_path(&self.line.geometry, self.offset())
            .unwrap_or_else(|| self.line.start_coordinate())
    }

    /// Splits the line's geometry into the sub-polyline before this point
    /// and the one after it. See [`geodesy::split_path_at`].
    pub fn split(&self) -> (Option<Vec<Coordinate>>, Option<Vec<Coordinate>>) {
        geodesy::split_path_at(&self.line.geometry, self.offset())
    }
}

/// A contiguous traversal from a start `PointOnLine` to an end
/// `PointOnLine`, with an ordered list of fully-traversed intermediate
/// lines between them (possibly empty).
#[derive(Debug, Clone, PartialEq)]
pub struct Route<LineId, NodeId> {
    pub start: PointOnLine<LineId, NodeId>,
    pub intermediate: Vec<Line<LineId, NodeId>>,
    pub end: PointOnLine<LineId, NodeId>,
}

impl<LineId: Copy + PartialEq, NodeId: Copy> Route<LineId, NodeId> {
    /// The in-line shortcut: start and end share a line, with
    /// `end.relative_offset >= start.relative_offset`.
    pub fn same_line(line: Line<LineId, NodeId>, start_offset: f64, end_offset: f64) -> Self {
        Self {
            start: PointOnLine {
                line: line.clone(),
                relative_offset: start_offset,
            },
            intermediate: Vec::new(),
            end: PointOnLine {
                line,
                relative_offset: end_offset,
            },
        }
    }

    /// The route's total length: the partial start segment, plus every
    /// intermediate whole line, plus the partial end segment. When start
    /// and end share the same line this degenerates to
    /// `line.length * (end.relative_offset - start.relative_offset)`.
    pub fn length(&self) -> Length {
        if self.intermediate.is_empty() && self.start.line.id == self.end.line.id {
            return Length::from_meters(
                self.start.line.length.meters()
                    * (self.end.relative_offset - self.start.relative_offset),
            );
        }

        let start_part = Length::from_meters(
            self.start.line.length.meters() * (1.0 - self.start.relative_offset),
        );
        let intermediate_part: Length = self.intermediate.iter().map(|line| line.length).sum();
        let end_part = Length::from_meters(self.end.line.length.meters() * self.end.relative_offset);
        start_part + intermediate_part + end_part
    }

    /// `true` when this route never leaves a single line: `start` and
    /// `end` sit on the same line and nothing lies between them. Such a
    /// route's `start.relative_offset` may be greater than `0`, unlike a
    /// route that has left its start line, whose `end` is always entered
    /// at the boundary line's own start node (offset `0`).
    fn is_same_line(&self) -> bool {
        self.intermediate.is_empty() && self.start.line.id == self.end.line.id
    }

    /// Concatenates routes that were resolved for consecutive LRP pairs.
    /// Each route's `end` must be the same `PointOnLine` as the next
    /// route's `start` (the decoder enforces this by construction: the
    /// candidate chosen for an interior LRP is reused, unchanged, as the
    /// end of one pair and the start of the next).
    ///
    /// The shared boundary line becomes one fully-traversed intermediate
    /// line only when both sides actually leave it at the junction: a
    /// route ending at the boundary from offset `0` glued to a route
    /// starting at the boundary and continuing past it. If either side
    /// never leaves the boundary line (a same-line shortcut), the two
    /// partial segments on that line are collapsed into a single
    /// `start`/`end` offset instead of double-counting the line.
    pub fn concat(routes: Vec<Route<LineId, NodeId>>) -> Route<LineId, NodeId> {
        let mut routes = routes.into_iter();
        let mut result = routes.next().expect("concat requires at least one route");

        for next in routes {
            match (result.is_same_line(), next.is_same_line()) {
                (true, true) => {
                    result.end = next.end;
                }
                (true, false) => {
                    result = Route {
                        start: result.start,
                        intermediate: next.intermediate,
                        end: next.end,
                    };
                }
                (false, true) => {
                    result.end = next.end;
                }
                (false, false) => {
                    let boundary = result.end.line.clone();
                    result.intermediate.push(boundary);
                    result.intermediate.extend(next.intermediate);
                    result.end = next.end;
                }
            }
        }

        result
    }

    /// Walks `d` meters from this route's start (honoring its start
    /// offset) and returns `(line, offset_in_meters_from_line_start)`.
    pub fn project_at<E>(&self, d: Length) -> Result<(Line<LineId, NodeId>, Length), DecodeError<E>>
    where
        E: std::error::Error,
    {
        let start_remaining =
            Length::from_meters(self.start.line.length.meters() * (1.0 - self.start.relative_offset));

        if d <= start_remaining {
            let offset = Length::from_meters(self.start.offset().meters() + d.meters());
            return Ok((self.start.line.clone(), offset));
        }

        let mut remaining = Length::from_meters(d.meters() - start_remaining.meters());
        for line in &self.intermediate {
            if remaining <= line.length {
                return Ok((line.clone(), remaining));
            }
            remaining = Length::from_meters(remaining.meters() - line.length.meters());
        }

        let end_available = Length::from_meters(self.end.line.length.meters() * self.end.relative_offset);
        if remaining <= end_available {
            return Ok((self.end.line.clone(), remaining));
        }

        Err(DecodeError::PathExhausted)
    }
}
