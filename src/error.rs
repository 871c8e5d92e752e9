//! The decoder's single error type: a `thiserror`-derived enum covering
//! the algorithmic failure modes the decoding core surfaces.

use thiserror::Error;

/// Every way a decode can fail. Generic over the map reader's own
/// associated `Error` type so a fallible reader's failures are accounted
/// for in the same error type rather than silently treated as "no data".
#[derive(Debug, Error)]
pub enum DecodeError<E> {
    #[error("no admissible candidate within radius for LRP {0}")]
    NoCandidates(usize),

    #[error("no admissible route between LRP {from_index} and LRP {to_index}")]
    NoRoute { from_index: usize, to_index: usize },

    #[error("offset walk overshot the available route length")]
    PathExhausted,

    #[error("positive and negative offsets consume the entire route")]
    EmptyLocation,

    #[error("decode was cancelled")]
    Cancelled,

    #[error("the reference is not understood by this decoder")]
    InvalidReference,

    #[error("map reader error: {0}")]
    Map(#[source] E),
}

impl<E: PartialEq> PartialEq for DecodeError<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoCandidates(a), Self::NoCandidates(b)) => a == b,
            (
                Self::NoRoute {
                    from_index: a_from,
                    to_index: a_to,
                },
                Self::NoRoute {
                    from_index: b_from,
                    to_index: b_to,
                },
            ) => a_from == b_from && a_to == b_to,
            (Self::PathExhausted, Self::PathExhausted) => true,
            (Self::EmptyLocation, Self::EmptyLocation) => true,
            (Self::Cancelled, Self::Cancelled) => true,
            (Self::InvalidReference, Self::InvalidReference) => true,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<E: Clone> Clone for DecodeError<E> {
    fn clone(&self) -> Self {
        match self {
            Self::NoCandidates(i) => Self::NoCandidates(*i),
            Self::NoRoute { from_index, to_index } => Self::NoRoute {
                from_index: *from_index,
                to_index: *to_index,
            },
            Self::PathExhausted => Self::PathExhausted,
            Self::EmptyLocation => Self::EmptyLocation,
            Self::Cancelled => Self::Cancelled,
            Self::InvalidReference => Self::InvalidReference,
            Self::Map(e) => Self::Map(e.clone()),
        }
    }
}
