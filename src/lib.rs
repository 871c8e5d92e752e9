#![doc = include_str!("../README.md")]

mod cancel;
mod candidates;
mod config;
mod decoder;
mod error;
mod geodesy;
mod map;
mod model;
mod observer;
mod path_search;
mod point_decoder;
mod route;
mod scorer;

pub use cancel::CancellationToken;
pub use candidates::Candidate;
pub use config::{DecoderConfig, ScoreWeights};
pub use decoder::{LineLocation, decode_line};
pub use error::DecodeError;
pub use map::{Line, Map, Node};
pub use model::{
    Coordinate, Fow, Frc, Length, LineLocationReference, Lrp, Orientation,
    PoiWithAccessPointLocationReference, PointAlongLineLocationReference, Score, SideOfRoad,
};
pub use observer::{NullObserver, Observer, RouteRejection};
pub use point_decoder::{
    PoiWithAccessPoint, PointAlongLine, decode_geo_coordinate, decode_point_along_line,
    decode_poi_with_access_point,
};
pub use route::{PointOnLine, Route};
