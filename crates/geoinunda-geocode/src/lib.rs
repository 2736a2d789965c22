//! # GeoInunda Geocode
//!
//! Native front end for the map's geocoding rules: resolves addresses against
//! the live provider with `reqwest`, previews query normalization offline and
//! validates flood datasets before they are published.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod report;
pub mod transport;

pub use config::Config;
pub use report::{DatasetReport, NormalizeReport, ResolveReport};
pub use transport::ReqwestTransport;
