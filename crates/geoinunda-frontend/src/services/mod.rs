//! # Services Module
//!
//! Network and storage services backing the map.

pub mod flood;
pub mod geocode;
pub mod storage;

pub use flood::*;
pub use geocode::*;
pub use storage::*;
