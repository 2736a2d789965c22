//! # UI Components Module
//!
//! Leptos components for the flood map page.

pub mod consent;
pub mod layer_menu;
pub mod map;
pub mod search_bar;
pub mod toolbox;

pub use consent::*;
pub use layer_menu::*;
pub use map::*;
pub use search_bar::*;
pub use toolbox::*;
