//! **stepstar-core**: grid types for step-driven A* search.
//!
//! This crate provides the geometry primitives, the search [`Cell`], and the
//! [`Grid`] that owns them. The search itself lives in `stepstar-search`.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::Cell;
pub use config::GridConfig;
pub use error::EditError;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use layout::LayoutError;
