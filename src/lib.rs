//! Region-based blur compositing for interactive raster-image editors:
//! shape hit-testing, an undoable blur-region collection, and a cascading
//! box-blur compositor, driven through pointer gestures on an editing
//! session.

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;
pub use error::{RegionError, RegionResult};
