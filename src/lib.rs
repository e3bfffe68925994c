//! Block name to average texture color maps for minimap rendering.
//!
//! The pipeline lives in the `lib` workspace crate, the executable in `cli`.

pub use lib::*;
