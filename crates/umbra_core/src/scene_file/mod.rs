//! Scene file support for Umbra.
//!
//! A scene file is a plain text list of entries separated by empty lines.
//! Each entry starts with its kind and continues with one parameter per
//! line:
//!
//! ```text
//! # A red ball on a floor
//! camera
//!     position  0.0  -8.0  3.0
//!     target    0.0   0.0  1.0
//!
//! light
//!     position  4.0  -4.0  10.0
//!
//! plane
//!     center  0.0  0.0  0.0
//!     normal  0.0  0.0  1.0
//!     scale   2.0
//!     texture "tiles.png"
//!
//! sphere
//!     position  0.0  0.0  1.0
//!     radius    1.0
//!     color     0.9  0.1  0.1
//! ```
//!
//! Every entry is checked against its motif (the schema of required,
//! optional and alternative parameters) before it becomes a typed
//! [`SceneRecord`].

mod motif;
mod parser;
mod records;

pub use motif::*;
pub use parser::*;
pub use records::*;
