// lints
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod address;
mod area;
mod color;
mod error;
mod map;
mod pos;
mod quad;
mod raster;
mod registry;
mod tree;
mod ops {
    mod get;
    mod identity;
    mod json_format;
    mod patch;
    mod print;
    mod simplify;

    pub use print::*;
}
#[cfg(test)]
mod proptests;

pub use address::*;
pub use area::*;
pub use color::*;
pub use error::*;
pub use map::*;
pub use ops::*;
pub use pos::*;
pub use quad::*;
pub use raster::*;
pub use registry::*;
pub use tree::*;
