#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
mod api;
mod color_code;
mod track;

pub use api::*;
pub use color_code::*;
pub use track::*;
