#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

mod picker;
mod pointer;
mod surface;

pub use picker::*;
pub use pointer::*;
pub use surface::*;
