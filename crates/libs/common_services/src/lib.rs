#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod analysis;
pub mod api_client;
pub mod result_set;
pub mod save;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_support;
