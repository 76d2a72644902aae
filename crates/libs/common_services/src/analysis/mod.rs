mod error;
mod interfaces;
mod progress;
mod service;

pub use error::*;
pub use interfaces::*;
pub use progress::*;
pub use service::*;
