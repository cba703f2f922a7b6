//! Error types for the autoload protocol layer.

mod autoload;
mod host;

pub use autoload::*;
pub use host::*;
