//! Application layer - Use cases that coordinate domain services.
//!
//! This layer validates requests, fetches catalog data and runs the engine,
//! returning the direction-specific result shape to the CLI layer.

mod error;
mod generate;

pub use error::GenerateError;
pub use generate::{CommandGenerator, build_plan, validate};
