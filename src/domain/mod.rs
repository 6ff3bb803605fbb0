//! Domain layer - the resolution and command generation engine.
//!
//! - `model` - catalog entities, requests and result shapes
//! - `service` - resolver, compiler, cleanup assembler and warning collector

pub mod model;
pub mod service;
