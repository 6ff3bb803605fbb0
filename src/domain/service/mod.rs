pub mod cleanup;
pub use cleanup::*;

pub mod collector;
pub use collector::*;

pub mod compiler;
pub use compiler::*;

pub mod resolver;
pub use resolver::*;
