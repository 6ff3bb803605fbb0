pub mod distro;
pub mod package;
pub mod plan;
pub mod request;
pub mod template;

pub use distro::*;
pub use package::*;
pub use plan::*;
pub use request::*;
pub use template::*;
