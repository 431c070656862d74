pub mod error;
pub mod filesystem;
pub mod location;
pub mod result;

pub use error::*;
pub use filesystem::*;
pub use location::*;
pub use result::*;
