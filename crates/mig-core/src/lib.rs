#![deny(missing_docs)]
#![doc = "Core error and value types shared by the MUSIC input generator crates."]

pub mod errors;
mod value;

pub use errors::{ErrorInfo, MigError};
pub use value::ParamValue;
