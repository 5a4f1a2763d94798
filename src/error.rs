// Short path for the error types defined in the core module
pub use crate::core::error::{Error, Result};
