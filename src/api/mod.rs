pub mod episodes;
pub mod error;
pub mod loader;
pub mod models;

pub use episodes::*;
pub use error::{ApiError, FormatError};
pub use loader::*;
pub use models::*;
