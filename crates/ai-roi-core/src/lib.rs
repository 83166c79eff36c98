pub mod error;
pub mod estimate;
pub mod presets;
pub mod projection;
pub mod types;
pub mod validation;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::RoiError;
pub use types::*;

/// Standard result type for all projection operations
pub type RoiResult<T> = Result<T, RoiError>;
