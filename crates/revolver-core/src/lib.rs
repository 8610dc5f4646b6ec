pub mod error;
pub mod types;

pub mod analysis;
pub mod covenant;
pub mod coverage;
pub mod hedge;
pub mod scenario;
pub mod sweep;

pub use error::RevolverError;
pub use types::*;

/// Standard result type for all revolver-model operations
pub type RevolverResult<T> = Result<T, RevolverError>;
