//! Convenience result type alias for foldview.

use crate::error::AppError;

/// A specialized `Result` type for foldview operations.
pub type AppResult<T> = Result<T, AppError>;
