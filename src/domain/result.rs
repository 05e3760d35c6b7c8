//! Result type alias for the loader
//!
//! This module provides a convenient Result type alias that uses LoaderError
//! as the error type.

use super::errors::LoaderError;

/// Result type alias for loader operations
///
/// # Examples
///
/// ```
/// use marketing_loader::domain::result::Result;
/// use marketing_loader::domain::errors::LoaderError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LoaderError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LoaderError>;
