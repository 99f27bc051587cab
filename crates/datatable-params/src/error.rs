//! Error types for parameter encoding and decoding.

use thiserror::Error;

/// Errors raised by the query-string codec.
///
/// Map operations on [`Params`](crate::Params) never fail; only turning a
/// parameter tree into a string (or back) can.
#[derive(Debug, Error)]
pub enum ParamsError {
	/// The parameter pairs could not be urlencoded.
	#[error("Query string encode error: {0}")]
	Encode(#[from] serde_urlencoded::ser::Error),

	/// The input was not a valid urlencoded query string.
	#[error("Query string decode error: {0}")]
	Decode(#[from] serde_urlencoded::de::Error),
}

/// Result type alias for parameter codec operations.
pub type ParamsResult<T> = Result<T, ParamsError>;
