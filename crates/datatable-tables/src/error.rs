//! Error types for table declaration and lookup.
//!
//! Reconciling a table against request parameters never fails. These errors
//! only come from declaring sorts and filters, from looking up a table that
//! was never declared, and from loading settings.

use crate::settings::SettingsError;
use datatable_params::ParamsError;
use thiserror::Error;

/// Errors that can occur while declaring or looking up data tables.
#[derive(Debug, Error)]
pub enum TableError {
	/// A sort was declared without any option.
	#[error("Sort declares no options")]
	EmptySort,

	/// A filter element was declared without a default selection.
	#[error("Filter element has no default selection: {0}")]
	MissingFilterDefault(String),

	/// Two filter elements share a field.
	#[error("Duplicate filter field: {0}")]
	DuplicateFilterField(String),

	/// Two selections of one filter element share a value.
	#[error("Duplicate selection value {value:?} for filter field {field}")]
	DuplicateSelection {
		/// Field of the offending element.
		field: String,
		/// Repeated selection value.
		value: String,
	},

	/// No table with this name was declared in the registry.
	#[error("Data table not declared: {0}")]
	UndeclaredTable(String),

	/// Settings could not be loaded.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// Parameters could not be encoded or decoded.
	#[error(transparent)]
	Params(#[from] ParamsError),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_undeclared_table_error() {
		let error = TableError::UndeclaredTable("cars".to_string());
		assert_eq!(error.to_string(), "Data table not declared: cars");
	}

	#[rstest]
	fn test_duplicate_selection_error() {
		let error = TableError::DuplicateSelection {
			field: "color".to_string(),
			value: "Blue".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Duplicate selection value \"Blue\" for filter field color"
		);
	}
}
