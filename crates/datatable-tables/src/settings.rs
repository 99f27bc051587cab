//! Table settings
//!
//! Project-wide defaults for declared tables, loadable from TOML:
//!
//! ```toml
//! default_name = "data_table"
//! form_id = "filterForm"
//! mode = "ajax"
//! remote_method = "get"
//!
//! [icons]
//! directory = "chrome"
//! ascending = "current_sort_asc"
//! descending = "current_sort_desc"
//! unsorted = "sortArrow001"
//! extension = "gif"
//! ```
//!
//! Every key is optional; missing keys take the values shown above.

use crate::sort::SortOrder;
use crate::wrapper::RenderMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The settings document is not valid.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Defaults applied to every table declared with these settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
	/// Name used by [`Wrapper::unnamed`](crate::Wrapper::unnamed).
	pub default_name: String,
	/// DOM id of the filter form when the table does not set one.
	pub form_id: String,
	/// Rendering mode of newly declared tables.
	pub mode: RenderMode,
	/// HTTP method for remote submissions when the table does not set one.
	pub remote_method: String,
	/// Sort indicator images.
	pub icons: SortIcons,
}

impl Default for TableSettings {
	fn default() -> Self {
		Self {
			default_name: "data_table".to_string(),
			form_id: "filterForm".to_string(),
			mode: RenderMode::default(),
			remote_method: "get".to_string(),
			icons: SortIcons::default(),
		}
	}
}

impl TableSettings {
	/// Parses settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use datatable_tables::settings::TableSettings;
	/// use datatable_tables::RenderMode;
	///
	/// let settings = TableSettings::from_toml_str("mode = \"standard\"").unwrap();
	/// assert_eq!(settings.mode, RenderMode::Standard);
	/// assert_eq!(settings.form_id, "filterForm");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), "loaded table settings");
		Ok(settings)
	}
}

/// Image names for sort indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortIcons {
	/// Directory prefix of every icon.
	pub directory: String,
	/// Icon of the column currently sorted ascending.
	pub ascending: String,
	/// Icon of the column currently sorted descending.
	pub descending: String,
	/// Icon of every other sortable column.
	pub unsorted: String,
	/// File extension, without the dot.
	pub extension: String,
}

impl Default for SortIcons {
	fn default() -> Self {
		Self {
			directory: "chrome".to_string(),
			ascending: "current_sort_asc".to_string(),
			descending: "current_sort_desc".to_string(),
			unsorted: "sortArrow001".to_string(),
			extension: "gif".to_string(),
		}
	}
}

impl SortIcons {
	/// Image path for a column in the given state; `None` means unsorted.
	pub fn path_for(&self, current_order: Option<SortOrder>) -> String {
		let name = match current_order {
			Some(SortOrder::Asc) => &self.ascending,
			Some(SortOrder::Desc) => &self.descending,
			None => &self.unsorted,
		};
		format!("{}/{}.{}", self.directory, name, self.extension)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_empty_document_is_default() {
		assert_eq!(TableSettings::from_toml_str("").unwrap(), TableSettings::default());
	}

	#[rstest]
	fn test_partial_icons_table() {
		let settings = TableSettings::from_toml_str(
			r#"
			form_id = "carFilter"

			[icons]
			directory = "img/sort"
			extension = "png"
			"#,
		)
		.unwrap();

		assert_eq!(settings.form_id, "carFilter");
		assert_eq!(settings.mode, RenderMode::Ajax);
		assert_eq!(
			settings.icons.path_for(Some(SortOrder::Desc)),
			"img/sort/current_sort_desc.png"
		);
	}

	#[rstest]
	#[case(Some(SortOrder::Asc), "chrome/current_sort_asc.gif")]
	#[case(Some(SortOrder::Desc), "chrome/current_sort_desc.gif")]
	#[case(None, "chrome/sortArrow001.gif")]
	fn test_default_icon_paths(#[case] order: Option<SortOrder>, #[case] expected: &str) {
		assert_eq!(SortIcons::default().path_for(order), expected);
	}

	#[rstest]
	fn test_invalid_mode_is_rejected() {
		let error = TableSettings::from_toml_str("mode = \"flash\"").unwrap_err();
		assert!(matches!(error, SettingsError::Toml(_)));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "default_name = \"cars\"").unwrap();

		let settings = TableSettings::from_file(file.path()).unwrap();
		assert_eq!(settings.default_name, "cars");
	}

	#[rstest]
	fn test_from_missing_file() {
		let error = TableSettings::from_file("/nonexistent/datatable.toml").unwrap_err();
		assert!(matches!(error, SettingsError::Io(_)));
	}
}
