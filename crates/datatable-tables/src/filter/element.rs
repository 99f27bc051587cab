//! A single filterable field

use crate::error::{Result, TableError};
use datatable_params::Params;

/// One choice of a filter element: the value sent in the request and the
/// label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
	value: String,
	label: String,
}

impl Selection {
	/// Creates a selection with distinct value and label.
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}

	/// Creates a selection whose value is its label.
	pub fn labelled(label: impl Into<String>) -> Self {
		let label = label.into();
		Self {
			value: label.clone(),
			label,
		}
	}

	/// Request value.
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Display label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// `(label, value)` pair for a select control.
	pub fn to_option(&self) -> (&str, &str) {
		(&self.label, &self.value)
	}
}

/// Declaration of one filter element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterElementConfig {
	field: String,
	selections: Vec<Selection>,
	default_value: Option<String>,
}

impl FilterElementConfig {
	/// Starts the declaration of the element filtering `field`.
	pub fn builder(field: impl Into<String>) -> FilterElementBuilder {
		FilterElementBuilder {
			config: Self {
				field: field.into(),
				selections: Vec::new(),
				default_value: None,
			},
		}
	}

	/// Filtered field.
	pub fn field(&self) -> &str {
		&self.field
	}

	/// Declared selections, default included, in declaration order.
	pub fn selections(&self) -> &[Selection] {
		&self.selections
	}
}

/// Fluent builder for [`FilterElementConfig`].
#[derive(Debug, Clone)]
pub struct FilterElementBuilder {
	config: FilterElementConfig,
}

impl FilterElementBuilder {
	/// Declares the "no filter" selection, e.g. `"All"`.
	pub fn add_default(self, label: impl Into<String>) -> Self {
		self.push_default(Selection::labelled(label))
	}

	/// Declares the "no filter" selection with a value distinct from its label.
	pub fn add_default_with_value(self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.push_default(Selection::new(value, label))
	}

	/// Declares a selectable value shown as itself.
	pub fn add_option(mut self, label: impl Into<String>) -> Self {
		self.config.selections.push(Selection::labelled(label));
		self
	}

	/// Declares a selectable value with its own label.
	pub fn add_option_with_value(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.config.selections.push(Selection::new(value, label));
		self
	}

	/// Finishes the declaration.
	pub fn build(self) -> FilterElementConfig {
		self.config
	}

	fn push_default(mut self, selection: Selection) -> Self {
		self.config.default_value = Some(selection.value.clone());
		self.config.selections.push(selection);
		self
	}
}

/// A filterable field with its selection resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterElement {
	field: String,
	selections: Vec<Selection>,
	default_index: usize,
	selected_index: usize,
}

impl FilterElement {
	/// Builds an element from its declaration.
	///
	/// # Errors
	///
	/// Returns [`TableError::MissingFilterDefault`] when no default was
	/// declared and [`TableError::DuplicateSelection`] when two selections
	/// share a value.
	pub fn from_config(config: FilterElementConfig) -> Result<Self> {
		for (index, selection) in config.selections.iter().enumerate() {
			if config.selections[..index]
				.iter()
				.any(|earlier| earlier.value == selection.value)
			{
				return Err(TableError::DuplicateSelection {
					field: config.field,
					value: selection.value.clone(),
				});
			}
		}

		let default_index = config
			.default_value
			.as_deref()
			.and_then(|value| config.selections.iter().position(|s| s.value == value))
			.ok_or_else(|| TableError::MissingFilterDefault(config.field.clone()))?;

		Ok(Self {
			field: config.field,
			selections: config.selections,
			default_index,
			selected_index: default_index,
		})
	}

	/// Filtered field.
	pub fn field(&self) -> &str {
		&self.field
	}

	/// All selections in declaration order.
	pub fn selections(&self) -> &[Selection] {
		&self.selections
	}

	/// The "no filter" selection.
	pub fn default_selection(&self) -> &Selection {
		&self.selections[self.default_index]
	}

	/// The selection currently applied.
	pub fn selected(&self) -> &Selection {
		&self.selections[self.selected_index]
	}

	/// Returns true if the element is at its default, i.e. not filtering.
	pub fn is_default(&self) -> bool {
		self.selected_index == self.default_index
	}

	/// Reconciles this element against a table's (unscoped) parameters.
	///
	/// The parameter named after the field selects the selection with that
	/// value; a missing or unknown value selects the default.
	pub fn with(&self, params: &Params) -> FilterElement {
		let mut element = self.clone();
		element.selected_index = match params.get_str(&self.field) {
			Some(value) => match self.selections.iter().position(|s| s.value == value) {
				Some(index) => index,
				None => {
					tracing::debug!(
						field = %self.field,
						value,
						"unknown filter value, using default"
					);
					self.default_index
				}
			},
			None => self.default_index,
		};
		element
	}
}
