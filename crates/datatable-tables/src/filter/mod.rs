//! Filtering
//!
//! A [`Filter`] is the ordered list of [`FilterElement`]s of a table. Each
//! element offers a fixed set of selections, one of which is the "no
//! filter" default. Reconciling against request parameters resolves every
//! element's selection; the non-default selections become query
//! [`Conditions`].

pub mod element;

pub use element::{FilterElement, FilterElementBuilder, FilterElementConfig, Selection};

use crate::error::{Result, TableError};
use datatable_params::Params;
use indexmap::IndexMap;

/// Field to value mapping for a data-store predicate.
pub type Conditions = IndexMap<String, String>;

/// Field to selected value for every element; `None` at the default.
pub type FilterState = IndexMap<String, Option<String>>;

/// Declaration of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
	elements: Vec<FilterElementConfig>,
}

impl FilterConfig {
	/// Starts a new declaration.
	pub fn builder() -> FilterConfigBuilder {
		FilterConfigBuilder::default()
	}

	/// Declared elements in declaration order.
	pub fn elements(&self) -> &[FilterElementConfig] {
		&self.elements
	}
}

/// Fluent builder for [`FilterConfig`].
///
/// # Examples
///
/// ```
/// use datatable_tables::filter::{Filter, FilterConfig};
///
/// let filter = Filter::from_config(
///     FilterConfig::builder()
///         .add_element("color", |e| e.add_default("All").add_option("Blue").add_option("Red"))
///         .build(),
/// )
/// .unwrap();
///
/// assert_eq!(filter.elements().len(), 1);
/// assert_eq!(filter.elements()[0].selections().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfigBuilder {
	config: FilterConfig,
}

impl FilterConfigBuilder {
	/// Declares an element for `field`, configured by `configure`.
	pub fn add_element<F>(self, field: impl Into<String>, configure: F) -> Self
	where
		F: FnOnce(FilterElementBuilder) -> FilterElementBuilder,
	{
		let element = configure(FilterElementConfig::builder(field)).build();
		self.element(element)
	}

	/// Appends an already built element declaration.
	pub fn element(mut self, element: FilterElementConfig) -> Self {
		self.config.elements.push(element);
		self
	}

	/// Finishes the declaration.
	pub fn build(self) -> FilterConfig {
		self.config
	}
}

/// Filter elements of a table with their selections resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
	elements: Vec<FilterElement>,
	owner: Option<String>,
}

impl Filter {
	/// Builds a filter from its declaration.
	///
	/// # Errors
	///
	/// Fails if two elements share a field or an element is invalid (see
	/// [`FilterElement::from_config`]).
	pub fn from_config(config: FilterConfig) -> Result<Self> {
		let mut elements: Vec<FilterElement> = Vec::with_capacity(config.elements.len());
		for element in config.elements {
			if elements.iter().any(|existing| existing.field() == element.field()) {
				return Err(TableError::DuplicateFilterField(element.field().to_string()));
			}
			elements.push(FilterElement::from_config(element)?);
		}
		Ok(Self {
			elements,
			owner: None,
		})
	}

	/// All elements in declaration order.
	pub fn elements(&self) -> &[FilterElement] {
		&self.elements
	}

	/// Looks up an element by field.
	pub fn element(&self, field: &str) -> Option<&FilterElement> {
		self.elements.iter().find(|element| element.field() == field)
	}

	/// Name of the table this filter belongs to, once attached.
	pub fn owner(&self) -> Option<&str> {
		self.owner.as_deref()
	}

	pub(crate) fn set_owner(&mut self, owner: impl Into<String>) {
		self.owner = Some(owner.into());
	}

	/// Reconciles every element against a table's (unscoped) parameters.
	/// `self` is not modified.
	pub fn with(&self, params: &Params) -> Filter {
		let filter = Filter {
			elements: self.elements.iter().map(|element| element.with(params)).collect(),
			owner: self.owner.clone(),
		};
		tracing::trace!(
			table = self.owner(),
			active = filter.conditions().len(),
			"reconciled filter"
		);
		filter
	}

	/// Selected values of the elements that are not at their default.
	pub fn conditions(&self) -> Conditions {
		self.elements
			.iter()
			.filter(|element| !element.is_default())
			.map(|element| (element.field().to_string(), element.selected().value().to_string()))
			.collect()
	}

	/// Selected value of every element, `None` for elements at their default.
	pub fn options(&self) -> FilterState {
		self.elements
			.iter()
			.map(|element| {
				let value = (!element.is_default()).then(|| element.selected().value().to_string());
				(element.field().to_string(), value)
			})
			.collect()
	}
}
