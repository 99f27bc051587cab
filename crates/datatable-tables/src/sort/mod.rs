//! Sorting
//!
//! A [`Sort`] is the ordered list of keys a table can be sorted by. It is
//! declared once from a [`SortConfig`] and then reconciled against each
//! request's table parameters with [`Sort::with`], which picks the selected
//! option and its order from `sort_key` and `sort_order`.
//!
//! # Example
//!
//! ```rust
//! use datatable_params::Params;
//! use datatable_tables::sort::{Sort, SortConfig, SortOrder};
//!
//! let sort = Sort::from_config(
//!     SortConfig::builder()
//!         .add_default("make")
//!         .add_option("year", SortOrder::Desc)
//!         .build(),
//! )
//! .unwrap();
//!
//! let active = sort.with(&Params::from([("sort_key", "year")]));
//! assert_eq!(active.selected().key(), "year");
//! assert_eq!(active.selected().current_order(), Some(SortOrder::Desc));
//! assert_eq!(active.selected().other_order(), SortOrder::Asc);
//! ```

pub mod option;

pub use option::SortOption;

use crate::error::{Result, TableError};
use datatable_params::Params;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Table parameter naming the selected sort key.
pub const SORT_KEY_PARAM: &str = "sort_key";

/// Table parameter naming the selected sort order.
pub const SORT_ORDER_PARAM: &str = "sort_order";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	/// Ascending order
	#[default]
	Asc,
	/// Descending order
	Desc,
}

impl SortOrder {
	/// Returns the opposite direction
	pub fn opposite(self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}

	/// Parameter value for this direction
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	/// Parses a `sort_order` parameter value
	///
	/// Only the exact values `asc` and `desc` are recognized.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"asc" => Some(Self::Asc),
			"desc" => Some(Self::Desc),
			_ => None,
		}
	}
}

impl fmt::Display for SortOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A declared option of a [`SortConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptionSpec {
	/// Sort key.
	pub key: String,
	/// Order used when the option is selected without an explicit order.
	pub order: SortOrder,
}

/// Declaration of a sort: its options in display order and the default key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortConfig {
	options: Vec<SortOptionSpec>,
	default_key: Option<String>,
}

impl SortConfig {
	/// Starts a new declaration.
	pub fn builder() -> SortConfigBuilder {
		SortConfigBuilder::default()
	}

	/// Declared options in declaration order.
	pub fn options(&self) -> &[SortOptionSpec] {
		&self.options
	}

	/// Key explicitly declared as default, if any.
	pub fn default_key(&self) -> Option<&str> {
		self.default_key.as_deref()
	}
}

/// Fluent builder for [`SortConfig`].
///
/// Declaring a key twice keeps its first position and takes the later order.
#[derive(Debug, Clone, Default)]
pub struct SortConfigBuilder {
	config: SortConfig,
}

impl SortConfigBuilder {
	/// Declares the default option, sorted ascending unless another call
	/// gives the same key an order.
	pub fn add_default(mut self, key: impl Into<String>) -> Self {
		let key = key.into();
		self.upsert(&key, None);
		self.config.default_key = Some(key);
		self
	}

	/// Declares the default option with an explicit order.
	pub fn add_default_with_order(mut self, key: impl Into<String>, order: SortOrder) -> Self {
		let key = key.into();
		self.upsert(&key, Some(order));
		self.config.default_key = Some(key);
		self
	}

	/// Declares a non-default option.
	pub fn add_option(mut self, key: impl Into<String>, order: SortOrder) -> Self {
		self.upsert(&key.into(), Some(order));
		self
	}

	/// Finishes the declaration.
	pub fn build(self) -> SortConfig {
		self.config
	}

	fn upsert(&mut self, key: &str, order: Option<SortOrder>) {
		match self.config.options.iter_mut().find(|spec| spec.key == key) {
			Some(spec) => {
				if let Some(order) = order {
					spec.order = order;
				}
			}
			None => self.config.options.push(SortOptionSpec {
				key: key.to_string(),
				order: order.unwrap_or_default(),
			}),
		}
	}
}

/// Sort options of a table with the selection resolved.
///
/// The default option is the one declared as default, or the first one.
/// Exactly one option is selected at any time; a freshly declared sort
/// selects its default option in its default order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
	options: Vec<SortOption>,
	default_index: usize,
	selected_index: usize,
	owner: Option<String>,
}

impl Sort {
	/// Builds a sort from its declaration.
	///
	/// # Errors
	///
	/// Returns [`TableError::EmptySort`] if no option was declared.
	pub fn from_config(config: SortConfig) -> Result<Self> {
		if config.options.is_empty() {
			return Err(TableError::EmptySort);
		}

		let default_index = config
			.default_key
			.as_deref()
			.and_then(|key| config.options.iter().position(|spec| spec.key == key))
			.unwrap_or(0);

		let mut options: Vec<SortOption> = config
			.options
			.into_iter()
			.map(|spec| SortOption::new(spec.key, spec.order))
			.collect();
		options[default_index].select(None);

		Ok(Self {
			options,
			default_index,
			selected_index: default_index,
			owner: None,
		})
	}

	/// All options in declaration order.
	pub fn options(&self) -> &[SortOption] {
		&self.options
	}

	/// The default option.
	pub fn default_option(&self) -> &SortOption {
		&self.options[self.default_index]
	}

	/// The selected option.
	pub fn selected(&self) -> &SortOption {
		&self.options[self.selected_index]
	}

	/// Looks up an option by key.
	pub fn option_by_key(&self, key: &str) -> Option<&SortOption> {
		self.options.iter().find(|option| option.key() == key)
	}

	/// Name of the table this sort belongs to, once attached.
	pub fn owner(&self) -> Option<&str> {
		self.owner.as_deref()
	}

	pub(crate) fn set_owner(&mut self, owner: impl Into<String>) {
		self.owner = Some(owner.into());
	}

	/// `sort_key` and `sort_order` of the selected option.
	///
	/// Used to carry the current sort into hidden form fields and links.
	pub fn selected_params(&self) -> Params {
		let selected = self.selected();
		let order = selected.current_order().unwrap_or(selected.default_order());
		Params::from([
			(SORT_KEY_PARAM, selected.key()),
			(SORT_ORDER_PARAM, order.as_str()),
		])
	}

	/// Reconciles this sort against a table's (unscoped) parameters.
	///
	/// A known `sort_key` selects that option, anything else selects the
	/// default option. A `sort_order` of `asc` or `desc` sets the selected
	/// option's order, anything else leaves its default order. `self` is not
	/// modified.
	pub fn with(&self, params: &Params) -> Sort {
		let mut sort = self.clone();
		for option in &mut sort.options {
			option.clear();
		}

		sort.selected_index = match params.get_str(SORT_KEY_PARAM) {
			Some(key) => match sort.options.iter().position(|option| option.key() == key) {
				Some(index) => index,
				None => {
					tracing::debug!(
						table = self.owner(),
						sort_key = key,
						"unknown sort key, using default"
					);
					sort.default_index
				}
			},
			None => sort.default_index,
		};

		let order = params.get_str(SORT_ORDER_PARAM).and_then(|raw| {
			let order = SortOrder::parse(raw);
			if order.is_none() {
				tracing::debug!(
					table = self.owner(),
					sort_order = raw,
					"invalid sort order, using default order"
				);
			}
			order
		});

		let selected_index = sort.selected_index;
		sort.options[selected_index].select(order);

		tracing::trace!(
			table = self.owner(),
			sort_key = sort.selected().key(),
			"reconciled sort"
		);
		sort
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[fixture]
	fn car_sort() -> Sort {
		Sort::from_config(
			SortConfig::builder()
				.add_default("make")
				.add_option("year", SortOrder::Desc)
				.build(),
		)
		.unwrap()
	}

	#[rstest]
	fn test_empty_sort_is_rejected() {
		let result = Sort::from_config(SortConfig::builder().build());
		assert!(matches!(result, Err(TableError::EmptySort)));
	}

	#[rstest]
	fn test_first_option_is_default_without_explicit_default() {
		let sort = Sort::from_config(
			SortConfig::builder()
				.add_option("price", SortOrder::Desc)
				.add_option("year", SortOrder::Asc)
				.build(),
		)
		.unwrap();

		assert_eq!(sort.default_option().key(), "price");
		assert_eq!(sort.selected().current_order(), Some(SortOrder::Desc));
	}

	#[rstest]
	fn test_default_declared_after_options() {
		let sort = Sort::from_config(
			SortConfig::builder()
				.add_option("year", SortOrder::Desc)
				.add_default("make")
				.build(),
		)
		.unwrap();

		assert_eq!(sort.default_option().key(), "make");
		let keys: Vec<&str> = sort.options().iter().map(SortOption::key).collect();
		assert_eq!(keys, ["year", "make"]);
	}

	#[rstest]
	fn test_redeclared_key_overrides_order() {
		let config = SortConfig::builder()
			.add_default("make")
			.add_option("make", SortOrder::Desc)
			.build();

		assert_eq!(config.options().len(), 1);
		assert_eq!(config.options()[0].order, SortOrder::Desc);
		assert_eq!(config.default_key(), Some("make"));
	}

	#[rstest]
	fn test_fresh_sort_selects_default(car_sort: Sort) {
		assert_eq!(car_sort.selected().key(), "make");
		assert_eq!(car_sort.selected().current_order(), Some(SortOrder::Asc));
		assert_eq!(car_sort.selected().other_order(), SortOrder::Desc);
		assert_eq!(car_sort.option_by_key("year").unwrap().current_order(), None);
	}

	#[rstest]
	fn test_default_key_in_alternate_order(car_sort: Sort) {
		let sort = car_sort.with(&Params::from([("sort_key", "make"), ("sort_order", "desc")]));

		assert_eq!(sort.selected(), sort.default_option());
		assert_eq!(sort.selected().current_order(), Some(SortOrder::Desc));
		assert_eq!(sort.selected().other_order(), SortOrder::Asc);
	}

	#[rstest]
	#[case("desc", SortOrder::Desc, SortOrder::Asc)]
	#[case("asc", SortOrder::Asc, SortOrder::Desc)]
	fn test_secondary_key(
		car_sort: Sort,
		#[case] requested: &str,
		#[case] current: SortOrder,
		#[case] other: SortOrder,
	) {
		let sort = car_sort.with(&Params::from([("sort_key", "year"), ("sort_order", requested)]));

		assert_eq!(sort.selected().key(), "year");
		assert_ne!(sort.selected().key(), sort.default_option().key());
		assert_eq!(sort.selected().current_order(), Some(current));
		assert_eq!(sort.selected().other_order(), other);
		assert_eq!(sort.option_by_key("make").unwrap().current_order(), None);
	}

	#[rstest]
	fn test_recognized_key_without_order_uses_default_order(car_sort: Sort) {
		let sort = car_sort.with(&Params::from([("sort_key", "year")]));
		assert_eq!(sort.selected().current_order(), Some(SortOrder::Desc));
	}

	#[rstest]
	#[case(Params::new())]
	#[case(Params::from([("sort_key", "mileage")]))]
	#[case(Params::from([("sort_key", "")]))]
	#[case(Params::from([("sort_key", Params::from([("x", "y")]))]))]
	fn test_unknown_or_missing_key_selects_default(car_sort: Sort, #[case] params: Params) {
		let sort = car_sort.with(&params);
		assert_eq!(sort.selected().key(), "make");
		assert_eq!(sort.selected().current_order(), Some(SortOrder::Asc));
	}

	#[rstest]
	#[case("DESC")]
	#[case("descending")]
	#[case("")]
	fn test_invalid_order_falls_back(car_sort: Sort, #[case] order: &str) {
		let sort = car_sort.with(&Params::from([("sort_key", "year"), ("sort_order", order)]));
		assert_eq!(sort.selected().current_order(), Some(SortOrder::Desc));
	}

	#[rstest]
	fn test_with_does_not_mutate(car_sort: Sort) {
		let before = car_sort.clone();
		let _ = car_sort.with(&Params::from([("sort_key", "year"), ("sort_order", "asc")]));
		assert_eq!(car_sort, before);
	}

	#[rstest]
	fn test_selected_params(car_sort: Sort) {
		let sort = car_sort.with(&Params::from([("sort_key", "year"), ("sort_order", "asc")]));
		assert_eq!(
			sort.selected_params(),
			Params::from([("sort_key", "year"), ("sort_order", "asc")])
		);
	}

	#[rstest]
	#[case(SortOrder::Asc, "asc", SortOrder::Desc)]
	#[case(SortOrder::Desc, "desc", SortOrder::Asc)]
	fn test_sort_order_strings(
		#[case] order: SortOrder,
		#[case] text: &str,
		#[case] opposite: SortOrder,
	) {
		assert_eq!(order.as_str(), text);
		assert_eq!(order.to_string(), text);
		assert_eq!(SortOrder::parse(text), Some(order));
		assert_eq!(order.opposite(), opposite);
	}
}
