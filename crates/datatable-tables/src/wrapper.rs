//! The data table wrapper
//!
//! A [`Wrapper`] ties a named table's optional [`Sort`] and [`Filter`] to its
//! rendering options and to the parameters of the current request.
//!
//! Two kinds of wrappers exist. A *template* is declared once, with its sort
//! and filter specs, and shared by every request. An *activated* wrapper is
//! derived from the template per request with [`Wrapper::with`]; it carries
//! the request parameters and the sort and filter selections resolved from
//! them, and is dropped after the response. `with` never touches the
//! template.
//!
//! # Parameters
//!
//! A table reads only the parameters namespaced under its name:
//!
//! ```text
//! cars[sort_key]=year&cars[sort_order]=desc&cars[color]=Blue&cars[page]=2
//! ```
//!
//! Parameters outside the namespace are only carried along when listed in
//! the table's `with` option.

use crate::error::Result;
use crate::filter::{Conditions, Filter, FilterConfig, FilterState};
use crate::options::{
	FillMissing, HtmlOptions, OtherOptions, RemoteOptions, TableOptions, UrlOptions, merge_groups,
};
use crate::settings::TableSettings;
use crate::sort::{Sort, SortConfig};
use datatable_params::Params;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Table parameter carrying the current page, passed through untouched.
pub const PAGE_PARAM: &str = "page";

/// How sort links and filter forms submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
	/// Plain links and form submissions.
	Standard,
	/// Remote (AJAX) links and forms that update part of the page.
	#[default]
	Ajax,
}

/// A named data table: sort and filter specs, option groups, and, once
/// activated, the current request's parameters.
///
/// # Examples
///
/// ```
/// use datatable_params::Params;
/// use datatable_tables::Wrapper;
/// use datatable_tables::filter::FilterConfig;
/// use datatable_tables::sort::{SortConfig, SortOrder};
///
/// let mut cars = Wrapper::new("cars");
/// cars.sort_spec(
///     SortConfig::builder()
///         .add_default("make")
///         .add_option("year", SortOrder::Desc)
///         .build(),
/// )
/// .unwrap();
/// cars.filter_spec(
///     FilterConfig::builder()
///         .add_element("color", |e| e.add_default("All").add_option("Blue"))
///         .build(),
/// )
/// .unwrap();
///
/// let request = Params::from_query_string("cars%5Bsort_key%5D=year&cars%5Bcolor%5D=Blue").unwrap();
/// let active = cars.with(&request);
///
/// assert_eq!(active.sort().unwrap().selected().key(), "year");
/// assert_eq!(active.conditions().unwrap().get("color").map(String::as_str), Some("Blue"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
	name: String,
	sort: Option<Sort>,
	filter: Option<Filter>,
	remote_options: Arc<RemoteOptions>,
	html_options: Arc<HtmlOptions>,
	url_options: Arc<UrlOptions>,
	other_options: Arc<OtherOptions>,
	mode: RenderMode,
	params: Params,
	settings: Arc<TableSettings>,
}

impl Wrapper {
	/// Creates a table with default settings.
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_settings(name, Arc::new(TableSettings::default()))
	}

	/// Creates a table with the given settings.
	pub fn with_settings(name: impl Into<String>, settings: Arc<TableSettings>) -> Self {
		Self {
			name: name.into(),
			sort: None,
			filter: None,
			remote_options: Arc::default(),
			html_options: Arc::default(),
			url_options: Arc::default(),
			other_options: Arc::default(),
			mode: settings.mode,
			params: Params::new(),
			settings,
		}
	}

	/// Creates a table named after `settings.default_name`.
	pub fn unnamed(settings: Arc<TableSettings>) -> Self {
		let name = settings.default_name.clone();
		Self::with_settings(name, settings)
	}

	/// Name of the table, also its parameter namespace.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Rendering mode.
	pub fn mode(&self) -> RenderMode {
		self.mode
	}

	/// Changes the rendering mode.
	pub fn set_mode(&mut self, mode: RenderMode) {
		self.mode = mode;
	}

	/// Settings this table was declared with.
	pub fn settings(&self) -> &TableSettings {
		&self.settings
	}

	/// Raw parameters of the current request; empty on a template.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// The sort, if one was declared.
	pub fn sort(&self) -> Option<&Sort> {
		self.sort.as_ref()
	}

	/// The filter, if one was declared.
	pub fn filter(&self) -> Option<&Filter> {
		self.filter.as_ref()
	}

	/// AJAX transport options.
	pub fn remote_options(&self) -> &RemoteOptions {
		&self.remote_options
	}

	/// DOM attribute options.
	pub fn html_options(&self) -> &HtmlOptions {
		&self.html_options
	}

	/// Link base parameters.
	pub fn url_options(&self) -> &UrlOptions {
		&self.url_options
	}

	/// Remaining options.
	pub fn other_options(&self) -> &OtherOptions {
		&self.other_options
	}

	/// Declares the table's sort, replacing any previous one.
	///
	/// # Errors
	///
	/// See [`Sort::from_config`].
	pub fn sort_spec(&mut self, config: SortConfig) -> Result<&Sort> {
		let mut sort = Sort::from_config(config)?;
		sort.set_owner(&self.name);
		Ok(self.sort.insert(sort))
	}

	/// Declares the table's filter, replacing any previous one.
	///
	/// # Errors
	///
	/// See [`Filter::from_config`].
	pub fn filter_spec(&mut self, config: FilterConfig) -> Result<&Filter> {
		let mut filter = Filter::from_config(config)?;
		filter.set_owner(&self.name);
		Ok(self.filter.insert(filter))
	}

	/// All option groups merged into one flat map.
	///
	/// Precedence on key collisions: remote < html < url < other.
	pub fn options(&self) -> Params {
		merge_groups(
			&self.remote_options,
			&self.html_options,
			&self.url_options,
			&self.other_options,
		)
	}

	/// Fills every still-unset option from `options`, group by group.
	///
	/// Values already set win. Groups shared with a template are copied
	/// before being changed, so the template is never affected.
	pub fn set_options(&mut self, options: TableOptions) {
		fill_group(&mut self.remote_options, &options.remote);
		fill_group(&mut self.html_options, &options.html);
		fill_group(&mut self.url_options, &options.url);
		fill_group(&mut self.other_options, &options.other);
	}

	/// The option groups as stored.
	pub fn form_options(&self) -> TableOptions {
		TableOptions {
			remote: (*self.remote_options).clone(),
			html: (*self.html_options).clone(),
			url: (*self.url_options).clone(),
			other: (*self.other_options).clone(),
		}
	}

	/// [`options`](Self::options) merged with the current table parameters
	/// in scoped form (`name[key]`).
	pub fn all_options(&self) -> Params {
		self.options().merged(&self.merged_params(&Params::new()))
	}

	/// Activates this table for a request.
	///
	/// Returns a new wrapper carrying `params`, with its sort and filter
	/// reconciled against the parameters namespaced under the table's name.
	/// Option groups are shared with `self`; `self` is not modified.
	pub fn with(&self, params: &Params) -> Wrapper {
		let nested = params.nested(&self.name);
		let activated = Wrapper {
			name: self.name.clone(),
			sort: self.sort.as_ref().map(|sort| sort.with(&nested)),
			filter: self.filter.as_ref().map(|filter| filter.with(&nested)),
			remote_options: Arc::clone(&self.remote_options),
			html_options: Arc::clone(&self.html_options),
			url_options: Arc::clone(&self.url_options),
			other_options: Arc::clone(&self.other_options),
			mode: self.mode,
			params: params.clone(),
			settings: Arc::clone(&self.settings),
		};
		tracing::trace!(table = %self.name, keys = nested.len(), "activated data table");
		activated
	}

	/// Parameters namespaced under the table's name; empty when absent.
	pub fn nested_params(&self) -> Params {
		self.params.nested(&self.name)
	}

	/// The table's current parameters without their namespace, for code
	/// that needs the sort and filter state but not the naming scheme.
	///
	/// # Examples
	///
	/// ```
	/// use datatable_params::Params;
	/// use datatable_tables::Wrapper;
	///
	/// let request = Params::from([("cars", Params::from([("sort_key", "year"), ("sort", "asc")]))]);
	/// let cars = Wrapper::new("cars").with(&request);
	///
	/// assert_eq!(cars.exposed_params(), Params::from([("sort_key", "year"), ("sort", "asc")]));
	/// ```
	pub fn exposed_params(&self) -> Params {
		self.nested_params()
	}

	/// Current page, if the request carries a valid one.
	pub fn page(&self) -> Option<u32> {
		let raw = self.params.get_nested(&self.name)?.get_str(PAGE_PARAM)?;
		match raw.parse() {
			Ok(page) => Some(page),
			Err(_) => {
				tracing::debug!(table = %self.name, page = raw, "ignoring unparsable page");
				None
			}
		}
	}

	/// Parameters for the table's next link, e.g. a sort toggle.
	///
	/// Starts from the url options, adds the pass-through parameters of
	/// the current request and the table's current parameters overlaid
	/// with `additional` (scoped under the table's name), then applies the
	/// url options again so that caller-declared link parameters always win.
	pub fn params_for_url(&self, additional: &Params) -> Params {
		let url = &self.url_options.params;
		url.clone()
			.merged(&self.external_params())
			.merged(&self.merged_params(additional))
			.merged(url)
	}

	/// Request parameters named by the `with` option.
	pub fn external_params(&self) -> Params {
		let keys = self.other_options.with_keys();
		self.params
			.iter()
			.filter(|(key, _)| keys.contains(key))
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect()
	}

	/// The table's current parameters overlaid with `extra`, scoped under the
	/// table's name and flattened to `name[key]` keys.
	///
	/// `extra` is expected unscoped (`{sort_key: "year"}`, not
	/// `{cars: {sort_key: "year"}}`).
	pub fn merged_params(&self, extra: &Params) -> Params {
		self.nested_params()
			.merged(extra)
			.scoped(self.name.clone())
			.flatten_one_level()
	}

	/// Query conditions of the filter; `None` without a filter.
	pub fn conditions(&self) -> Option<Conditions> {
		self.filter.as_ref().map(Filter::conditions)
	}

	/// Filter state of every element; empty without a filter.
	pub fn filter_options(&self) -> FilterState {
		self.filter.as_ref().map(Filter::options).unwrap_or_default()
	}

	/// `sort_key` and `sort_order` of the active sort; empty without a sort.
	pub fn sort_options(&self) -> Params {
		self.sort.as_ref().map(Sort::selected_params).unwrap_or_default()
	}

	/// DOM id of the filter form.
	pub fn form_id(&self) -> &str {
		self.html_options
			.form_id
			.as_deref()
			.unwrap_or(&self.settings.form_id)
	}

	/// HTTP method of remote submissions.
	pub fn remote_method(&self) -> &str {
		self.remote_options
			.method
			.as_deref()
			.unwrap_or(&self.settings.remote_method)
	}

	/// Remote options targeting `url`, for a link or form built per column.
	pub fn remote_options_with_url(&self, url: impl Into<String>) -> RemoteOptions {
		let mut remote = (*self.remote_options).clone();
		remote.url = Some(url.into());
		if remote.method.is_none() {
			remote.method = Some(self.settings.remote_method.clone());
		}
		remote
	}
}

fn fill_group<T>(group: &mut Arc<T>, supplied: &T)
where
	T: FillMissing + Clone + Default + PartialEq,
{
	if *supplied == T::default() {
		return;
	}
	Arc::make_mut(group).fill_missing(supplied);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sort::SortOrder;
	use rstest::*;

	#[fixture]
	fn cars() -> Wrapper {
		let mut cars = Wrapper::new("cars");
		cars.sort_spec(
			SortConfig::builder()
				.add_default("make")
				.add_option("year", SortOrder::Desc)
				.build(),
		)
		.unwrap();
		cars
	}

	#[rstest]
	fn test_defaults() {
		let table = Wrapper::unnamed(Arc::new(TableSettings::default()));
		assert_eq!(table.name(), "data_table");
		assert_eq!(table.mode(), RenderMode::Ajax);
		assert_eq!(table.form_id(), "filterForm");
		assert_eq!(table.remote_method(), "get");
		assert!(table.options().is_empty());
	}

	#[rstest]
	fn test_spec_sets_owner(cars: Wrapper) {
		assert_eq!(cars.sort().unwrap().owner(), Some("cars"));
		assert!(cars.filter().is_none());
	}

	#[rstest]
	fn test_page(cars: Wrapper) {
		let active = cars.with(&Params::from([("cars", Params::from([("page", "3")]))]));
		assert_eq!(active.page(), Some(3));

		let active = cars.with(&Params::from([("cars", Params::from([("page", "last")]))]));
		assert_eq!(active.page(), None);

		let active = cars.with(&Params::from([("page", "3")]));
		assert_eq!(active.page(), None);
	}

	#[rstest]
	fn test_set_options_copies_shared_groups(cars: Wrapper) {
		let mut active = cars.with(&Params::new());
		active.set_options(TableOptions::new().remote(RemoteOptions::new().update("hotBox")));

		assert_eq!(active.remote_options().update.as_deref(), Some("hotBox"));
		assert_eq!(cars.remote_options().update, None);
	}

	#[rstest]
	fn test_empty_options_keep_sharing(cars: Wrapper) {
		let mut active = cars.with(&Params::new());
		active.set_options(TableOptions::new());
		assert!(Arc::ptr_eq(&active.remote_options, &cars.remote_options));
	}

	#[rstest]
	fn test_remote_options_with_url(cars: Wrapper) {
		let remote = cars.remote_options_with_url("/cars?x=1");
		assert_eq!(remote.url.as_deref(), Some("/cars?x=1"));
		assert_eq!(remote.method.as_deref(), Some("get"));
	}

	#[rstest]
	fn test_accessors_without_specs() {
		let table = Wrapper::new("trucks");
		assert_eq!(table.conditions(), None);
		assert!(table.filter_options().is_empty());
		assert!(table.sort_options().is_empty());
	}
}
