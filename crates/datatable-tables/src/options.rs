//! Rendering option groups
//!
//! A table carries four independent groups of options:
//!
//! - [`RemoteOptions`]: AJAX transport (target url, method, element to
//!   update, completion hook)
//! - [`HtmlOptions`]: DOM attributes, including the filter form's id
//! - [`UrlOptions`]: base parameters of every generated link
//! - [`OtherOptions`]: everything else, notably the `with` list of request
//!   parameters passed through from outside the table's namespace
//!
//! Options are configuration, not state: setting them fills only what is
//! still unset (see [`FillMissing`]).

use datatable_params::{ParamValue, Params};
use indexmap::IndexMap;

/// Free-form attribute map.
pub type Attributes = IndexMap<String, String>;

/// Reverse merge: keep every value already set, take the rest from `supplied`.
pub trait FillMissing {
	/// Fills every unset field of `self` from `supplied`.
	fn fill_missing(&mut self, supplied: &Self);
}

fn fill<T: Clone>(slot: &mut Option<T>, supplied: &Option<T>) {
	if slot.is_none() {
		slot.clone_from(supplied);
	}
}

fn fill_attributes(attributes: &mut Attributes, supplied: &Attributes) {
	for (key, value) in supplied {
		attributes.entry(key.clone()).or_insert_with(|| value.clone());
	}
}

fn attributes_to_params(attributes: &Attributes) -> Params {
	attributes.iter().map(|(key, value)| (key.as_str(), value.as_str())).collect()
}

/// AJAX transport options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOptions {
	/// Remote url to submit to.
	pub url: Option<String>,
	/// HTTP method of the submission.
	pub method: Option<String>,
	/// DOM id of the element replaced with the response.
	pub update: Option<String>,
	/// Script hook run when the request completes.
	pub complete: Option<String>,
	/// Any other transport option.
	pub extra: Attributes,
}

impl RemoteOptions {
	/// Creates an empty option group.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the remote url.
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	/// Sets the HTTP method.
	pub fn method(mut self, method: impl Into<String>) -> Self {
		self.method = Some(method.into());
		self
	}

	/// Sets the element to update.
	pub fn update(mut self, target: impl Into<String>) -> Self {
		self.update = Some(target.into());
		self
	}

	/// Sets the completion hook.
	pub fn complete(mut self, hook: impl Into<String>) -> Self {
		self.complete = Some(hook.into());
		self
	}

	/// Sets any other transport option.
	pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Flat view of the options that are set.
	pub fn to_params(&self) -> Params {
		let mut params = Params::new();
		for (key, value) in [
			("url", &self.url),
			("method", &self.method),
			("update", &self.update),
			("complete", &self.complete),
		] {
			if let Some(value) = value {
				params.insert(key, value);
			}
		}
		params.merge(&attributes_to_params(&self.extra));
		params
	}
}

impl FillMissing for RemoteOptions {
	fn fill_missing(&mut self, supplied: &Self) {
		fill(&mut self.url, &supplied.url);
		fill(&mut self.method, &supplied.method);
		fill(&mut self.update, &supplied.update);
		fill(&mut self.complete, &supplied.complete);
		fill_attributes(&mut self.extra, &supplied.extra);
	}
}

/// DOM attribute options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlOptions {
	/// DOM id of the filter form.
	pub form_id: Option<String>,
	/// Introductory label of the filter form.
	pub label: Option<String>,
	/// Attributes of each sort header cell.
	pub sort_cell: Attributes,
	/// Attributes of each filter select.
	pub select: Attributes,
	/// Any other attribute.
	pub extra: Attributes,
}

impl HtmlOptions {
	/// Creates an empty option group.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the filter form's DOM id.
	pub fn form_id(mut self, id: impl Into<String>) -> Self {
		self.form_id = Some(id.into());
		self
	}

	/// Sets the filter form's label.
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Adds an attribute to every sort header cell.
	pub fn sort_cell_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.sort_cell.insert(key.into(), value.into());
		self
	}

	/// Adds an attribute to every filter select.
	pub fn select_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.select.insert(key.into(), value.into());
		self
	}

	/// Sets any other attribute.
	pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Flat view of the options that are set; grouped attributes stay nested.
	pub fn to_params(&self) -> Params {
		let mut params = Params::new();
		if let Some(id) = &self.form_id {
			params.insert("form", Params::from([("id", id)]));
		}
		if let Some(label) = &self.label {
			params.insert("label", label);
		}
		if !self.sort_cell.is_empty() {
			params.insert("sort", attributes_to_params(&self.sort_cell));
		}
		if !self.select.is_empty() {
			params.insert("select", attributes_to_params(&self.select));
		}
		params.merge(&attributes_to_params(&self.extra));
		params
	}
}

impl FillMissing for HtmlOptions {
	fn fill_missing(&mut self, supplied: &Self) {
		fill(&mut self.form_id, &supplied.form_id);
		fill(&mut self.label, &supplied.label);
		fill_attributes(&mut self.sort_cell, &supplied.sort_cell);
		fill_attributes(&mut self.select, &supplied.select);
		fill_attributes(&mut self.extra, &supplied.extra);
	}
}

/// Base parameters of every link the table generates, e.g. the target
/// controller and action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
	/// The parameters.
	pub params: Params,
}

impl UrlOptions {
	/// Creates an empty option group.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a link parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.params.insert(key, value);
		self
	}

	/// The link parameters.
	pub fn to_params(&self) -> Params {
		self.params.clone()
	}
}

impl FillMissing for UrlOptions {
	fn fill_missing(&mut self, supplied: &Self) {
		self.params.fill_missing(&supplied.params);
	}
}

/// Options that belong to no other group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtherOptions {
	/// Request parameters outside the table's namespace to carry along.
	pub with: Option<Vec<String>>,
	/// Anything else.
	pub extra: Attributes,
}

impl OtherOptions {
	/// Creates an empty option group.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the pass-through parameter names.
	pub fn with<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.with = Some(keys.into_iter().map(Into::into).collect());
		self
	}

	/// Sets any other option.
	pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Pass-through parameter names, empty when unset.
	pub fn with_keys(&self) -> &[String] {
		self.with.as_deref().unwrap_or_default()
	}

	/// Flat view of the options that are set.
	pub fn to_params(&self) -> Params {
		let mut params = attributes_to_params(&self.extra);
		if let Some(with) = &self.with {
			params.insert("with", with.clone());
		}
		params
	}
}

impl FillMissing for OtherOptions {
	fn fill_missing(&mut self, supplied: &Self) {
		fill(&mut self.with, &supplied.with);
		fill_attributes(&mut self.extra, &supplied.extra);
	}
}

/// All four option groups, as supplied by a caller.
///
/// # Examples
///
/// ```
/// use datatable_tables::options::{RemoteOptions, TableOptions};
///
/// let options = TableOptions::new()
///     .remote(RemoteOptions::new().url("/cars/hottest_sellers").update("hotBox"))
///     .pass_through(["tab"]);
///
/// assert_eq!(options.other.with_keys(), ["tab".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
	/// AJAX transport options.
	pub remote: RemoteOptions,
	/// DOM attribute options.
	pub html: HtmlOptions,
	/// Link base parameters.
	pub url: UrlOptions,
	/// Everything else.
	pub other: OtherOptions,
}

impl TableOptions {
	/// Creates an empty set of options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the AJAX transport options.
	pub fn remote(mut self, remote: RemoteOptions) -> Self {
		self.remote = remote;
		self
	}

	/// Sets the DOM attribute options.
	pub fn html(mut self, html: HtmlOptions) -> Self {
		self.html = html;
		self
	}

	/// Sets the link base parameters.
	pub fn url(mut self, url: UrlOptions) -> Self {
		self.url = url;
		self
	}

	/// Sets the remaining options.
	pub fn other(mut self, other: OtherOptions) -> Self {
		self.other = other;
		self
	}

	/// Names request parameters to carry along with the table's own.
	pub fn pass_through<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.other = self.other.with(keys);
		self
	}

	/// Merges the four groups into one flat map.
	///
	/// Later groups win on key collisions: remote, then html, then url,
	/// then other.
	pub fn to_params(&self) -> Params {
		merge_groups(&self.remote, &self.html, &self.url, &self.other)
	}
}

pub(crate) fn merge_groups(
	remote: &RemoteOptions,
	html: &HtmlOptions,
	url: &UrlOptions,
	other: &OtherOptions,
) -> Params {
	remote
		.to_params()
		.merged(&html.to_params())
		.merged(&url.to_params())
		.merged(&other.to_params())
}
