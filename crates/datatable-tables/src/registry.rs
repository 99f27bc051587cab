//! Table registry and request context
//!
//! Tables are declared once into a [`TableRegistry`], which keeps the template
//! wrappers for the lifetime of the application. Each incoming request opens a
//! [`RequestContext`] with [`TableRegistry::begin_request`]; the context owns
//! the request parameters and every table activated while handling the
//! request, and is torn down with [`RequestContext::finish`] or by dropping it.
//!
//! Templates are shared as `Arc<Wrapper>` and never mutated after
//! declaration, so concurrent requests need no synchronization.

use crate::error::{Result, TableError};
use crate::options::TableOptions;
use crate::settings::TableSettings;
use crate::view::{FilterForm, SortHeader};
use crate::wrapper::Wrapper;
use datatable_params::Params;
use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;

/// Declaration-time store of template tables, keyed by name.
///
/// # Examples
///
/// ```
/// use datatable_params::Params;
/// use datatable_tables::TableRegistry;
/// use datatable_tables::options::TableOptions;
/// use datatable_tables::sort::{SortConfig, SortOrder};
///
/// let mut registry = TableRegistry::new();
/// registry
///     .declare("cars", |cars| {
///         cars.sort_spec(
///             SortConfig::builder()
///                 .add_default("make")
///                 .add_option("year", SortOrder::Desc)
///                 .build(),
///         )?;
///         Ok(())
///     })
///     .unwrap();
///
/// let request = Params::from_query_string("cars%5Bsort_key%5D=year").unwrap();
/// let mut context = registry.begin_request(request);
/// let cars = context.activate("cars", TableOptions::new()).unwrap();
/// assert_eq!(cars.sort().unwrap().selected().key(), "year");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
	settings: Arc<TableSettings>,
	tables: IndexMap<String, Arc<Wrapper>>,
}

impl TableRegistry {
	/// Creates an empty registry with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry whose tables are declared with `settings`.
	pub fn with_settings(settings: TableSettings) -> Self {
		Self {
			settings: Arc::new(settings),
			tables: IndexMap::new(),
		}
	}

	/// Creates an empty registry with settings read from a TOML file.
	///
	/// # Errors
	///
	/// Returns [`TableError::Settings`] if the file cannot be read or parsed.
	pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::with_settings(TableSettings::from_file(path)?))
	}

	/// Settings shared by every table declared here.
	pub fn settings(&self) -> &TableSettings {
		&self.settings
	}

	/// Declares a table, replacing any table of the same name.
	///
	/// `configure` receives the fresh wrapper to attach its sort, filter and
	/// options to.
	///
	/// # Errors
	///
	/// Returns the first error of `configure`; nothing is registered then.
	pub fn declare<F>(&mut self, name: impl Into<String>, configure: F) -> Result<Arc<Wrapper>>
	where
		F: FnOnce(&mut Wrapper) -> Result<()>,
	{
		let mut table = Wrapper::with_settings(name, Arc::clone(&self.settings));
		configure(&mut table)?;
		Ok(self.register(table))
	}

	/// Registers an already built table under its own name.
	pub fn register(&mut self, table: Wrapper) -> Arc<Wrapper> {
		let table = Arc::new(table);
		let replaced = self
			.tables
			.insert(table.name().to_string(), Arc::clone(&table))
			.is_some();
		tracing::debug!(
			table = table.name(),
			sorted = table.sort().is_some(),
			filtered = table.filter().is_some(),
			replaced,
			"declared data table"
		);
		table
	}

	/// Looks up a template.
	pub fn get(&self, name: &str) -> Option<&Arc<Wrapper>> {
		self.tables.get(name)
	}

	/// Looks up a template that must exist.
	///
	/// # Errors
	///
	/// Returns [`TableError::UndeclaredTable`] for an unknown name.
	pub fn template(&self, name: &str) -> Result<&Arc<Wrapper>> {
		self.get(name)
			.ok_or_else(|| TableError::UndeclaredTable(name.to_string()))
	}

	/// Names of the declared tables in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	/// Number of declared tables.
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	/// Returns true if no table was declared.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Opens the context of one request.
	pub fn begin_request(&self, params: Params) -> RequestContext<'_> {
		RequestContext {
			registry: self,
			params,
			activated: IndexMap::new(),
		}
	}
}

/// Tables activated for a single request.
///
/// Created per request and discarded after the response; nothing in it is
/// visible to other requests.
#[derive(Debug)]
pub struct RequestContext<'r> {
	registry: &'r TableRegistry,
	params: Params,
	activated: IndexMap<String, Wrapper>,
}

impl<'r> RequestContext<'r> {
	/// Registry this request reads its templates from.
	pub fn registry(&self) -> &'r TableRegistry {
		self.registry
	}

	/// Raw parameters of the request.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Activates a declared table against the request parameters and fills
	/// its unset options from `options`.
	///
	/// Activating the same table again starts over from its template.
	///
	/// # Errors
	///
	/// Returns [`TableError::UndeclaredTable`] for an unknown name.
	pub fn activate(&mut self, name: &str, options: TableOptions) -> Result<&Wrapper> {
		let mut table = self.registry.template(name)?.with(&self.params);
		table.set_options(options);
		tracing::debug!(
			table = name,
			sort_key = table.sort().map(|sort| sort.selected().key()),
			conditions = table.conditions().map_or(0, |conditions| conditions.len()),
			"activated data table"
		);
		self.activated.insert(name.to_string(), table);
		Ok(&self.activated[name])
	}

	/// A table activated during this request.
	pub fn get(&self, name: &str) -> Option<&Wrapper> {
		self.activated.get(name)
	}

	/// Every table activated so far, in activation order.
	pub fn activated(&self) -> impl Iterator<Item = &Wrapper> {
		self.activated.values()
	}

	/// Activates `name` and describes its sortable column headers.
	///
	/// # Errors
	///
	/// Returns [`TableError::UndeclaredTable`] for an unknown name.
	pub fn sort_header(&mut self, name: &str, options: TableOptions) -> Result<SortHeader<'_>> {
		let table = self.activate(name, options)?;
		Ok(SortHeader::new(table))
	}

	/// Activates `name` and describes its filter form; `None` when the table
	/// has no filter.
	///
	/// # Errors
	///
	/// Returns [`TableError::UndeclaredTable`] for an unknown name.
	pub fn filter_for(&mut self, name: &str, options: TableOptions) -> Result<Option<FilterForm>> {
		let table = self.activate(name, options)?;
		Ok(FilterForm::from_table(table))
	}

	/// Ends the request, handing back the activated tables.
	pub fn finish(self) -> IndexMap<String, Wrapper> {
		tracing::trace!(tables = self.activated.len(), "finished request");
		self.activated
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sort::{SortConfig, SortOrder};
	use rstest::*;

	#[fixture]
	fn registry() -> TableRegistry {
		let mut registry = TableRegistry::new();
		registry
			.declare("cars", |cars| {
				cars.sort_spec(
					SortConfig::builder()
						.add_default("make")
						.add_option("year", SortOrder::Desc)
						.build(),
				)?;
				Ok(())
			})
			.unwrap();
		registry
	}

	#[rstest]
	fn test_declare_and_lookup(registry: TableRegistry) {
		assert_eq!(registry.len(), 1);
		assert!(!registry.is_empty());
		assert_eq!(registry.names().collect::<Vec<_>>(), ["cars"]);
		assert!(registry.get("cars").is_some());
		assert!(registry.get("trucks").is_none());
	}

	#[rstest]
	fn test_undeclared_table(registry: TableRegistry) {
		let error = registry.template("trucks").unwrap_err();
		assert!(matches!(&error, TableError::UndeclaredTable(name) if name == "trucks"));

		let mut context = registry.begin_request(Params::new());
		assert!(context.activate("trucks", TableOptions::new()).is_err());
	}

	#[rstest]
	fn test_failed_declaration_registers_nothing() {
		let mut registry = TableRegistry::new();
		let result = registry.declare("cars", |cars| {
			cars.sort_spec(SortConfig::builder().build())?;
			Ok(())
		});

		assert!(matches!(result, Err(TableError::EmptySort)));
		assert!(registry.is_empty());
	}

	#[rstest]
	fn test_settings_file_errors_are_table_errors() {
		let error = TableRegistry::from_settings_file("/nonexistent/datatable.toml").unwrap_err();
		assert!(matches!(
			error,
			TableError::Settings(crate::settings::SettingsError::Io(_))
		));
	}

	#[rstest]
	fn test_redeclare_replaces(mut registry: TableRegistry) {
		registry.declare("cars", |_| Ok(())).unwrap();
		assert_eq!(registry.len(), 1);
		assert!(registry.template("cars").unwrap().sort().is_none());
	}

	#[rstest]
	fn test_activation_leaves_template_untouched(registry: TableRegistry) {
		let template = Arc::clone(registry.template("cars").unwrap());
		let request = Params::from([("cars", Params::from([("sort_key", "year")]))]);

		let mut context = registry.begin_request(request);
		let cars = context.activate("cars", TableOptions::new().pass_through(["tab"])).unwrap();
		assert_eq!(cars.sort().unwrap().selected().key(), "year");

		let stored = registry.template("cars").unwrap();
		assert_eq!(**stored, *template);
		assert_eq!(stored.sort().unwrap().selected().key(), "make");
		assert!(stored.other_options().with_keys().is_empty());
	}

	#[rstest]
	fn test_finish_returns_activated(registry: TableRegistry) {
		let mut context = registry.begin_request(Params::new());
		context.activate("cars", TableOptions::new()).unwrap();
		assert!(context.get("cars").is_some());
		assert_eq!(context.activated().count(), 1);

		let tables = context.finish();
		assert_eq!(tables.keys().collect::<Vec<_>>(), ["cars"]);
	}
}
