//! Integration tests for declaring tables and activating them per request

mod fixtures;

use datatable_params::Params;
use datatable_tables::options::TableOptions;
use datatable_tables::settings::{SettingsError, TableSettings};
use datatable_tables::{RenderMode, TableError, TableRegistry, Wrapper};
use fixtures::*;
use rstest::*;
use std::io::Write;
use std::sync::Arc;

#[rstest]
fn test_requests_are_independent(registry: TableRegistry) {
	let first = Params::from([("cars", Params::from([("sort_key", "year")]))]);
	let second = Params::from([("cars", Params::from([("color", "Black")]))]);

	let mut one = registry.begin_request(first);
	let mut two = registry.begin_request(second);
	let year = one.activate("cars", TableOptions::new()).unwrap().clone();
	let black = two.activate("cars", TableOptions::new()).unwrap().clone();

	assert_eq!(year.sort().unwrap().selected().key(), "year");
	assert!(year.conditions().unwrap().is_empty());
	assert_eq!(black.sort().unwrap().selected().key(), "make");
	assert_eq!(
		black.conditions().unwrap().get("color").map(String::as_str),
		Some("Black")
	);
}

#[rstest]
fn test_reactivation_starts_from_template(registry: TableRegistry, hot_sellers: TableOptions) {
	let mut context = registry.begin_request(Params::new());
	context.activate("cars", hot_sellers).unwrap();
	let again = context.activate("cars", TableOptions::new()).unwrap();

	assert_eq!(again.remote_options().url, None);
	assert_eq!(context.activated().count(), 1);
}

#[rstest]
fn test_templates_are_shared_across_threads(registry: TableRegistry) {
	let registry = Arc::new(registry);
	let handles: Vec<_> = ["Blue", "Red", "Silver"]
		.into_iter()
		.map(|color| {
			let registry = Arc::clone(&registry);
			std::thread::spawn(move || {
				let request = Params::from([("cars", Params::from([("color", color)]))]);
				let mut context = registry.begin_request(request);
				let cars = context.activate("cars", TableOptions::new()).unwrap();
				cars.conditions().unwrap().get("color").cloned()
			})
		})
		.collect();

	let colors: Vec<Option<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	assert_eq!(
		colors,
		[Some("Blue".to_string()), Some("Red".to_string()), Some("Silver".to_string())]
	);
	assert_eq!(registry.template("cars").unwrap().params(), &Params::new());
}

#[rstest]
fn test_undeclared_table_message(registry: TableRegistry) {
	let mut context = registry.begin_request(Params::new());
	let error = context.filter_for("trucks", TableOptions::new()).unwrap_err();
	assert_eq!(error.to_string(), "Data table not declared: trucks");
}

#[rstest]
fn test_filter_for_without_filter_is_none() {
	let mut registry = TableRegistry::new();
	registry
		.declare("cars", |cars| {
			cars.sort_spec(car_sort())?;
			Ok(())
		})
		.unwrap();

	let mut context = registry.begin_request(Params::new());
	assert!(context.filter_for("cars", TableOptions::new()).unwrap().is_none());
	assert!(context.get("cars").is_some());
}

#[rstest]
fn test_declaration_errors_propagate() {
	let mut registry = TableRegistry::new();
	let result = registry.declare("cars", |cars| {
		cars.filter_spec(
			datatable_tables::FilterConfig::builder()
				.add_element("color", |e| e.add_option("Blue"))
				.build(),
		)?;
		Ok(())
	});

	assert!(matches!(result, Err(TableError::MissingFilterDefault(field)) if field == "color"));
	assert!(registry.get("cars").is_none());
}

#[rstest]
fn test_register_prebuilt_table(cars: Wrapper) {
	let mut registry = TableRegistry::new();
	let template = registry.register(cars);

	assert_eq!(template.name(), "cars");
	assert!(Arc::ptr_eq(&template, registry.template("cars").unwrap()));
}

#[rstest]
fn test_settings_file_applies_to_declared_tables() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "mode = \"standard\"\nform_id = \"carFilter\"\nremote_method = \"post\"").unwrap();
	let settings = TableSettings::from_file(file.path()).unwrap();

	let mut registry = TableRegistry::with_settings(settings);
	registry
		.declare("cars", |cars| {
			cars.filter_spec(car_filter())?;
			Ok(())
		})
		.unwrap();

	let mut context = registry.begin_request(Params::new());
	let cars = context.activate("cars", TableOptions::new()).unwrap();
	assert_eq!(cars.mode(), RenderMode::Standard);
	assert_eq!(cars.form_id(), "carFilter");
	assert_eq!(cars.remote_method(), "post");
}

#[rstest]
fn test_registry_from_settings_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "mode = \"standard\"").unwrap();

	let registry = TableRegistry::from_settings_file(file.path()).unwrap();
	assert_eq!(registry.settings().mode, RenderMode::Standard);
	assert!(registry.is_empty());
}

#[rstest]
fn test_registry_from_malformed_settings_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "mode = [").unwrap();

	let error = TableRegistry::from_settings_file(file.path()).unwrap_err();
	assert!(matches!(error, TableError::Settings(SettingsError::Toml(_))));
	assert!(!error.to_string().is_empty());
}
