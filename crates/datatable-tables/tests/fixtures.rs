//! Common test fixtures for datatable-tables tests

use datatable_tables::filter::FilterConfig;
use datatable_tables::options::{RemoteOptions, TableOptions};
use datatable_tables::sort::{SortConfig, SortOrder};
use datatable_tables::{TableRegistry, Wrapper};
use rstest::*;

/// Sort declaration of the car table: `make` ascending by default, `year`
/// descending.
pub fn car_sort() -> SortConfig {
	SortConfig::builder()
		.add_default("make")
		.add_option("year", SortOrder::Desc)
		.build()
}

/// Filter declaration of the car table: one `color` element.
pub fn car_filter() -> FilterConfig {
	FilterConfig::builder()
		.add_element("color", |e| {
			e.add_default("All")
				.add_option("Blue")
				.add_option("Red")
				.add_option("Silver")
				.add_option("Black")
				.add_option("Other")
		})
		.build()
}

/// Fixture providing the fully declared car table template
#[fixture]
pub fn cars() -> Wrapper {
	let mut cars = Wrapper::new("cars");
	cars.sort_spec(car_sort()).unwrap();
	cars.filter_spec(car_filter()).unwrap();
	cars
}

/// Fixture providing a registry with the car table declared
#[fixture]
pub fn registry() -> TableRegistry {
	let mut registry = TableRegistry::new();
	registry
		.declare("cars", |cars| {
			cars.sort_spec(car_sort())?;
			cars.filter_spec(car_filter())?;
			Ok(())
		})
		.unwrap();
	registry
}

/// Fixture providing the options a page hands to the car table
#[fixture]
pub fn hot_sellers() -> TableOptions {
	TableOptions::new()
		.remote(
			RemoteOptions::new()
				.url("/cars/hottest_sellers")
				.update("hotBox"),
		)
		.pass_through(["tab"])
}
