//! Render-ready view models
//!
//! [`SortHeader`] and [`FilterForm`] describe what a renderer needs to draw a
//! table's sortable column headers and its filter form: captions, icons,
//! link parameters, control names, ids and selected values. They produce no
//! markup themselves.

mod filter_form;
mod sort_header;

pub use filter_form::{FilterForm, FilterSelect, HiddenField};
pub use sort_header::{SortColumn, SortHeader};

/// Turns a parameter key into a column caption.
///
/// A trailing `_id` is dropped, underscores become spaces and every word is
/// capitalized: `created_at` becomes `Created At`, `make_id` becomes `Make`.
pub fn titleize(key: &str) -> String {
	let key = key.strip_suffix("_id").filter(|rest| !rest.is_empty()).unwrap_or(key);
	key.split('_')
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// DOM id derived from a control name:
/// `cars[color]` becomes `cars_color`.
pub(crate) fn dom_id(name: &str) -> String {
	name.replace("][", "_").replace(['[', ']'], "_").trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("make", "Make")]
	#[case("created_at", "Created At")]
	#[case("make_id", "Make")]
	#[case("id", "Id")]
	#[case("year", "Year")]
	fn test_titleize(#[case] key: &str, #[case] caption: &str) {
		assert_eq!(titleize(key), caption);
	}

	#[rstest]
	#[case("cars[color]", "cars_color")]
	#[case("cars[filter][color]", "cars_filter_color")]
	#[case("tab", "tab")]
	fn test_dom_id(#[case] name: &str, #[case] id: &str) {
		assert_eq!(dom_id(name), id);
	}
}
