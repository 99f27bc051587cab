//! Filter forms

use super::dom_id;
use crate::options::{Attributes, RemoteOptions};
use crate::sort::{SORT_KEY_PARAM, SORT_ORDER_PARAM};
use crate::wrapper::{RenderMode, Wrapper};
use datatable_params::{Params, scoped_key};

/// The filter form of an activated table.
///
/// Submitting it sends every filter element under the table's namespace,
/// together with the current sort and the pass-through parameters, so that
/// filtering keeps the rest of the table state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
	/// DOM id of the form.
	pub form_id: String,
	/// Submission style.
	pub mode: RenderMode,
	/// Introductory label, if configured.
	pub label: Option<String>,
	/// Parameters of the standard submission target.
	pub action_params: Params,
	/// Remote submission options; only in AJAX mode.
	pub remote: Option<RemoteOptions>,
	/// One select per filter element, in declaration order.
	pub selects: Vec<FilterSelect>,
	/// State carried along with the selections.
	pub hidden_fields: Vec<HiddenField>,
	/// Whether a submit button is needed; AJAX forms submit on change.
	pub submit: bool,
}

impl FilterForm {
	/// Describes the filter form of `table`; `None` when it has no filter.
	pub fn from_table(table: &Wrapper) -> Option<Self> {
		let filter = table.filter()?;
		let select_attributes = &table.html_options().select;

		let selects = filter
			.elements()
			.iter()
			.map(|element| {
				let name = scoped_key(table.name(), element.field());
				FilterSelect {
					id: dom_id(&name),
					name,
					options: element
						.selections()
						.iter()
						.map(|selection| (selection.label().to_string(), selection.value().to_string()))
						.collect(),
					selected: element.selected().value().to_string(),
					attributes: select_attributes.clone(),
				}
			})
			.collect();

		let mut hidden_fields = Vec::new();
		if table.sort().is_some() {
			let sort = table.sort_options();
			for param in [SORT_KEY_PARAM, SORT_ORDER_PARAM] {
				hidden_fields.push(HiddenField {
					name: scoped_key(table.name(), param),
					value: sort.get_str(param).unwrap_or_default().to_string(),
					id: format!("{}_{}", table.name(), param),
				});
			}
		}
		for key in table.other_options().with_keys() {
			hidden_fields.push(HiddenField {
				name: key.clone(),
				value: table.params().get_str(key).unwrap_or_default().to_string(),
				id: format!("{}_{}", table.name(), key),
			});
		}

		let mode = table.mode();
		let remote = match mode {
			RenderMode::Ajax => {
				let mut remote = table.remote_options().clone();
				remote.method = Some(table.remote_method().to_string());
				Some(remote)
			}
			RenderMode::Standard => None,
		};

		Some(Self {
			form_id: table.form_id().to_string(),
			mode,
			label: table.html_options().label.clone(),
			action_params: table.url_options().to_params(),
			remote,
			selects,
			hidden_fields,
			submit: mode == RenderMode::Standard,
		})
	}

	/// Looks up the select of a filter field by its control name.
	pub fn select(&self, name: &str) -> Option<&FilterSelect> {
		self.selects.iter().find(|select| select.name == name)
	}
}

/// A select control for one filter element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelect {
	/// Control name, `table[field]`.
	pub name: String,
	/// DOM id, `table_field`.
	pub id: String,
	/// `(label, value)` of every selection.
	pub options: Vec<(String, String)>,
	/// Value of the selected option.
	pub selected: String,
	/// Extra attributes from the table's html options.
	pub attributes: Attributes,
}

/// A hidden input carrying state the form does not edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
	/// Control name.
	pub name: String,
	/// Submitted value.
	pub value: String,
	/// DOM id.
	pub id: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter::FilterConfig;
	use crate::options::{HtmlOptions, TableOptions};
	use crate::sort::{SortConfig, SortOrder};
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
		cars.filter_spec(
			FilterConfig::builder()
				.add_element("color", |e| e.add_default("All").add_option("Blue").add_option("Red"))
				.build(),
		)
		.unwrap();
		cars
	}

	#[rstest]
	fn test_no_filter_no_form() {
		assert!(FilterForm::from_table(&Wrapper::new("cars")).is_none());
	}

	#[rstest]
	fn test_selects_follow_request(cars: Wrapper) {
		let request = Params::from([("cars", Params::from([("color", "Red")]))]);
		let form = FilterForm::from_table(&cars.with(&request)).unwrap();

		let color = form.select("cars[color]").unwrap();
		assert_eq!(color.id, "cars_color");
		assert_eq!(color.selected, "Red");
		assert_eq!(color.options.len(), 3);
		assert_eq!(color.options[0], ("All".to_string(), "All".to_string()));
	}

	#[rstest]
	fn test_hidden_fields_carry_sort_and_pass_through(cars: Wrapper) {
		let mut request = Params::from([("cars", Params::from([("sort_key", "year")]))]);
		request.insert("tab", "3");
		let mut active = cars.with(&request);
		active.set_options(TableOptions::new().pass_through(["tab", "region"]));

		let form = FilterForm::from_table(&active).unwrap();
		let fields: Vec<(&str, &str, &str)> = form
			.hidden_fields
			.iter()
			.map(|f| (f.name.as_str(), f.value.as_str(), f.id.as_str()))
			.collect();
		assert_eq!(
			fields,
			[
				("cars[sort_key]", "year", "cars_sort_key"),
				("cars[sort_order]", "desc", "cars_sort_order"),
				("tab", "3", "cars_tab"),
				("region", "", "cars_region"),
			]
		);
	}

	#[rstest]
	fn test_mode_controls_submission(mut cars: Wrapper) {
		cars.set_options(TableOptions::new().html(HtmlOptions::new().form_id("carFilter")));

		let ajax = FilterForm::from_table(&cars).unwrap();
		assert_eq!(ajax.form_id, "carFilter");
		assert!(!ajax.submit);
		assert_eq!(ajax.remote.unwrap().method.as_deref(), Some("get"));

		cars.set_mode(RenderMode::Standard);
		let standard = FilterForm::from_table(&cars).unwrap();
		assert!(standard.submit);
		assert!(standard.remote.is_none());
	}
}
