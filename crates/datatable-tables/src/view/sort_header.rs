//! Sortable column headers

use super::titleize;
use crate::error::Result;
use crate::options::{Attributes, RemoteOptions};
use crate::sort::{SORT_KEY_PARAM, SORT_ORDER_PARAM, SortOption};
use crate::wrapper::{PAGE_PARAM, RenderMode, Wrapper};
use datatable_params::{Params, scoped_key};

/// Column headers of an activated table.
#[derive(Debug, Clone, Copy)]
pub struct SortHeader<'w> {
	table: &'w Wrapper,
}

impl<'w> SortHeader<'w> {
	/// Describes the headers of `table`, which should be activated.
	pub fn new(table: &'w Wrapper) -> Self {
		Self { table }
	}

	/// The table the headers belong to.
	pub fn table(&self) -> &'w Wrapper {
		self.table
	}

	/// Rendering mode of the table.
	pub fn mode(&self) -> RenderMode {
		self.table.mode()
	}

	/// Header of the column sorted by `key`, captioned after the key.
	///
	/// `None` when the table has no sort or `key` is not one of its options.
	pub fn column(&self, key: &str) -> Option<SortColumn<'w>> {
		self.column_with_caption(key, titleize(key))
	}

	/// Header of the column sorted by `key` with an explicit caption.
	pub fn column_with_caption(&self, key: &str, caption: impl Into<String>) -> Option<SortColumn<'w>> {
		let option = self.table.sort()?.option_by_key(key)?;
		Some(SortColumn::new(self.table, option, caption.into()))
	}

	/// Headers of every sort option in declaration order.
	pub fn columns(&self) -> Vec<SortColumn<'w>> {
		self.table
			.sort()
			.map(|sort| {
				sort.options()
					.iter()
					.map(|option| SortColumn::new(self.table, option, titleize(option.key())))
					.collect()
			})
			.unwrap_or_default()
	}
}

/// One sortable column header.
///
/// Following its link sorts the table by the column; on the column already
/// sorted, the link flips the order. The link keeps the rest of the table
/// state except the page: a page number addresses rows of the current
/// ordering, so a new sort starts on the first page.
#[derive(Debug, Clone)]
pub struct SortColumn<'w> {
	table: &'w Wrapper,
	/// Sort key of the column.
	pub key: String,
	/// Text of the header.
	pub caption: String,
	/// Path of the sort indicator image.
	pub icon: String,
	/// Alternative text of the indicator image.
	pub icon_alt: String,
	/// Parameters of the header's link.
	pub link_params: Params,
	/// Attributes of the header cell.
	pub cell_attributes: Attributes,
}

impl<'w> SortColumn<'w> {
	fn new(table: &'w Wrapper, option: &SortOption, caption: String) -> Self {
		let proposed = Params::from([
			(SORT_KEY_PARAM, option.key()),
			(SORT_ORDER_PARAM, option.other_order().as_str()),
		]);
		let mut link_params = table.params_for_url(&proposed);
		link_params.remove(&scoped_key(table.name(), PAGE_PARAM));
		Self {
			table,
			key: option.key().to_string(),
			icon: table.settings().icons.path_for(option.current_order()),
			icon_alt: format!("Sort by {caption}"),
			caption,
			link_params,
			cell_attributes: table.html_options().sort_cell.clone(),
		}
	}

	/// Link target: `base` followed by the encoded link parameters.
	///
	/// # Errors
	///
	/// Fails if the parameters cannot be encoded.
	pub fn href(&self, base: &str) -> Result<String> {
		let query = self.link_params.to_query_string()?;
		if query.is_empty() {
			return Ok(base.to_string());
		}
		let separator = if base.contains('?') { '&' } else { '?' };
		Ok(format!("{base}{separator}{query}"))
	}

	/// Remote options of the link in AJAX mode; `None` in standard mode.
	///
	/// # Errors
	///
	/// Fails if the parameters cannot be encoded.
	pub fn remote_options(&self, base: &str) -> Result<Option<RemoteOptions>> {
		match self.table.mode() {
			RenderMode::Standard => Ok(None),
			RenderMode::Ajax => Ok(Some(self.table.remote_options_with_url(self.href(base)?))),
		}
	}
}
