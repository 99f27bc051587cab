//! A single sortable key

use super::SortOrder;

/// One sortable key of a [`Sort`](super::Sort).
///
/// `current_order` is only set on the option the sort has selected; every
/// other option reports `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
	key: String,
	default_order: SortOrder,
	current_order: Option<SortOrder>,
}

impl SortOption {
	pub(crate) fn new(key: impl Into<String>, default_order: SortOrder) -> Self {
		Self {
			key: key.into(),
			default_order,
			current_order: None,
		}
	}

	/// The key sent as `sort_key`.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Order used when this option is selected without an explicit order.
	pub fn default_order(&self) -> SortOrder {
		self.default_order
	}

	/// Order currently applied, or `None` if another option is selected.
	pub fn current_order(&self) -> Option<SortOrder> {
		self.current_order
	}

	/// The order a click on this option's link should request.
	///
	/// Opposite of the current order, or of the default order when the option
	/// is not selected, so that repeated clicks toggle.
	pub fn other_order(&self) -> SortOrder {
		self.current_order.unwrap_or(self.default_order).opposite()
	}

	/// Returns true if this option is the selected one.
	pub fn is_selected(&self) -> bool {
		self.current_order.is_some()
	}

	pub(crate) fn select(&mut self, order: Option<SortOrder>) {
		self.current_order = Some(order.unwrap_or(self.default_order));
	}

	pub(crate) fn clear(&mut self) {
		self.current_order = None;
	}
}
