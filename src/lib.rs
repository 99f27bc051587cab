//! # datatable
//!
//! Sort and filter state for web data tables, carried from one page load to
//! the next through request parameters.
//!
//! A table is declared once with the keys it can be sorted by and the fields
//! it can be filtered on. Every request then activates the declaration
//! against its parameters, which yields the selected sort, the query
//! conditions of the active filters, and the parameters every sort link and
//! filter form must carry to keep the table's state.
//!
//! ## Crates
//!
//! - [`params`]: nested request parameters, bracketed keys and query strings
//! - `tables` (re-exported at the root): sorts, filters, option groups,
//!   wrappers, the table registry and view models
//!
//! ## Feature Flags
//!
//! - `tables` (default) - Table declarations and reconciliation. Without it
//!   only the parameter model is available.
//!
//! ## Quick Example
//!
//! ```rust
//! use datatable::prelude::*;
//!
//! let mut registry = TableRegistry::new();
//! registry
//!     .declare("cars", |cars| {
//!         cars.sort_spec(
//!             SortConfig::builder()
//!                 .add_default("make")
//!                 .add_option("year", SortOrder::Desc)
//!                 .build(),
//!         )?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let request = Params::from_query_string("cars%5Bsort_key%5D=year").unwrap();
//! let mut context = registry.begin_request(request);
//! let header = context.sort_header("cars", TableOptions::new()).unwrap();
//!
//! let year = header.column("year").unwrap();
//! assert_eq!(year.href("/cars").unwrap(), "/cars?cars%5Bsort_key%5D=year&cars%5Bsort_order%5D=asc");
//! ```

#![warn(missing_docs)]

pub use datatable_params as params;

pub use datatable_params::{ParamValue, Params, ParamsError};

#[cfg(feature = "tables")]
pub use datatable_tables as tables;

#[cfg(feature = "tables")]
pub use datatable_tables::{
	Conditions, Filter, FilterConfig, FilterForm, FilterState, RenderMode, RequestContext, Result,
	SettingsError, Sort, SortConfig, SortHeader, SortOrder, TableError, TableOptions,
	TableRegistry, TableSettings, Wrapper,
};

/// Prelude module for convenient imports
///
/// Import everything commonly needed to declare and activate tables:
///
/// ```rust
/// use datatable::prelude::*;
/// ```
pub mod prelude {
	pub use datatable_params::{ParamValue, Params};

	#[cfg(feature = "tables")]
	pub use datatable_tables::{
		FilterConfig, FilterForm, RenderMode, RequestContext, SortConfig, SortHeader, SortOrder,
		TableError, TableOptions, TableRegistry, TableSettings, Wrapper,
		options::{HtmlOptions, OtherOptions, RemoteOptions, UrlOptions},
	};
}
