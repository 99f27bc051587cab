//! Sortable, filterable data tables for datatable
//!
//! This crate keeps the state of named data tables across page loads. A
//! table declares the keys it can be sorted by and the fields it can be
//! filtered on; each request's parameters are then reconciled against that
//! declaration into an activated table that knows which sort and which
//! filter selections are current, which query conditions follow from them,
//! and which parameters the next link or form submission must carry.
//!
//! # Features
//!
//! - **Sorting**: one selected sort key and order per table (`cars[sort_key]=year&cars[sort_order]=desc`)
//! - **Filtering**: select-style filter elements with a "no filter" default per field
//! - **Options**: typed remote, html, url and pass-through option groups
//! - **Registry**: declare once, activate per request through an explicit context
//! - **Views**: render-ready descriptions of sort headers and filter forms
//! - **Settings**: project-wide defaults loaded from TOML
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[TableRegistry] --> B[Wrapper template]
//!     B --> C[Sort]
//!     B --> D[Filter]
//!     B --> E[Option groups]
//!     F[RequestContext] --> G[activated Wrapper]
//!     B -- with params --> G
//!     G --> H[SortHeader]
//!     G --> I[FilterForm]
//! ```
//!
//! # Example
//!
//! ```rust
//! use datatable_params::Params;
//! use datatable_tables::TableRegistry;
//! use datatable_tables::filter::FilterConfig;
//! use datatable_tables::options::TableOptions;
//! use datatable_tables::sort::{SortConfig, SortOrder};
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
//!         cars.filter_spec(
//!             FilterConfig::builder()
//!                 .add_element("color", |e| e.add_default("All").add_option("Blue").add_option("Red"))
//!                 .build(),
//!         )?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let request = Params::from_query_string("cars%5Bcolor%5D=Red&cars%5Bsort_key%5D=year").unwrap();
//! let mut context = registry.begin_request(request);
//! let cars = context.activate("cars", TableOptions::new()).unwrap();
//!
//! assert_eq!(cars.conditions().unwrap().get("color").map(String::as_str), Some("Red"));
//! assert_eq!(
//!     cars.sort_options(),
//!     Params::from([("sort_key", "year"), ("sort_order", "desc")])
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod filter;
pub mod options;
pub mod registry;
pub mod settings;
pub mod sort;
pub mod view;
pub mod wrapper;

// Re-exports for convenience
pub use error::{Result, TableError};
pub use filter::{Conditions, Filter, FilterConfig, FilterState};
pub use options::{FillMissing, TableOptions};
pub use registry::{RequestContext, TableRegistry};
pub use settings::{SettingsError, TableSettings};
pub use sort::{SORT_KEY_PARAM, SORT_ORDER_PARAM, Sort, SortConfig, SortOrder};
pub use view::{FilterForm, SortHeader};
pub use wrapper::{PAGE_PARAM, RenderMode, Wrapper};
