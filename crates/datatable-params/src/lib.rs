//! Nested request parameters for datatable
//!
//! Request parameters for a data table arrive namespaced under the table's
//! name, either as bracketed query-string keys (`cars[sort_key]=year`) or as a
//! nested AJAX body (`{"cars": {"sort_key": "year"}}`). This crate gives both
//! shapes one typed representation, [`Params`], together with the merge and
//! flattening operations the table layer needs to carry state from one page
//! load to the next.
//!
//! # Example
//!
//! ```rust
//! use datatable_params::Params;
//!
//! let params = Params::from_query_string("cars%5Bsort_key%5D=year&tab=3").unwrap();
//! assert_eq!(params.nested("cars").get_str("sort_key"), Some("year"));
//! assert_eq!(params.get_str("tab"), Some("3"));
//!
//! let flat = params.flatten_one_level();
//! assert_eq!(flat.get_str("cars[sort_key]"), Some("year"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod codec;
pub mod error;
pub mod key;
pub mod value;

// Re-exports for convenience
pub use error::{ParamsError, ParamsResult};
pub use key::{KeyPath, parse_key, scoped_key};
pub use value::{ParamValue, Params};
