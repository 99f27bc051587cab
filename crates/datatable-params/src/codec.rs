//! Query-string encoding
//!
//! Uses `application/x-www-form-urlencoded`, so brackets in keys are
//! percent-encoded: `cars[sort_key]=year` is written as
//! `cars%5Bsort_key%5D=year`.

use crate::error::ParamsResult;
use crate::value::Params;

impl Params {
	/// Encodes the whole tree as a query string, without a leading `?`.
	///
	/// # Examples
	///
	/// ```
	/// use datatable_params::Params;
	///
	/// let params = Params::from([("cars", Params::from([("sort_key", "year")]))]);
	/// assert_eq!(params.to_query_string().unwrap(), "cars%5Bsort_key%5D=year");
	/// ```
	pub fn to_query_string(&self) -> ParamsResult<String> {
		Ok(serde_urlencoded::to_string(self.to_pairs())?)
	}

	/// Decodes a query string. A leading `?` is ignored.
	///
	/// # Examples
	///
	/// ```
	/// use datatable_params::Params;
	///
	/// let params = Params::from_query_string("?cars%5Bcolor%5D=Blue&page=2").unwrap();
	/// assert_eq!(params.nested("cars").get_str("color"), Some("Blue"));
	/// assert_eq!(params.get_str("page"), Some("2"));
	/// ```
	pub fn from_query_string(query: &str) -> ParamsResult<Params> {
		let query = query.strip_prefix('?').unwrap_or(query);
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Ok(Params::from_pairs(pairs))
	}
}
