//! The parameter tree
//!
//! [`Params`] is an insertion-ordered map from string keys to
//! [`ParamValue`]s, which are either a single value, a list of values, or a
//! nested map. This is the shape of decoded form and query parameters as
//! well as of JSON request bodies sent by AJAX submissions.
//!
//! Deserializing accepts any self-describing format. Numbers and booleans
//! become their string form, so `{"cars": {"page": 2}}` and `cars[page]=2`
//! decode to the same tree, and `null` entries are left out as if the key
//! had not been sent.

use crate::key::{KeyPath, parse_key, scoped_key};
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// A scalar value (`key=value`).
	Value(String),
	/// Repeated values (`key[]=a&key[]=b`).
	List(Vec<String>),
	/// A nested map (`key[inner]=value`).
	Nested(Params),
}

impl ParamValue {
	/// Returns the scalar value, if this is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Value(value) => Some(value),
			_ => None,
		}
	}

	/// Returns the list values, if this is a list.
	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			Self::List(values) => Some(values),
			_ => None,
		}
	}

	/// Returns the nested map, if this is one.
	pub fn as_nested(&self) -> Option<&Params> {
		match self {
			Self::Nested(params) => Some(params),
			_ => None,
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Value(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Value(value)
	}
}

impl From<&String> for ParamValue {
	fn from(value: &String) -> Self {
		Self::Value(value.clone())
	}
}

impl From<Vec<String>> for ParamValue {
	fn from(values: Vec<String>) -> Self {
		Self::List(values)
	}
}

impl From<Params> for ParamValue {
	fn from(params: Params) -> Self {
		Self::Nested(params)
	}
}

/// An ordered map of request parameters.
///
/// Equality ignores insertion order; iteration follows it.
///
/// # Examples
///
/// ```
/// use datatable_params::Params;
///
/// let mut cars = Params::new();
/// cars.insert("sort_key", "year");
/// cars.insert("sort_order", "desc");
///
/// let request = cars.scoped("cars");
/// assert_eq!(request.nested("cars").get_str("sort_order"), Some("desc"));
/// assert!(request.nested("trucks").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(IndexMap<String, ParamValue>);

impl Params {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	/// Returns the scalar stored under `key`.
	///
	/// Lists and nested maps yield `None`.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(ParamValue::as_str)
	}

	/// Returns the nested map stored under `key`.
	pub fn get_nested(&self, key: &str) -> Option<&Params> {
		self.get(key).and_then(ParamValue::as_nested)
	}

	/// Returns a copy of the map nested under `scope`.
	///
	/// A missing scope, or a scope holding something other than a map, is
	/// treated as empty.
	pub fn nested(&self, scope: &str) -> Params {
		self.get_nested(scope).cloned().unwrap_or_default()
	}

	/// Inserts a value, returning the previous one.
	///
	/// An existing key keeps its position.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
		self.0.insert(key.into(), value.into())
	}

	/// Removes a key, preserving the order of the remaining entries.
	pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
		self.0.shift_remove(key)
	}

	/// Returns true if `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Number of top-level entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if there are no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> indexmap::map::Iter<'_, String, ParamValue> {
		self.0.iter()
	}

	/// Iterates keys in insertion order.
	pub fn keys(&self) -> indexmap::map::Keys<'_, String, ParamValue> {
		self.0.keys()
	}

	/// Wraps this map under `scope`.
	pub fn scoped(self, scope: impl Into<String>) -> Params {
		let mut outer = Params::new();
		outer.insert(scope, self);
		outer
	}

	/// Shallow merge: every entry of `other` overwrites the entry of the same key.
	pub fn merge(&mut self, other: &Params) {
		for (key, value) in other {
			self.0.insert(key.clone(), value.clone());
		}
	}

	/// By-value form of [`merge`](Self::merge).
	pub fn merged(mut self, other: &Params) -> Params {
		self.merge(other);
		self
	}

	/// Reverse merge: only keys absent from `self` are taken from `other`.
	///
	/// # Examples
	///
	/// ```
	/// use datatable_params::Params;
	///
	/// let mut current = Params::from([("method", "post")]);
	/// current.fill_missing(&Params::from([("method", "get"), ("update", "hotBox")]));
	///
	/// assert_eq!(current.get_str("method"), Some("post"));
	/// assert_eq!(current.get_str("update"), Some("hotBox"));
	/// ```
	pub fn fill_missing(&mut self, other: &Params) {
		for (key, value) in other {
			self.0.entry(key.clone()).or_insert_with(|| value.clone());
		}
	}

	/// Lifts every nested map one level up into bracketed keys.
	///
	/// `{cars: {sort_key: "year"}, tab: "3"}` becomes
	/// `{"cars[sort_key]": "year", tab: "3"}`. Maps nested deeper than one
	/// level stay nested under their bracketed key.
	pub fn flatten_one_level(&self) -> Params {
		let mut flat = Params::new();
		for (key, value) in self {
			match value {
				ParamValue::Nested(inner) => {
					for (inner_key, inner_value) in inner {
						flat.insert(scoped_key(key, inner_key), inner_value.clone());
					}
				}
				other => {
					flat.insert(key.clone(), other.clone());
				}
			}
		}
		flat
	}

	/// Flattens the whole tree into `(key, value)` pairs.
	///
	/// Nested maps produce `a[b][c]` keys and lists produce one `a[]` pair
	/// per item. Empty maps and empty lists produce no pair at all, so they
	/// do not survive a trip through the query string.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		for (key, value) in self {
			push_pairs(&mut pairs, key, value);
		}
		pairs
	}

	/// Rebuilds a tree from flat `(key, value)` pairs.
	///
	/// Bracketed keys are unflattened. Keys that cannot be parsed are stored
	/// verbatim. When two pairs disagree on the shape of a key the later one
	/// wins.
	pub fn from_pairs<I, K, V>(pairs: I) -> Params
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut params = Params::new();
		for (key, value) in pairs {
			let key = key.as_ref();
			match parse_key(key) {
				Some(path) => params.insert_path(&path, value.into()),
				None => {
					tracing::debug!(key, "keeping malformed parameter key verbatim");
					params.insert(key, value.into());
				}
			}
		}
		params
	}

	fn insert_path(&mut self, path: &KeyPath, value: String) {
		let mut target = self;
		let mut key = path.root.as_str();
		for segment in &path.segments {
			target = target.nested_entry(key);
			key = segment;
		}

		if path.append {
			let entry = target
				.0
				.entry(key.to_string())
				.or_insert_with(|| ParamValue::List(Vec::new()));
			match entry {
				ParamValue::List(items) => items.push(value),
				other => *other = ParamValue::List(vec![value]),
			}
		} else {
			target.insert(key, value);
		}
	}

	fn nested_entry(&mut self, key: &str) -> &mut Params {
		let entry = self
			.0
			.entry(key.to_string())
			.or_insert_with(|| ParamValue::Nested(Params::new()));
		if !matches!(entry, ParamValue::Nested(_)) {
			*entry = ParamValue::Nested(Params::new());
		}
		match entry {
			ParamValue::Nested(inner) => inner,
			_ => unreachable!("entry was just replaced with a nested map"),
		}
	}
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: &str, value: &ParamValue) {
	match value {
		ParamValue::Value(value) => pairs.push((key.to_string(), value.clone())),
		ParamValue::List(items) => {
			let list_key = format!("{key}[]");
			for item in items {
				pairs.push((list_key.clone(), item.clone()));
			}
		}
		ParamValue::Nested(inner) => {
			for (inner_key, inner_value) in inner {
				push_pairs(pairs, &scoped_key(key, inner_key), inner_value);
			}
		}
	}
}

impl<'de> Deserialize<'de> for ParamValue {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(ParamValueVisitor)
	}
}

struct ParamValueVisitor;

impl<'de> Visitor<'de> for ParamValueVisitor {
	type Value = ParamValue;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a string, number, boolean, list or map")
	}

	fn visit_bool<E: de::Error>(self, value: bool) -> Result<ParamValue, E> {
		Ok(ParamValue::Value(value.to_string()))
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> Result<ParamValue, E> {
		Ok(ParamValue::Value(value.to_string()))
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> Result<ParamValue, E> {
		Ok(ParamValue::Value(value.to_string()))
	}

	fn visit_f64<E: de::Error>(self, value: f64) -> Result<ParamValue, E> {
		Ok(ParamValue::Value(value.to_string()))
	}

	fn visit_str<E: de::Error>(self, value: &str) -> Result<ParamValue, E> {
		Ok(ParamValue::Value(value.to_string()))
	}

	fn visit_string<E: de::Error>(self, value: String) -> Result<ParamValue, E> {
		Ok(ParamValue::Value(value))
	}

	fn visit_seq<A>(self, mut seq: A) -> Result<ParamValue, A::Error>
	where
		A: SeqAccess<'de>,
	{
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element::<Option<ParamValue>>()? {
			match item {
				Some(ParamValue::Value(value)) => items.push(value),
				Some(ParamValue::List(_)) => {
					return Err(de::Error::invalid_type(Unexpected::Seq, &"a scalar list item"));
				}
				Some(ParamValue::Nested(_)) => {
					return Err(de::Error::invalid_type(Unexpected::Map, &"a scalar list item"));
				}
				None => {}
			}
		}
		Ok(ParamValue::List(items))
	}

	fn visit_map<A>(self, map: A) -> Result<ParamValue, A::Error>
	where
		A: MapAccess<'de>,
	{
		ParamsVisitor.visit_map(map).map(ParamValue::Nested)
	}
}

impl<'de> Deserialize<'de> for Params {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(ParamsVisitor)
	}
}

struct ParamsVisitor;

impl<'de> Visitor<'de> for ParamsVisitor {
	type Value = Params;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a map of parameters")
	}

	fn visit_map<A>(self, mut map: A) -> Result<Params, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut params = Params::new();
		while let Some((key, value)) = map.next_entry::<String, Option<ParamValue>>()? {
			// null reads as an absent key
			if let Some(value) = value {
				params.insert(key, value);
			}
		}
		Ok(params)
	}
}

impl<'a> IntoIterator for &'a Params {
	type Item = (&'a String, &'a ParamValue);
	type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}
