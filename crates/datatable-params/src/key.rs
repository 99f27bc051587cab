//! Bracketed parameter keys
//!
//! Form and query-string parameters express nesting through brackets:
//! `cars[sort_key]` is the `sort_key` entry of the `cars` map and `tags[]`
//! appends to the `tags` list.

/// A parsed parameter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
	/// Leading key before any bracket.
	pub root: String,
	/// Bracketed map segments, outermost first.
	pub segments: Vec<String>,
	/// Whether the key ends in `[]`.
	pub append: bool,
}

impl KeyPath {
	/// A key without brackets.
	pub fn plain(key: impl Into<String>) -> Self {
		Self {
			root: key.into(),
			segments: Vec::new(),
			append: false,
		}
	}

	/// Returns true if the key has no brackets at all.
	pub fn is_plain(&self) -> bool {
		self.segments.is_empty() && !self.append
	}
}

/// Builds the bracketed key for `key` inside `scope`.
///
/// # Examples
///
/// ```
/// use datatable_params::scoped_key;
///
/// assert_eq!(scoped_key("cars", "sort_key"), "cars[sort_key]");
/// assert_eq!(scoped_key("cars[filter]", "color"), "cars[filter][color]");
/// ```
pub fn scoped_key(scope: &str, key: &str) -> String {
	if let Some(open) = key.find('[') {
		// `a[b]` nested under `s` becomes `s[a][b]`
		format!("{scope}[{}]{}", &key[..open], &key[open..])
	} else {
		format!("{scope}[{key}]")
	}
}

/// Parses a bracketed key.
///
/// Returns `None` for keys that cannot be unflattened: an empty root
/// (`[a]`), unbalanced brackets, text between segments, or `[]` anywhere
/// but the end. Callers keep such keys verbatim.
///
/// # Examples
///
/// ```
/// use datatable_params::parse_key;
///
/// let path = parse_key("cars[filter][color]").unwrap();
/// assert_eq!(path.root, "cars");
/// assert_eq!(path.segments, vec!["filter".to_string(), "color".to_string()]);
/// assert!(!path.append);
///
/// assert!(parse_key("tags[]").unwrap().append);
/// assert!(parse_key("cars[sort_key").is_none());
/// ```
pub fn parse_key(key: &str) -> Option<KeyPath> {
	let (root, mut rest) = match key.find('[') {
		Some(0) => return None,
		Some(open) => (&key[..open], &key[open..]),
		None => return Some(KeyPath::plain(key)),
	};

	let mut segments = Vec::new();
	let mut append = false;
	while !rest.is_empty() {
		if append {
			return None;
		}
		let inner = rest.strip_prefix('[')?;
		let close = inner.find(']')?;
		let segment = &inner[..close];
		if segment.contains('[') {
			return None;
		}
		if segment.is_empty() {
			append = true;
		} else {
			segments.push(segment.to_string());
		}
		rest = &inner[close + 1..];
	}

	Some(KeyPath {
		root: root.to_string(),
		segments,
		append,
	})
}
