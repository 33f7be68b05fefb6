//! Node catalog abstractions for the Waypoint core runtime.
//!
//! The catalog is the pool of named locations that graph synthesis samples
//! from. It is an immutable value built once and handed to the synthesizer
//! explicitly.

use std::{borrow::Borrow, collections::HashSet, fmt, io::BufRead, sync::Arc};

use rand::{Rng, seq::index};

use crate::error::CatalogError;

/// Opaque, cheap-to-clone identifier of a location.
///
/// # Examples
/// ```
/// use waypoint_core::NodeName;
///
/// let name = NodeName::from("Lisbon");
/// assert_eq!(name.as_str(), "Lisbon");
/// assert_eq!(name.to_string(), "Lisbon");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeName(Arc<str>);

impl NodeName {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for NodeName {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive data attached to a catalog entry.
///
/// No algorithm reads the metadata; it travels with the catalog so callers can
/// render it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeMetadata {
    description: Option<Arc<str>>,
}

impl NodeMetadata {
    /// Creates metadata carrying a free-form description.
    #[must_use]
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(Arc::from(description.into())),
        }
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A single named location and its metadata.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogEntry {
    name: NodeName,
    metadata: NodeMetadata,
}

impl CatalogEntry {
    /// Returns the entry's name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &NodeName { &self.name }

    /// Returns the entry's metadata.
    #[must_use]
    #[rustfmt::skip]
    pub fn metadata(&self) -> &NodeMetadata { &self.metadata }
}

const DEFAULT_LOCATIONS: &[(&str, &str)] = &[
    ("Amsterdam", "Netherlands"),
    ("Berlin", "Germany"),
    ("Copenhagen", "Denmark"),
    ("Dublin", "Ireland"),
    ("Edinburgh", "Scotland"),
    ("Florence", "Italy"),
    ("Geneva", "Switzerland"),
    ("Helsinki", "Finland"),
    ("Istanbul", "Turkey"),
    ("Krakow", "Poland"),
    ("Lisbon", "Portugal"),
    ("Madrid", "Spain"),
    ("Oslo", "Norway"),
    ("Prague", "Czechia"),
    ("Vienna", "Austria"),
];

/// Immutable mapping from node name to metadata with unique keys.
///
/// Entries keep their insertion order so seeded sampling is reproducible.
///
/// # Examples
/// ```
/// use waypoint_core::{NodeCatalog, NodeMetadata};
///
/// let catalog = NodeCatalog::new([
///     ("Oslo", NodeMetadata::default()),
///     ("Rome", NodeMetadata::with_description("Italy")),
/// ])?;
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.metadata("Rome").and_then(|m| m.description()), Some("Italy"));
/// # Ok::<(), waypoint_core::CatalogError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeCatalog {
    entries: Vec<CatalogEntry>,
}

impl NodeCatalog {
    /// Builds a catalog from `(name, metadata)` pairs.
    ///
    /// Names are trimmed before validation.
    ///
    /// # Errors
    /// Returns [`CatalogError::Empty`] when no entries are supplied,
    /// [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::DuplicateName`] when a name repeats.
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, NodeMetadata)>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for (position, (raw, metadata)) in entries.into_iter().enumerate() {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                return Err(CatalogError::EmptyName {
                    line: position + 1,
                });
            }
            let name = NodeName::from(trimmed);
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateName { name });
            }
            collected.push(CatalogEntry { name, metadata });
        }
        if collected.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries: collected })
    }

    /// Builds a catalog of names without metadata.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    pub fn from_names<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(names.into_iter().map(|name| (name, NodeMetadata::default())))
    }

    /// Reads a catalog with one entry per line.
    ///
    /// Each line holds a name, optionally followed by a tab and a description.
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when reading fails, otherwise the same
    /// errors as [`Self::new`]. `EmptyName` reports the one-based line number.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use waypoint_core::NodeCatalog;
    ///
    /// let input = "# stops\nOslo\tNorway\n\nRome\n";
    /// let catalog = NodeCatalog::from_reader(Cursor::new(input))?;
    /// let names: Vec<_> = catalog.names().map(|n| n.as_str()).collect();
    /// assert_eq!(names, ["Oslo", "Rome"]);
    /// # Ok::<(), waypoint_core::CatalogError>(())
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CatalogError::Io { source })?;
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            let (name, metadata) = match line.split_once('\t') {
                Some((name, description)) if !description.trim().is_empty() => {
                    (name.trim(), NodeMetadata::with_description(description.trim()))
                }
                Some((name, _)) => (name.trim(), NodeMetadata::default()),
                None => (content, NodeMetadata::default()),
            };
            if name.is_empty() {
                return Err(CatalogError::EmptyName { line: index + 1 });
            }
            entries.push((name.to_owned(), metadata));
        }
        Self::new(entries)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog has no entries. Always `false` for a
    /// constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Iterates over the names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &NodeName> {
        self.entries.iter().map(CatalogEntry::name)
    }

    /// Looks up the metadata for `name`.
    #[must_use]
    pub fn metadata(&self, name: &str) -> Option<&NodeMetadata> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_str() == name)
            .map(CatalogEntry::metadata)
    }

    /// Draws `count` distinct names uniformly at random.
    ///
    /// `count` is clamped to the catalog size.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<NodeName> {
        let amount = count.min(self.entries.len());
        index::sample(rng, self.entries.len(), amount)
            .into_iter()
            .filter_map(|idx| self.entries.get(idx))
            .map(|entry| entry.name.clone())
            .collect()
    }
}

impl Default for NodeCatalog {
    /// Returns the built-in catalog of European cities.
    fn default() -> Self {
        Self {
            entries: DEFAULT_LOCATIONS
                .iter()
                .map(|(name, country)| CatalogEntry {
                    name: NodeName::from(*name),
                    metadata: NodeMetadata::with_description(*country),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[test]
    fn default_catalog_has_unique_names() {
        let catalog = NodeCatalog::default();
        let unique: HashSet<_> = catalog.names().collect();
        assert_eq!(unique.len(), catalog.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = NodeCatalog::from_names(["Oslo", "Rome", " Oslo "])
            .expect_err("duplicate names must be rejected");
        match err {
            CatalogError::DuplicateName { name } => assert_eq!(name.as_str(), "Oslo"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::no_entries(Vec::new())]
    #[case::only_comments(vec!["# nothing here"])]
    fn rejects_empty_catalogs(#[case] lines: Vec<&str>) {
        let input = lines.join("\n");
        let err = NodeCatalog::from_reader(Cursor::new(input)).expect_err("must be empty");
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn reports_line_of_blank_name() {
        let err = NodeCatalog::from_reader(Cursor::new("Oslo\n\tNorway\n"))
            .expect_err("blank name must fail");
        assert!(matches!(err, CatalogError::EmptyName { line: 2 }));
        assert_eq!(err.code(), crate::CatalogErrorCode::EmptyName);
    }

    #[test]
    fn reader_keeps_descriptions() {
        let catalog = NodeCatalog::from_reader(Cursor::new("Oslo\tNorway\nRome\t \n"))
            .expect("catalog must parse");
        assert_eq!(
            catalog.metadata("Oslo").and_then(NodeMetadata::description),
            Some("Norway")
        );
        assert_eq!(
            catalog.metadata("Rome").and_then(NodeMetadata::description),
            None
        );
        assert!(catalog.metadata("Paris").is_none());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    #[case(15, 15)]
    #[case(40, 15)]
    fn sample_clamps_to_catalog_size(#[case] requested: usize, #[case] expected: usize) {
        let catalog = NodeCatalog::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let sampled = catalog.sample(requested, &mut rng);
        assert_eq!(sampled.len(), expected);
        let unique: HashSet<_> = sampled.iter().collect();
        assert_eq!(unique.len(), expected, "sampled names must be distinct");
    }

    #[test]
    fn sample_is_reproducible_under_seed() {
        let catalog = NodeCatalog::default();
        let first = catalog.sample(5, &mut SmallRng::seed_from_u64(99));
        let second = catalog.sample(5, &mut SmallRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}
