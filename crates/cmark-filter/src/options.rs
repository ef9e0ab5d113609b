//! Named boolean rendering options.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A set of named rendering options.
///
/// Each name maps to `Some(bool)` or to `None` ("present but unset"). An
/// unset option behaves like an absent one, except that it still replaces a
/// default of the same name when used as an override.
///
/// Well-known names are listed in [`EXTENSION_ALIASES`] and
/// [`RENDER_FLAG_ALIASES`], plus `smartypants`. Other names are accepted and
/// ignored.
///
/// [`EXTENSION_ALIASES`]: crate::EXTENSION_ALIASES
/// [`RENDER_FLAG_ALIASES`]: crate::RENDER_FLAG_ALIASES
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, Option<bool>>);

impl OptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`OptionSet::insert`] for a set value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.insert(name, Some(value));
        self
    }

    /// Insert an option, possibly unset. Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<bool>) -> Option<Option<bool>> {
        self.0.insert(name.into(), value)
    }

    /// Value of an option: `None` when absent, `Some(None)` when unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<bool>> {
        self.0.get(name).copied()
    }

    /// Whether the option is present and set to `true`.
    #[must_use]
    pub fn is_true(&self, name: &str) -> bool {
        self.get(name) == Some(Some(true))
    }

    /// Whether the option is present and explicitly set to `false`.
    ///
    /// Absent and unset options are not `false`.
    #[must_use]
    pub fn is_false(&self, name: &str) -> bool {
        self.get(name) == Some(Some(false))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Layer `overrides` over these options.
    ///
    /// Returns `self` borrowed when there is nothing to override, otherwise a
    /// copy updated key by key. `self` is never modified.
    #[must_use]
    pub fn merged<'a>(&'a self, overrides: &OptionSet) -> Cow<'a, OptionSet> {
        if overrides.is_empty() {
            return Cow::Borrowed(self);
        }
        let mut options = self.clone();
        options
            .0
            .extend(overrides.0.iter().map(|(name, value)| (name.clone(), *value)));
        Cow::Owned(options)
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), Some(value)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truthiness() {
        let mut options = OptionSet::new().with("tables", true).with("html", false);
        options.insert("wrap", None);

        assert!(options.is_true("tables"));
        assert!(!options.is_false("tables"));
        assert!(options.is_false("html"));
        assert!(!options.is_true("wrap"));
        assert!(!options.is_false("wrap"));
        assert!(!options.is_true("missing"));
        assert!(!options.is_false("missing"));
    }

    #[test]
    fn test_get_distinguishes_unset_from_absent() {
        let mut options = OptionSet::new();
        options.insert("wrap", None);
        assert_eq!(options.get("wrap"), Some(None));
        assert_eq!(options.get("missing"), None);
        assert!(options.contains("wrap"));
    }

    #[test]
    fn test_merged_without_overrides_borrows() {
        let defaults = OptionSet::new().with("tables", true);
        let merged = defaults.merged(&OptionSet::new());
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(*merged, defaults);
    }

    #[test]
    fn test_merged_overrides_replace_defaults() {
        let defaults = OptionSet::new().with("tables", true).with("wrap", true);
        let mut overrides = OptionSet::new().with("tables", false);
        overrides.insert("wrap", None);

        let merged = defaults.merged(&overrides);
        assert!(merged.is_false("tables"));
        assert_eq!(merged.get("wrap"), Some(None));

        // defaults untouched
        assert!(defaults.is_true("tables"));
        assert!(defaults.is_true("wrap"));
    }

    #[test]
    fn test_from_iterator() {
        let options: OptionSet = [("autolink", true), ("escape", false)].into_iter().collect();
        assert_eq!(options.len(), 2);
        assert_eq!(options.names().collect::<Vec<_>>(), vec!["autolink", "escape"]);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let options: OptionSet = toml::from_str("tables = true\nhtml = false").unwrap();
        assert!(options.is_true("tables"));
        assert!(options.is_false("html"));
    }
}
