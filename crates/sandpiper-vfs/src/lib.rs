//! In-memory virtual filesystem for the Sandpiper playground.
//!
//! The editing surface owns a small set of user-authored source files; this
//! crate models them as [`Unit`]s collected into a [`UnitSet`]. The compiler
//! only ever reads a unit set — it never mutates one — and treats it as the
//! closed universe of importable modules for a single compilation.
//!
//! `UnitSet` preserves insertion order. Extension-less import specifiers are
//! resolved by scanning the set in order and taking the first match, so the
//! order units were added in is part of the observable resolution behavior.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the unit every compilation starts from.
pub const ENTRY_UNIT_NAME: &str = "main.tsx";

/// Source language of a unit, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// Plain JavaScript (`.js`)
    Script,
    /// TypeScript (`.ts`)
    TypedScript,
    /// JavaScript with JSX (`.jsx`)
    MarkupScript,
    /// TypeScript with JSX (`.tsx`)
    TypedMarkupScript,
    /// Stylesheet (`.css`)
    Style,
    /// JSON data (`.json`)
    Data,
}

impl UnitKind {
    /// Classify a unit name by its extension.
    ///
    /// Unknown or missing extensions fall back to [`UnitKind::Script`].
    pub fn from_name(name: &str) -> Self {
        match name.rsplit('.').next() {
            Some("ts") => Self::TypedScript,
            Some("jsx") => Self::MarkupScript,
            Some("tsx") => Self::TypedMarkupScript,
            Some("css") => Self::Style,
            Some("json") => Self::Data,
            _ => Self::Script,
        }
    }

    /// Whether units of this kind hold executable module source (as opposed
    /// to style or data content that gets wrapped at import time).
    pub fn is_code(self) -> bool {
        matches!(
            self,
            Self::Script | Self::TypedScript | Self::MarkupScript | Self::TypedMarkupScript
        )
    }

    /// Whether units of this kind may contain JSX.
    pub fn is_markup(self) -> bool {
        matches!(self, Self::MarkupScript | Self::TypedMarkupScript)
    }
}

/// One user-authored source file held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique key within a [`UnitSet`], extension included (e.g. `App.tsx`).
    pub name: String,
    /// Raw source text.
    pub content: String,
    /// Source language, normally derived from the extension.
    pub kind: UnitKind,
}

impl Unit {
    /// Create a unit, classifying its kind from the name's extension.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let kind = UnitKind::from_name(&name);
        Self {
            name,
            content: content.into(),
            kind,
        }
    }

    /// Create a unit with an explicit kind, bypassing extension sniffing.
    pub fn with_kind(name: impl Into<String>, content: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind,
        }
    }
}

/// The closed set of units available to one compilation, keyed by name.
///
/// Insertion-ordered: iteration yields units in the order they were added,
/// and the resolver's first-match tie-break relies on that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitSet {
    units: IndexMap<String, Unit>,
}

impl UnitSet {
    /// Create an empty unit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, replacing any existing unit with the same name.
    ///
    /// Replacement keeps the original insertion position, so editing a file
    /// does not change resolution order.
    pub fn insert(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.name.clone(), unit)
    }

    /// Look up a unit by exact name.
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    /// Whether a unit with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Iterate units in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Iterate unit names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Number of units in the set.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<Unit> for UnitSet {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        let mut set = Self::new();
        for unit in iter {
            set.insert(unit);
        }
        set
    }
}

impl<'a> IntoIterator for &'a UnitSet {
    type Item = &'a Unit;
    type IntoIter = indexmap::map::Values<'a, String, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(UnitKind::from_name("main.tsx"), UnitKind::TypedMarkupScript);
        assert_eq!(UnitKind::from_name("util.ts"), UnitKind::TypedScript);
        assert_eq!(UnitKind::from_name("legacy.jsx"), UnitKind::MarkupScript);
        assert_eq!(UnitKind::from_name("index.js"), UnitKind::Script);
        assert_eq!(UnitKind::from_name("App.css"), UnitKind::Style);
        assert_eq!(UnitKind::from_name("data.json"), UnitKind::Data);
    }

    #[test]
    fn test_kind_unknown_extension_defaults_to_script() {
        assert_eq!(UnitKind::from_name("README"), UnitKind::Script);
        assert_eq!(UnitKind::from_name("weird.xyz"), UnitKind::Script);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(UnitKind::TypedMarkupScript.is_code());
        assert!(UnitKind::TypedMarkupScript.is_markup());
        assert!(UnitKind::Script.is_code());
        assert!(!UnitKind::Script.is_markup());
        assert!(!UnitKind::Style.is_code());
        assert!(!UnitKind::Data.is_code());
    }

    #[test]
    fn test_unit_new_classifies_kind() {
        let unit = Unit::new("App.tsx", "export default () => null;");
        assert_eq!(unit.kind, UnitKind::TypedMarkupScript);
    }

    #[test]
    fn test_unit_set_preserves_insertion_order() {
        let mut set = UnitSet::new();
        set.insert(Unit::new("b.ts", ""));
        set.insert(Unit::new("a.ts", ""));
        set.insert(Unit::new("c.css", ""));

        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["b.ts", "a.ts", "c.css"]);
    }

    #[test]
    fn test_unit_set_replace_keeps_position() {
        let mut set = UnitSet::new();
        set.insert(Unit::new("a.ts", "old"));
        set.insert(Unit::new("b.ts", ""));
        set.insert(Unit::new("a.ts", "new"));

        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
        assert_eq!(set.get("a.ts").unwrap().content, "new");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unit_set_from_iterator() {
        let set: UnitSet = [Unit::new("main.tsx", ""), Unit::new("App.tsx", "")]
            .into_iter()
            .collect();
        assert!(set.contains(ENTRY_UNIT_NAME));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unit_set_serde_round_trip() {
        let mut set = UnitSet::new();
        set.insert(Unit::new("main.tsx", "console.log(1);"));
        set.insert(Unit::new("App.css", "body { margin: 0; }"));

        let json = serde_json::to_string(&set).unwrap();
        let back: UnitSet = serde_json::from_str(&json).unwrap();

        let names: Vec<_> = back.names().collect();
        assert_eq!(names, vec!["main.tsx", "App.css"]);
        assert_eq!(back.get("App.css").unwrap().kind, UnitKind::Style);
    }
}
