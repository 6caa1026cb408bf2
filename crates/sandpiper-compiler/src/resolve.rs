//! Import-specifier resolution against a unit set.
//!
//! Only relative specifiers are in scope; bare specifiers like `react` are
//! left for the surrounding application's import map. Not finding a unit is
//! a normal outcome, not an error — the caller leaves the edge as written.

use sandpiper_vfs::{Unit, UnitSet};

/// Resolve a relative import specifier to a unit.
///
/// The relative prefix is stripped to a bare name. A bare name that carries
/// an extension (contains a `.`) must match a key exactly. Otherwise the
/// set is scanned in insertion order for the first script-kind unit whose
/// dot-separated name segments contain the bare name — so `./App` finds
/// `App.tsx`. First match wins; with both `foo.test.ts` and `foo.ts`
/// present, `./foo` is ambiguous and resolves to whichever was inserted
/// first.
pub fn resolve_unit<'a>(units: &'a UnitSet, specifier: &str) -> Option<&'a Unit> {
    let bare = specifier.split("./").last().unwrap_or_default();

    if bare.contains('.') {
        return units.get(bare);
    }

    units
        .iter()
        .find(|unit| unit.kind.is_code() && unit.name.split('.').any(|segment| segment == bare))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_vfs::Unit;

    fn set(names: &[&str]) -> UnitSet {
        names.iter().map(|n| Unit::new(*n, "")).collect()
    }

    #[test]
    fn test_resolves_extensionless_specifier() {
        let units = set(&["main.tsx", "App.tsx", "App.css"]);
        let unit = resolve_unit(&units, "./App").unwrap();
        assert_eq!(unit.name, "App.tsx");
    }

    #[test]
    fn test_explicit_extension_matches_exact_key_only() {
        let units = set(&["App.tsx"]);
        assert_eq!(resolve_unit(&units, "./App.tsx").unwrap().name, "App.tsx");
        assert!(resolve_unit(&units, "./App.ts").is_none());
    }

    #[test]
    fn test_explicit_extension_reaches_style_and_data() {
        let units = set(&["App.css", "config.json"]);
        assert_eq!(resolve_unit(&units, "./App.css").unwrap().name, "App.css");
        assert_eq!(
            resolve_unit(&units, "./config.json").unwrap().name,
            "config.json"
        );
    }

    #[test]
    fn test_bare_name_skips_non_code_units() {
        // `./styles` must not pick up styles.css; only script kinds
        // participate in extension completion.
        let units = set(&["styles.css", "main.tsx"]);
        assert!(resolve_unit(&units, "./styles").is_none());
    }

    #[test]
    fn test_first_match_in_insertion_order_wins() {
        let units = set(&["foo.test.ts", "foo.ts"]);
        assert_eq!(resolve_unit(&units, "./foo").unwrap().name, "foo.test.ts");

        let units = set(&["foo.ts", "foo.test.ts"]);
        assert_eq!(resolve_unit(&units, "./foo").unwrap().name, "foo.ts");
    }

    #[test]
    fn test_dot_segment_match() {
        // `./foo` also finds foo.test.ts on its inner segment.
        let units = set(&["foo.test.ts"]);
        assert_eq!(resolve_unit(&units, "./foo").unwrap().name, "foo.test.ts");
    }

    #[test]
    fn test_unknown_specifier_is_none() {
        let units = set(&["main.tsx"]);
        assert!(resolve_unit(&units, "./Missing").is_none());
    }

    #[test]
    fn test_parent_path_does_not_match_flat_names() {
        // The unit set is flat; a nested path strips to `components/App`,
        // which no flat key contains.
        let units = set(&["App.tsx"]);
        assert!(resolve_unit(&units, "../components/App").is_none());
    }
}
