//! Source normalization before transformation.
//!
//! Markup units lean on an implicit React binding: JSX lowers to
//! `React.createElement` calls, so a markup unit that never mentions React
//! would fail at runtime. Prepending the import here keeps authored files
//! free of that boilerplate.

use std::borrow::Cow;

use regex::Regex;
use sandpiper_vfs::UnitKind;

/// Ensure a unit's source satisfies the implicit-dependency conventions of
/// its kind.
///
/// For markup kinds without a textual React reference, prepends
/// `import React from 'react';`. Idempotent — the check is a reference
/// check, not a position check — and never fails.
pub fn normalize_source(kind: UnitKind, source: &str) -> Cow<'_, str> {
    if !kind.is_markup() {
        return Cow::Borrowed(source);
    }

    let references_react = Regex::new(r"import\s+React").unwrap().is_match(source);
    if references_react {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(format!("import React from 'react';\n{}", source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_react_into_markup() {
        let out = normalize_source(UnitKind::TypedMarkupScript, "const x = <div/>;");
        assert!(out.starts_with("import React from 'react';\n"));
        assert!(out.ends_with("const x = <div/>;"));
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_source(UnitKind::MarkupScript, "const x = <div/>;").into_owned();
        let twice = normalize_source(UnitKind::MarkupScript, &once);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_existing_react_import_untouched() {
        let source = "import React from 'react';\nexport default () => <p/>;";
        let out = normalize_source(UnitKind::TypedMarkupScript, source);
        assert_eq!(out, source);
    }

    #[test]
    fn test_react_reference_anywhere_counts() {
        // The check is textual, not positional.
        let source = "const a = 1;\nimport React from 'react';";
        let out = normalize_source(UnitKind::TypedMarkupScript, source);
        assert_eq!(out, source);
    }

    #[test]
    fn test_non_markup_kinds_untouched() {
        let source = "export const x: number = 1;";
        assert_eq!(normalize_source(UnitKind::TypedScript, source), source);
        assert_eq!(normalize_source(UnitKind::Script, source), source);
        assert_eq!(normalize_source(UnitKind::Style, source), source);
        assert_eq!(normalize_source(UnitKind::Data, source), source);
    }
}
