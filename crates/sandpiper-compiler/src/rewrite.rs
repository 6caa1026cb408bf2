//! AST-level import rewriting.
//!
//! Runs as a visitor inside the single-unit transform pipeline, once per
//! import declaration. Relative specifiers are resolved against the unit
//! set and replaced in place with a freshly materialized resource URL:
//!
//! ```javascript
//! // Before: import App from './App';
//! // After:  import App from "blob:sandpiper/0000002a";
//! ```
//!
//! What gets materialized depends on the target unit's kind: style units
//! become a side-effect module that installs a `<style>` element, data
//! units become a default-export wrapper, and script kinds are compiled
//! recursively on demand. An unresolvable specifier is left as written.

use std::time::{SystemTime, UNIX_EPOCH};

use swc_common::DUMMY_SP;
use swc_ecma_ast::{ImportDecl, Str};
use swc_ecma_visit::VisitMut;

use sandpiper_vfs::{Unit, UnitKind};

use crate::artifact::MimeKind;
use crate::compile::{Session, compile_unit};
use crate::resolve::resolve_unit;

/// Get the string value of an import source literal.
fn wtf8_to_string(value: &Str) -> String {
    value.value.as_str().unwrap_or_default().to_string()
}

pub(crate) struct ImportRewriter<'a, 's> {
    session: &'s mut Session<'a>,
    /// Name of the unit whose imports are being rewritten.
    from: String,
}

impl<'a, 's> ImportRewriter<'a, 's> {
    pub(crate) fn new(session: &'s mut Session<'a>, from: &str) -> Self {
        Self {
            session,
            from: from.to_string(),
        }
    }
}

impl VisitMut for ImportRewriter<'_, '_> {
    fn visit_mut_import_decl(&mut self, import: &mut ImportDecl) {
        let specifier = wtf8_to_string(&import.src);
        if !specifier.starts_with('.') {
            // Bare specifier: externally resolvable through the import map.
            return;
        }

        let units = self.session.units();
        let Some(target) = resolve_unit(units, &specifier) else {
            tracing::debug!(
                from = %self.from,
                specifier = %specifier,
                "import does not resolve to a unit; leaving as written"
            );
            return;
        };

        let text = match target.kind {
            UnitKind::Style => style_module(target),
            UnitKind::Data => data_module(target),
            _ => compile_unit(self.session, target),
        };

        let handle = self.session.store_mut().materialize(&text, MimeKind::JavaScript);
        import.src = Box::new(Str {
            span: DUMMY_SP,
            value: handle.url().into(),
            raw: None,
        });
    }
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Wrap a style unit as a side-effect module.
///
/// Loading the module appends one `<style>` element to the document head,
/// id-tagged with the unit name and a timestamp so repeated recompilations
/// never collide, and sets its text to the style content verbatim. The
/// content is embedded as a JSON-escaped string literal, so backticks and
/// `${` in the stylesheet survive untouched.
pub(crate) fn style_module(unit: &Unit) -> String {
    let id = format!("style_{}_{}", timestamp_millis(), unit.name);
    let content = serde_json::Value::String(unit.content.clone()).to_string();
    format!(
        r#"(() => {{
    const stylesheet = document.createElement('style');
    stylesheet.setAttribute('id', '{id}');
    document.head.appendChild(stylesheet);
    stylesheet.appendChild(document.createTextNode({content}));
}})();
"#
    )
}

/// Wrap a data unit's raw content as the sole default export.
pub(crate) fn data_module(unit: &Unit) -> String {
    format!("export default {}", unit.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_vfs::Unit;

    #[test]
    fn test_style_module_embeds_content_verbatim() {
        let unit = Unit::new("App.css", "h1 { color: red; }");
        let text = style_module(&unit);

        assert!(text.contains("document.createElement('style')"));
        assert!(text.contains("document.head.appendChild(stylesheet)"));
        assert!(text.contains(r#""h1 { color: red; }""#));
    }

    #[test]
    fn test_style_module_id_carries_unit_name() {
        let unit = Unit::new("App.css", "");
        let text = style_module(&unit);
        assert!(text.contains("_App.css'"));
        assert!(text.contains("'style_"));
    }

    #[test]
    fn test_style_module_escapes_hostile_content() {
        // Backticks and interpolation markers must survive as literal text.
        let unit = Unit::new("App.css", "h1::before { content: `${x}`; }");
        let text = style_module(&unit);

        let expected = serde_json::Value::String(unit.content.clone()).to_string();
        assert!(text.contains(&expected));
    }

    #[test]
    fn test_data_module_wraps_default_export() {
        let unit = Unit::new("config.json", r#"{ "name": "demo" }"#);
        assert_eq!(
            data_module(&unit),
            r#"export default { "name": "demo" }"#
        );
    }
}
