//! sandpiper-compiler - recursive, demand-driven module compiler for the
//! Sandpiper playground.
//!
//! Turns an in-memory [`UnitSet`] of user-authored source files into a
//! graph of independently loadable compiled units, with no pre-computed
//! dependency graph: imports are resolved and compiled at the moment the
//! transform pass discovers them.
//!
//! # How it works
//!
//! Compiling the entry unit walks its syntax tree; every relative import
//! found there triggers resolution, (recursive) compilation of the target,
//! and materialization of the result behind a fresh resource URL that is
//! substituted back into the import before the text is emitted:
//!
//! ```javascript
//! // Before: import App from './App';
//! //         import './App.css';
//! // After:  import App from "blob:sandpiper/00000002";
//! //         import "blob:sandpiper/00000003";
//! ```
//!
//! Style and data units are not compiled; they are wrapped — a stylesheet
//! becomes a side-effect module that installs a `<style>` element, JSON
//! becomes a default-export module.
//!
//! # Example
//!
//! ```no_run
//! use sandpiper_compiler::{ArtifactStore, compile};
//! use sandpiper_vfs::{Unit, UnitSet};
//!
//! let mut units = UnitSet::new();
//! units.insert(Unit::new("main.tsx", "import App from './App';\nconsole.log(App);"));
//! units.insert(Unit::new("App.tsx", "export default () => <h1>hi</h1>;"));
//!
//! let mut store = ArtifactStore::new();
//! let output = compile(&units, &mut store).unwrap();
//!
//! // `output.code` is the entry module; imported units are loadable
//! // through the store by the URLs embedded in it.
//! let previous = output.generation;
//! // ...install the preview, edit, recompile, then:
//! store.release_generation(previous);
//! ```
//!
//! One broken unit never takes down the preview: it degrades to an empty
//! module and is reported on [`CompileOutput::diagnostics`]. Only a missing
//! entry unit fails the whole call.

pub mod artifact;
pub mod compile;
pub mod config;
pub mod error;
pub mod normalize;
pub mod resolve;
mod rewrite;
mod transpile;

pub use artifact::{ArtifactStore, Generation, MimeKind, ResourceHandle};
pub use compile::{CompileOutput, compile, compile_with_options};
pub use config::CompileOptions;
pub use error::{CompileError, Diagnostic, DiagnosticKind, TransformError};
pub use normalize::normalize_source;
pub use resolve::resolve_unit;

pub use sandpiper_vfs::{ENTRY_UNIT_NAME, Unit, UnitKind, UnitSet};
