//! Unit compiler and compilation driver.
//!
//! Compilation is demand-driven: the driver compiles only the entry unit,
//! and every further unit is compiled when (and only when) an import edge
//! reaching it is discovered mid-transform. The [`Session`] carries the
//! state one invocation threads through that recursion: the read-only unit
//! set, the artifact store, the in-progress stack bounding cyclic graphs,
//! the per-invocation output cache, and the diagnostics side channel.

use std::collections::HashMap;

use sandpiper_vfs::{Unit, UnitSet};

use crate::artifact::{ArtifactStore, Generation};
use crate::config::CompileOptions;
use crate::error::{CompileError, Diagnostic};
use crate::normalize::normalize_source;
use crate::transpile::transform_unit;

/// Result of one driver invocation.
#[derive(Debug)]
pub struct CompileOutput {
    /// The entry unit's executable text, with every reachable relative
    /// import already rewritten to a resource URL. Loading it as the
    /// preview's entry point is the caller's job.
    pub code: String,
    /// Generation tagging every handle minted by this invocation; hand it
    /// to [`ArtifactStore::release_generation`] once a newer preview is
    /// installed.
    pub generation: Generation,
    /// Per-unit degradations recorded while compiling.
    pub diagnostics: Vec<Diagnostic>,
}

/// Compile the entry unit and, transitively, everything it imports.
///
/// Fails only when the entry unit is missing from the set; any other broken
/// unit degrades to an empty module and shows up in the diagnostics.
pub fn compile(units: &UnitSet, store: &mut ArtifactStore) -> Result<CompileOutput, CompileError> {
    compile_with_options(units, store, CompileOptions::default())
}

/// Compile with explicit options.
pub fn compile_with_options(
    units: &UnitSet,
    store: &mut ArtifactStore,
    options: CompileOptions,
) -> Result<CompileOutput, CompileError> {
    let entry = units
        .get(&options.entry)
        .ok_or_else(|| CompileError::MissingEntry(options.entry.clone()))?;

    let generation = store.begin_generation();
    let mut session = Session::new(units, store, &options);
    let code = compile_unit(&mut session, entry);

    Ok(CompileOutput {
        code,
        generation,
        diagnostics: session.into_diagnostics(),
    })
}

/// Compile a single unit to executable text.
///
/// Applies the containment policy: a unit that fails to transform is logged,
/// recorded as a diagnostic, and replaced by empty text so that only its own
/// subtree degrades. Revisiting a unit already on the recursive stack
/// short-circuits the same way instead of recursing without bound.
pub(crate) fn compile_unit(session: &mut Session<'_>, unit: &Unit) -> String {
    if session.is_in_progress(&unit.name) {
        tracing::warn!(unit = %unit.name, "import cycle detected; substituting empty module");
        session.push_diagnostic(Diagnostic::cycle(&unit.name));
        return String::new();
    }

    if let Some(cached) = session.cached(&unit.name) {
        return cached;
    }

    let source = normalize_source(unit.kind, &unit.content);

    session.enter(&unit.name);
    let result = transform_unit(session, unit, &source);
    session.leave(&unit.name);

    match result {
        Ok(code) => {
            session.cache(&unit.name, code.clone());
            code
        }
        Err(err) => {
            tracing::error!(unit = %unit.name, error = %err, "transform failed; substituting empty output");
            session.push_diagnostic(Diagnostic::transform(&unit.name, &err));
            String::new()
        }
    }
}

/// Mutable context threaded through one driver invocation's recursion.
pub(crate) struct Session<'a> {
    units: &'a UnitSet,
    store: &'a mut ArtifactStore,
    options: &'a CompileOptions,
    /// Unit names on the recursive compile stack, outermost first.
    in_progress: Vec<String>,
    /// Unit name -> executable text, scoped to this invocation. Keeps a
    /// diamond-shaped graph from recompiling the shared unit per importer;
    /// handles are still minted per edge.
    cache: HashMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Session<'a> {
    fn new(units: &'a UnitSet, store: &'a mut ArtifactStore, options: &'a CompileOptions) -> Self {
        Self {
            units,
            store,
            options,
            in_progress: Vec::new(),
            cache: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn units(&self) -> &'a UnitSet {
        self.units
    }

    pub(crate) fn store_mut(&mut self) -> &mut ArtifactStore {
        self.store
    }

    pub(crate) fn options(&self) -> &CompileOptions {
        self.options
    }

    fn is_in_progress(&self, name: &str) -> bool {
        self.in_progress.iter().any(|n| n == name)
    }

    fn enter(&mut self, name: &str) {
        self.in_progress.push(name.to_string());
    }

    fn leave(&mut self, name: &str) {
        debug_assert_eq!(self.in_progress.last().map(String::as_str), Some(name));
        self.in_progress.pop();
    }

    fn cached(&self, name: &str) -> Option<String> {
        self.cache.get(name).cloned()
    }

    fn cache(&mut self, name: &str, code: String) {
        self.cache.insert(name.to_string(), code);
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
