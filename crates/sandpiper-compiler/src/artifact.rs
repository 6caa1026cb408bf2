//! Materialization of compiled text into loadable resource handles.
//!
//! The browser loads modules by URL, so every piece of finalized executable
//! text gets parked in an [`ArtifactStore`] behind a unique `blob:`-style
//! URL. Handles live until released; the store never reuses a handle for
//! identical text — each import edge mints a fresh one.
//!
//! Handles are tagged with the compilation generation that minted them.
//! Browser-level resources are not garbage collected for us: the surrounding
//! application is expected to call [`ArtifactStore::release_generation`] on
//! the previous generation each time it installs a freshly compiled preview,
//! or the store grows without bound across edits.

use indexmap::IndexMap;

/// Mime kind of materialized text.
///
/// Style and data imports are wrapped as scripts before materialization, so
/// every artifact today is executable script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeKind {
    JavaScript,
}

impl MimeKind {
    /// The mime string a browser loader would see.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JavaScript => "application/javascript",
        }
    }
}

/// Identifier of one driver invocation's worth of handles.
pub type Generation = u64;

/// An opaque, dereferenceable reference to finalized executable text.
///
/// Analogous to a temporary in-process blob URL. The holder is responsible
/// for eventual release via the store that minted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    url: String,
    generation: Generation,
}

impl ResourceHandle {
    /// The unique URL the browser loader dereferences.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The compilation generation this handle belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Debug)]
struct Artifact {
    text: String,
    mime: MimeKind,
    generation: Generation,
}

/// Owning registry of materialized artifacts, keyed by URL.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    artifacts: IndexMap<String, Artifact>,
    next_id: u64,
    generation: Generation,
}

impl ArtifactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new compilation generation; subsequent handles are tagged
    /// with it. Returns the new generation.
    pub fn begin_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// The generation new handles are currently tagged with.
    pub fn current_generation(&self) -> Generation {
        self.generation
    }

    /// Park text behind a fresh handle. Always succeeds, always allocates —
    /// identical text never shares a handle.
    pub fn materialize(&mut self, text: &str, mime: MimeKind) -> ResourceHandle {
        let id = self.next_id;
        self.next_id += 1;

        let url = format!("blob:sandpiper/{:08x}", id);
        self.artifacts.insert(
            url.clone(),
            Artifact {
                text: text.to_string(),
                mime,
                generation: self.generation,
            },
        );

        ResourceHandle {
            url,
            generation: self.generation,
        }
    }

    /// Look up the text behind a URL, as the browser loader would.
    pub fn dereference(&self, url: &str) -> Option<&str> {
        self.artifacts.get(url).map(|a| a.text.as_str())
    }

    /// Mime kind of the artifact behind a URL.
    pub fn mime(&self, url: &str) -> Option<MimeKind> {
        self.artifacts.get(url).map(|a| a.mime)
    }

    /// Release a single handle. Returns whether it was still live.
    pub fn release(&mut self, handle: &ResourceHandle) -> bool {
        self.artifacts.shift_remove(&handle.url).is_some()
    }

    /// Release every handle of a generation, returning how many were
    /// dropped. Newer generations are untouched.
    pub fn release_generation(&mut self, generation: Generation) -> usize {
        let before = self.artifacts.len();
        self.artifacts.retain(|_, a| a.generation != generation);
        before - self.artifacts.len()
    }

    /// URLs of all live artifacts, oldest first.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }

    /// Number of live artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the store holds no live artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
