//! Compilation options.

use sandpiper_vfs::ENTRY_UNIT_NAME;
use swc_ecma_ast::EsVersion;

/// Options for one driver invocation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Name of the entry unit. Default: [`ENTRY_UNIT_NAME`].
    pub entry: String,
    /// Target ECMAScript version for emitted code. Default: ES2020.
    pub target: EsVersion,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            entry: ENTRY_UNIT_NAME.to_string(),
            target: EsVersion::Es2020,
        }
    }
}

impl CompileOptions {
    /// Options with the default entry and target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options compiling from a different entry unit.
    pub fn with_entry(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry() {
        let options = CompileOptions::default();
        assert_eq!(options.entry, "main.tsx");
        assert_eq!(options.target, EsVersion::Es2020);
    }

    #[test]
    fn test_with_entry() {
        let options = CompileOptions::with_entry("index.ts");
        assert_eq!(options.entry, "index.ts");
    }
}
