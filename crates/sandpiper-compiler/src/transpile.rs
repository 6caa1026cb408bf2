//! Single-unit transform pipeline.
//!
//! Parses one unit with SWC, strips TypeScript, lowers JSX for markup
//! kinds, rewrites relative imports to materialized resource URLs, and
//! emits the final executable text. Import rewriting happens mid-pipeline,
//! so by the time a unit's text is emitted every relative import in it has
//! been resolved and replaced.

use swc_common::comments::NoopComments;
use swc_common::{FileName, GLOBALS, Globals, Mark, SourceMap, sync::Lrc};
use swc_ecma_ast::Program;
use swc_ecma_codegen::{Config as CodegenConfig, Emitter, text_writer::JsWriter};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use swc_ecma_transforms_base::{fixer::fixer, resolver};
use swc_ecma_transforms_react::{Options as JsxOptions, react};
use swc_ecma_transforms_typescript::{Config as TsStripConfig, TsxConfig, strip, tsx};
use swc_ecma_visit::VisitMutWith;

use sandpiper_vfs::Unit;

use crate::compile::Session;
use crate::error::TransformError;
use crate::rewrite::ImportRewriter;

/// Transform one unit's normalized source into executable text.
///
/// Fails only when SWC cannot parse or emit the unit; the caller owns the
/// degradation policy for that case.
pub(crate) fn transform_unit(
    session: &mut Session<'_>,
    unit: &Unit,
    source: &str,
) -> Result<String, TransformError> {
    let target = session.options().target;

    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom(unit.name.clone())),
        source.to_string(),
    );

    let syntax = Syntax::Typescript(TsSyntax {
        tsx: unit.kind.is_markup(),
        decorators: true,
        dts: false,
        no_early_errors: false,
        disallow_ambiguous_jsx_like: false,
    });

    let lexer = Lexer::new(syntax, target, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .map_err(|e| TransformError::Parse(format!("Failed to parse unit: {:?}", e.kind())))?;

    for _e in parser.take_errors() {}

    let mut program = Program::Module(module);

    GLOBALS.set(&Globals::default(), || {
        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();

        program.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, true));

        if unit.kind.is_markup() {
            // Strip types while keeping JSX alive for the React lowering;
            // the pragma config keeps the React import from being elided.
            program.mutate(&mut tsx(
                cm.clone(),
                TsStripConfig::default(),
                TsxConfig::default(),
                NoopComments,
                unresolved_mark,
                top_level_mark,
            ));
            program.mutate(&mut react::<NoopComments>(
                cm.clone(),
                None,
                JsxOptions::default(),
                top_level_mark,
                unresolved_mark,
            ));
        } else {
            program.mutate(&mut strip(unresolved_mark, top_level_mark));
        }

        program.visit_mut_with(&mut ImportRewriter::new(session, &unit.name));
        program.visit_mut_with(&mut fixer(None));
    });

    let module = match program {
        Program::Module(m) => m,
        Program::Script(_) => {
            return Err(TransformError::Transform(
                "Expected module, got script".to_string(),
            ));
        }
    };

    let mut buf = vec![];

    {
        let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);

        let codegen_config = CodegenConfig::default()
            .with_target(target)
            .with_ascii_only(false)
            .with_minify(false)
            .with_omit_last_semi(false);

        let mut emitter = Emitter {
            cfg: codegen_config,
            cm: cm.clone(),
            comments: None,
            wr: writer,
        };

        emitter
            .emit_module(&module)
            .map_err(|e| TransformError::Codegen(format!("Failed to emit code: {}", e)))?;
    }

    String::from_utf8(buf).map_err(|e| TransformError::Codegen(format!("Invalid UTF-8 output: {}", e)))
}
