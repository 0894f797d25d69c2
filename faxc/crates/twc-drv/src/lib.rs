//! twc-drv - compilation driver.
//!
//! Owns the single entry point, [`compile`], that runs a source string
//! through every phase in order: [`twc_pre`] -> [`twc_lex`]/[`twc_par`] ->
//! [`twc_sem`] -> [`twc_gen`]. Each phase writes into a shared
//! [`twc_util::Handler`]; a failed phase still leaves the handler in a
//! valid state for later phases to read, matching the diagnostic log model
//! the phase crates themselves follow.

use thiserror::Error;
use tracing::{debug, trace};

use twc_gen::generate;
use twc_par::{Parser, TokenStore};
use twc_pre::Preprocessor;
use twc_sem::check;
use twc_util::{Diagnostic, Handler, Level};

/// Options threaded into a single [`compile`] call.
///
/// `filename` is carried through only for diagnostic rendering by callers;
/// the compiler itself never touches the filesystem. `optimize` is
/// forwarded to codegen for forward compatibility - today it changes
/// nothing, since the only optimization this pipeline performs is the
/// baseline wasm-encoder validation every build already runs.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub filename: Option<String>,
    pub optimize: bool,
}

/// Everything a successful compile produces.
#[derive(Debug, Clone)]
pub struct CompileResult {
    pub binary: Vec<u8>,
    pub text: String,
    pub valid: bool,
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("compilation failed")]
    CompilationFailed { diagnostics: Vec<Diagnostic> },

    #[error("code generation failed: {0}")]
    CodeGen(#[from] twc_gen::CodeGenError),
}

pub type Result<T> = std::result::Result<T, CompileError>;

/// Owns every arena produced while compiling one source string. Built and
/// torn down entirely within [`compile`]; nothing outlives the call.
struct CompilationContext<'a> {
    handler: Handler,
    options: &'a CompileOptions,
}

impl<'a> CompilationContext<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self { handler: Handler::new(), options }
    }
}

/// Runs the full pipeline over `source` and returns the generated wasm
/// module, or a [`CompileError`] if any phase logged an error-severity
/// diagnostic.
pub fn compile(source: &str, options: CompileOptions) -> Result<CompileResult> {
    let mut ctx = CompilationContext::new(&options);

    debug!(filename = ?ctx.options.filename, "starting compilation");

    let preprocessed = run_preprocessor(&mut ctx, source);
    trace!(phase = "preprocess", len = preprocessed.len(), "preprocessing done");

    let tokens = TokenStore::lex(&preprocessed, &mut ctx.handler);
    trace!(phase = "lex", tokens = tokens.len(), "lexing done");

    let parse = Parser::new(&tokens, &mut ctx.handler).parse_program();
    trace!(phase = "parse", nodes = parse.nodes.len(), "parsing done");

    let checked = check(&parse.nodes, &tokens, &mut ctx.handler);
    debug!(phase = "check", succeeded = checked.succeeded, "checking done");

    let gen_result = if checked.succeeded {
        generate(&checked, &parse.nodes, &tokens)
    } else {
        Err(twc_gen::CodeGenError::EmptyProgram)
    };

    if ctx.handler.has_errors() {
        return Err(CompileError::CompilationFailed { diagnostics: ctx.handler.diagnostics() });
    }

    let gen_result = gen_result?;
    debug!(
        phase = "codegen",
        valid = gen_result.valid,
        bytes = gen_result.binary.len(),
        "codegen done"
    );

    let warnings = ctx
        .handler
        .diagnostics()
        .into_iter()
        .filter(|d| d.level == Level::Warning)
        .collect();

    Ok(CompileResult {
        binary: gen_result.binary,
        text: gen_result.text,
        valid: gen_result.valid,
        warnings,
    })
}

fn run_preprocessor(ctx: &mut CompilationContext, source: &str) -> String {
    let output = Preprocessor::new(source)
        .run()
        .expect("preprocessor invariant violated on well-formed input");
    for diagnostic in output.diagnostics {
        ctx.handler.emit_diagnostic(diagnostic);
    }
    output.text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_panic_compiles_cleanly() {
        let result = compile("panic\n", CompileOptions::default()).expect("compile");
        assert_eq!(&result.binary[0..4], b"\0asm");
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn scalar_binding_compiles() {
        let result = compile("x: i32 = 1\npanic\n", CompileOptions::default()).expect("compile");
        assert!(result.valid);
        assert!(result.text.contains("local.set 0"));
    }

    #[test]
    fn refined_binding_out_of_range_fails_with_diagnostic() {
        let source = "x: i32<min=0, max=100> = -1\npanic\n";
        let err = compile(source, CompileOptions::default()).unwrap_err();
        match err {
            CompileError::CompilationFailed { diagnostics } => {
                assert!(diagnostics.iter().any(|d| d.level == Level::Error));
            }
            other => panic!("expected CompilationFailed, got {other:?}"),
        }
    }

    #[test]
    fn empty_source_is_an_empty_program_error() {
        let err = compile("", CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::CodeGen(twc_gen::CodeGenError::EmptyProgram)));
    }

    #[test]
    fn match_without_catch_all_fails_checking() {
        let source = "x: i32 = 1\nresult: i32 = match x\n\t0 -> 100\n\t1 -> 200\npanic\n";
        let err = compile(source, CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::CompilationFailed { .. }));
    }
}
