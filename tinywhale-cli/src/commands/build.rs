//! Build command implementation.
//!
//! Compiles a single `.tw` source file to a wasm module, writing either the
//! binary (`.wasm`) or the text form (`.wat`) to the output directory.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use twc_drv::{compile, CompileError, CompileOptions};

use crate::commands::common::error_messages;
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{CliError, Result};

/// Output encoding requested for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Wasm,
    Wat,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "wasm" => Ok(Self::Wasm),
            "wat" => Ok(Self::Wat),
            other => Err(CliError::Validation(format!(
                "{} {other}",
                error_messages::UNKNOWN_FORMAT
            ))),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Wasm => "wasm",
            Self::Wat => "wat",
        }
    }
}

/// Arguments for the build command.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Path to the `.tw` source file to compile.
    pub input: PathBuf,
    /// Output directory.
    pub output: Option<PathBuf>,
    /// Output encoding: "wasm" or "wat".
    pub format: String,
    /// Enable optimizations.
    pub optimize: bool,
}

/// Build command handler.
pub struct BuildCommand {
    args: BuildArgs,
    config: Config,
}

impl BuildCommand {
    pub fn new(args: BuildArgs) -> Self {
        Self { args, config: Config::default() }
    }

    /// Execute the command, writing the compiled artifact to disk.
    pub fn run(&self) -> Result<()> {
        self.validate_input()?;
        let format = self.effective_format()?;
        let output_dir = self.effective_output_dir();
        std::fs::create_dir_all(&output_dir)?;

        let source = std::fs::read_to_string(&self.args.input)?;
        let options = CompileOptions {
            filename: self.args.input.to_str().map(str::to_owned),
            optimize: self.args.optimize,
        };

        let result = match compile(&source, options) {
            Ok(result) => result,
            Err(CompileError::CompilationFailed { diagnostics }) => {
                for diagnostic in &diagnostics {
                    warn!(message = %diagnostic.message, "diagnostic");
                }
                return Err(CliError::Compile(CompileError::CompilationFailed { diagnostics }));
            }
            Err(err) => return Err(CliError::Compile(err)),
        };

        let output_path = self.output_file_path(&output_dir, format);
        match format {
            OutputFormat::Wasm => std::fs::write(&output_path, &result.binary)?,
            OutputFormat::Wat => std::fs::write(&output_path, &result.text)?,
        }

        if self.args.verbose {
            info!(path = %output_path.display(), "wrote build artifact");
        }
        for warning in &result.warnings {
            warn!(message = %warning.message, "compiler warning");
        }

        Ok(())
    }

    fn validate_input(&self) -> Result<()> {
        if !self.args.input.exists() {
            return Err(CliError::Validation(format!(
                "{} {}",
                error_messages::INPUT_PATH_NOT_EXIST,
                self.args.input.display()
            )));
        }
        if !self.args.input.is_file() {
            return Err(CliError::Validation(format!(
                "{} {}",
                error_messages::INPUT_PATH_NOT_FILE,
                self.args.input.display()
            )));
        }
        Ok(())
    }

    fn effective_format(&self) -> Result<OutputFormat> {
        OutputFormat::parse(&self.args.format)
    }

    fn effective_output_dir(&self) -> PathBuf {
        self.args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.config.output_dir))
    }

    fn output_file_path(&self, output_dir: &Path, format: OutputFormat) -> PathBuf {
        let stem = self.args.input.file_stem().unwrap_or_default();
        output_dir.join(stem).with_extension(format.extension())
    }
}

impl Command for BuildCommand {
    type Args = BuildArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args, config: Config::default() }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "build"
    }
}

impl CommandDescription for BuildCommand {
    fn description() -> &'static str {
        "Compile a TinyWhale source file to WebAssembly"
    }

    fn help() -> &'static str {
        "Compiles a single .tw source file, writing the resulting wasm module \
         (binary or text) to the output directory."
    }
}

/// Run the build command.
pub fn run_build(args: BuildArgs) -> Result<()> {
    BuildCommand::new(args).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_build_command_name() {
        assert_eq!(<BuildCommand as Command>::name(), "build");
    }

    #[test]
    fn test_build_command_description() {
        assert_eq!(
            <BuildCommand as CommandDescription>::description(),
            "Compile a TinyWhale source file to WebAssembly"
        );
    }

    #[test]
    fn test_build_writes_wasm_by_default() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let input = write_source(&input_dir, "prog.tw", "panic\n");

        let args = BuildArgs {
            verbose: false,
            input,
            output: Some(output_dir.path().to_path_buf()),
            format: "wasm".to_string(),
            optimize: false,
        };

        run_build(args).expect("build should succeed");
        assert!(output_dir.path().join("prog.wasm").exists());
    }

    #[test]
    fn test_build_writes_wat_text() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let input = write_source(&input_dir, "prog.tw", "panic\n");

        let args = BuildArgs {
            verbose: false,
            input,
            output: Some(output_dir.path().to_path_buf()),
            format: "wat".to_string(),
            optimize: false,
        };

        run_build(args).expect("build should succeed");
        let written = std::fs::read_to_string(output_dir.path().join("prog.wat")).unwrap();
        assert!(written.contains("unreachable"));
    }

    #[test]
    fn test_build_rejects_unknown_format() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let input = write_source(&input_dir, "prog.tw", "panic\n");

        let args = BuildArgs {
            verbose: false,
            input,
            output: Some(output_dir.path().to_path_buf()),
            format: "elf".to_string(),
            optimize: false,
        };

        let err = run_build(args).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_build_rejects_missing_input() {
        let output_dir = TempDir::new().unwrap();

        let args = BuildArgs {
            verbose: false,
            input: PathBuf::from("/nonexistent/prog.tw"),
            output: Some(output_dir.path().to_path_buf()),
            format: "wasm".to_string(),
            optimize: false,
        };

        let err = run_build(args).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_build_propagates_compile_errors() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let input = write_source(&input_dir, "bad.tw", "x: i32<min=0, max=100> = -1\npanic\n");

        let args = BuildArgs {
            verbose: false,
            input,
            output: Some(output_dir.path().to_path_buf()),
            format: "wasm".to_string(),
            optimize: false,
        };

        let err = run_build(args).unwrap_err();
        assert!(matches!(err, CliError::Compile(_)));
    }
}
