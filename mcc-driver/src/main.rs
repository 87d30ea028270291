//! Mini Compiler Driver
//!
//! Reads one statement per line from a file or stdin and prints the
//! instructions for each. A statement that fails to compile prints
//! `Compile Error!` and a diagnostic; the remaining lines are still
//! compiled unless `--fail-fast` is given.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use mcc_codegen::Program;
use mcc_common::{CompilerError, ErrorReporter, SourceLocation};
use mcc_frontend::{dump_tokens, AstPrinter, Frontend};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Longest accepted statement line in bytes
const DEFAULT_MAX_LINE_LENGTH: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "mcc")]
#[command(about = "Compiles x/y/z arithmetic statements to register machine code")]
#[command(version)]
struct Cli {
    /// Input file with one statement per line (defaults to stdin)
    input: Option<PathBuf>,

    /// Output format for compiled statements
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the tokens of every line to stderr
    #[arg(long)]
    dump_tokens: bool,

    /// Print the AST of every statement to stderr
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "tree")]
    dump_ast: Option<AstFormat>,

    /// Reject lines longer than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,

    /// Stop at the first statement that fails to compile
    #[arg(long)]
    fail_fast: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AstFormat {
    Tree,
    Compact,
}

/// Settings for one run over an input
#[derive(Debug, Clone)]
struct DriverOptions {
    filename: String,
    format: OutputFormat,
    dump_tokens: bool,
    dump_ast: Option<AstFormat>,
    max_line_length: usize,
    fail_fast: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            filename: "<stdin>".to_string(),
            format: OutputFormat::Text,
            dump_tokens: false,
            dump_ast: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            fail_fast: false,
        }
    }
}

impl From<&Cli> for DriverOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            filename: cli
                .input
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<stdin>".to_string()),
            format: cli.format,
            dump_tokens: cli.dump_tokens,
            dump_ast: cli.dump_ast,
            max_line_length: cli.max_line_length,
            fail_fast: cli.fail_fast,
        }
    }
}

/// Outcome of a run
#[derive(Debug, Default, PartialEq, Eq)]
struct RunSummary {
    statements: usize,
    failures: usize,
    stopped_early: bool,
}

impl RunSummary {
    /// A fail-fast stop exits cleanly, like a run without failures
    fn succeeded(&self) -> bool {
        self.failures == 0 || self.stopped_early
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(summary) if summary.succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.parse_filters("mcc=debug,mcc_frontend=debug,mcc_codegen=debug");
    }
    builder.format_timestamp(None).init();
}

fn execute(cli: &Cli) -> Result<RunSummary> {
    let options = DriverOptions::from(cli);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            run(BufReader::new(file), &mut out, &mut err, &options)
        }
        None => run(io::stdin().lock(), &mut out, &mut err, &options),
    }
}

/// Compile every line of `input`, writing programs to `out` and
/// diagnostics to `err`.
fn run<R: BufRead, W: Write, E: Write>(
    input: R,
    out: &mut W,
    err: &mut E,
    options: &DriverOptions,
) -> Result<RunSummary> {
    let frontend = Frontend::new(options.filename.clone());
    let mut reporter = ErrorReporter::new();
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line
            .map_err(CompilerError::from)
            .with_context(|| format!("Failed to read line {} of {}", index + 1, options.filename))?;
        let line = line.trim_end_matches('\r');
        let line_no = u32::try_from(index + 1).unwrap_or(u32::MAX);
        summary.statements += 1;

        let mut dumps = String::new();
        let result = compile_line(&frontend, line, line_no, options, &mut dumps);
        err.write_all(dumps.as_bytes())?;

        match result {
            Ok(program) => write_program(out, &program, options.format)?,
            Err(error) => {
                summary.failures += 1;
                writeln!(out, "Compile Error!")?;
                let diagnostic = reporter.report_error(&error);
                writeln!(err, "{}", diagnostic)?;

                if options.fail_fast {
                    warn!("stopping at line {}: {}", line_no, error.category());
                    summary.stopped_early = true;
                    break;
                }
            }
        }
    }

    out.flush()?;
    info!("{} statements, {}", summary.statements, reporter.summary());
    Ok(summary)
}

fn compile_line(
    frontend: &Frontend,
    line: &str,
    line_no: u32,
    options: &DriverOptions,
    dumps: &mut String,
) -> Result<Program, CompilerError> {
    if line.len() > options.max_line_length {
        return Err(CompilerError::lexer_error(
            format!("line is longer than {} characters", options.max_line_length),
            SourceLocation::new(frontend.filename(), line_no, 1),
        ));
    }

    if options.dump_tokens {
        dumps.push_str(&dump_tokens(&frontend.tokenize(line, line_no)?));
    }

    if let Some(format) = options.dump_ast {
        if let Some(expr) = frontend.parse_statement(line, line_no)? {
            match format {
                AstFormat::Tree => dumps.push_str(&AstPrinter::print(&expr)),
                AstFormat::Compact => {
                    dumps.push_str(&expr.to_string());
                    dumps.push('\n');
                }
            }
        }
    }

    frontend.compile_statement(line, line_no)
}

fn write_program<W: Write>(out: &mut W, program: &Program, format: OutputFormat) -> Result<()> {
    if program.is_empty() {
        return Ok(());
    }

    match format {
        OutputFormat::Text => write!(out, "{}", program.to_text())?,
        OutputFormat::Json => writeln!(out, "{}", program.to_json()?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    struct Output {
        summary: RunSummary,
        stdout: String,
        stderr: String,
    }

    fn run_with(input: &str, options: &DriverOptions) -> Output {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let summary = run(Cursor::new(input), &mut stdout, &mut stderr, options).unwrap();
        Output {
            summary,
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    #[test]
    fn test_compiles_each_line() {
        let output = run_with("x=1;\n;\ny=x;\n", &DriverOptions::default());
        assert_eq!(
            output.stdout,
            indoc! {"
                add r1 0 1
                add r0 0 r1
                store [0] r0
                load r1 [0]
                add r0 0 r1
                store [4] r0
            "}
        );
        assert_eq!(output.stderr, "");
        assert_eq!(
            output.summary,
            RunSummary {
                statements: 3,
                failures: 0,
                stopped_early: false
            }
        );
        assert!(output.summary.succeeded());
    }

    #[test]
    fn test_failed_statement_does_not_stop_the_run() {
        let output = run_with("1++;\nz=2;\n", &DriverOptions::default());
        assert_eq!(
            output.stdout,
            indoc! {"
                Compile Error!
                add r1 0 2
                add r0 0 r1
                store [8] r0
            "}
        );
        assert_eq!(
            output.stderr,
            indoc! {"
                error: <stdin>:1:1: lvalue required as operand of increment
                  note: statement rejected with LvalueError
            "}
        );
        assert_eq!(output.summary.failures, 1);
        assert!(!output.summary.succeeded());
    }

    #[test]
    fn test_fail_fast_stops_at_first_error() {
        let options = DriverOptions {
            fail_fast: true,
            ..DriverOptions::default()
        };
        let output = run_with("x+;\ny=1;\n", &options);
        assert_eq!(output.stdout, "Compile Error!\n");
        assert_eq!(output.summary.statements, 1);
        assert!(output.summary.stopped_early);
        assert!(output.summary.succeeded());
    }

    #[test]
    fn test_json_output() {
        let options = DriverOptions {
            format: OutputFormat::Json,
            ..DriverOptions::default()
        };
        let output = run_with("z=2;\n", &options);
        assert_eq!(
            output.stdout,
            concat!(
                r#"[{"op":"arith","opcode":"add","dst":1,"lhs":{"imm":0},"rhs":{"imm":2}},"#,
                r#"{"op":"arith","opcode":"add","dst":0,"lhs":{"imm":0},"rhs":{"reg":1}},"#,
                r#"{"op":"store","slot":8,"src":0}]"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_line_too_long() {
        let options = DriverOptions {
            max_line_length: 5,
            ..DriverOptions::default()
        };
        let output = run_with("x=1;\nx=1+2+3;\n", &options);
        assert_eq!(output.summary.failures, 1);
        assert!(output.stdout.ends_with("Compile Error!\n"));
        assert!(output.stderr.contains("statement rejected with LexError"));
    }

    #[test]
    fn test_debug_dumps_go_to_stderr() {
        let options = DriverOptions {
            dump_tokens: true,
            dump_ast: Some(AstFormat::Compact),
            ..DriverOptions::default()
        };
        let output = run_with("-x;\n", &options);
        assert_eq!(
            output.stderr,
            indoc! {"
                <Index =   0>: Minus     , symbol = '-'
                <Index =   1>: Identifier, name   = x
                <Index =   2>: End
                Minus(Identifier(x))
            "}
        );
        assert_eq!(output.stdout, "load r0 [0]\nsub r0 0 r0\n");
    }

    #[test]
    fn test_unreadable_input_is_an_io_error() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let input = Cursor::new(b"x=1;\n\xff\xfe;\n".to_vec());
        let error = run(input, &mut stdout, &mut stderr, &DriverOptions::default()).unwrap_err();

        let cause = error
            .downcast_ref::<CompilerError>()
            .expect("Expected a compiler error");
        assert_eq!(cause.category(), "IoError");
        assert_eq!(error.to_string(), "Failed to read line 2 of <stdin>");
        assert_eq!(String::from_utf8(stdout).unwrap(), "add r1 0 1\nadd r0 0 r1\nstore [0] r0\n");
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["mcc", "prog.mc", "--format", "json", "--dump-ast", "--fail-fast"]);
        let options = DriverOptions::from(&cli);
        assert_eq!(options.filename, "prog.mc");
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(options.dump_ast, Some(AstFormat::Tree));
        assert_eq!(options.max_line_length, DEFAULT_MAX_LINE_LENGTH);
        assert!(options.fail_fast);
    }
}
