use clap::Parser;
use miette::{Diagnostic, MietteHandlerOpts, NamedSource, Report};
use steptrace_interpreter::{DEFAULT_RECURSION_LIMIT, TraceConfig, TraceError, Tracer};
use steptrace_parser::{ParseError, build_display_tree, render_tree};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "steptrace",
    version,
    about = "Trace a small Python program statement by statement",
    long_about = "Prints the syntax tree of a restricted Python program, then executes its \
                  module-level statements one at a time, reporting the variables after each \
                  statement and the test, result and distance to the boundary of each loop check."
)]
struct Cli {
    /// Python source file to trace (use '-' to read from stdin)
    #[arg(value_name = "FILE", default_value = "test1.txt")]
    file: PathBuf,

    /// Skip the syntax tree dump
    #[arg(long)]
    no_tree: bool,

    /// Only print the syntax tree
    #[arg(long)]
    no_trace: bool,

    /// Maximum depth of nested function calls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RECURSION_LIMIT)]
    recursion_limit: usize,

    /// Abort after processing this many statements, loop tests and markers
    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,
}

impl Cli {
    fn trace_config(&self) -> TraceConfig {
        TraceConfig::default()
            .with_recursion_limit(self.recursion_limit)
            .with_max_steps(self.max_steps)
    }
}

#[derive(Error, Diagnostic, Debug)]
enum CliError {
    #[error("Failed to read {path}")]
    #[diagnostic(
        code(steptrace::cli::read),
        help("Pass the path of a Python source file, or '-' to read from stdin")
    )]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Trace(#[from] TraceError),

    #[error("Failed to write output")]
    #[diagnostic(code(steptrace::cli::write))]
    Write(#[from] io::Error),
}

fn main() {
    // Set up miette error reporting with syntax highlighting
    setup_miette_handler();
    init_tracing();

    let cli = Cli::parse();

    let (source, source_name) = match read_source(&cli.file) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{:?}", Report::new(e));
            process::exit(1);
        }
    };
    tracing::debug!(source = %source_name, bytes = source.len(), "read program");

    let mut out = BufWriter::new(io::stdout().lock());
    let result = run(&cli, &source, &mut out);
    // Lines traced before a failure are still reported
    let flushed = out.flush().map_err(CliError::from);

    if let Err(e) = result.and(flushed) {
        let report = Report::new(e)
            .with_source_code(NamedSource::new(source_name, source).with_language("Python"));
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

/// Configure miette for graphical error reporting with syntax highlighting
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;
    use syntect::parsing::SyntaxSet;

    // The default syntax set already bundles Python
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();

    let theme = &theme_set.themes["base16-ocean.dark"];
    let highlighter = SyntectHighlighter::new(syntax_set, theme.clone(), true);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .with_syntax_highlighting(highlighter.clone())
                .build(),
        )
    }))
    .ok();
}

/// Install a stderr subscriber when `RUST_LOG` is set
///
/// Stdout carries the trace itself, so diagnostics never go there.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(EnvFilter::from_default_env())
        .init();
}

fn read_source(path: &Path) -> Result<(String, String), CliError> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok((buffer, "<stdin>".to_string()));
    }

    let name = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(source) => Ok((source, name)),
        Err(source) => Err(CliError::Read { path: name, source }),
    }
}

/// Print the tree dump and the trace of `source` into `out`
fn run<W: Write>(cli: &Cli, source: &str, out: &mut W) -> Result<(), CliError> {
    let program = steptrace_parser::parse_program(source)?;

    if !cli.no_tree {
        write!(out, "{}", render_tree(&program))?;
    }

    if !cli.no_trace {
        let tree = build_display_tree(&program);
        Tracer::new(tree.statements(), &mut *out, cli.trace_config()).run()?;
    }

    Ok(())
}
