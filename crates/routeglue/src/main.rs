//! routeglue CLI.
//!
//! Compiles OpenAPI 3.0 documents into route tables, prints the inlined
//! document, or checks a document without a handler set.

use std::path::Path;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use routeglue_compiler::{
    compile_routes_with_options, resolve_document, AnyHandler, CompileError, CompileOptions,
    FilterDepth, HandlerNames, HandlerRegistry, RouteDescriptor,
};
use routeglue_lib::loader::{load_document, load_handler_list};
use routeglue_lib::output::{render_json, render_text, OutputFormat};
use routeglue_telemetry::{
    init_logging, log_compile_failed, log_routes_compiled, log_spec_loaded, log_startup,
    LogFormat, TelemetryConfig,
};

#[derive(Parser, Debug)]
#[command(name = "routeglue", about = "OpenAPI route compiler", version)]
struct Cli {
    /// Log level (RUST_LOG takes precedence).
    #[arg(long, global = true, env = "ROUTEGLUE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log format (json or pretty).
    #[arg(long, global = true, env = "ROUTEGLUE_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a spec into a route table, binding every operation to a handler.
    Compile {
        #[command(flatten)]
        compile: CompileArgs,

        /// Available handler name (repeatable).
        #[arg(long = "handler", value_name = "NAME")]
        handlers: Vec<String>,

        /// File listing available handler names, one per line.
        #[arg(long = "handler-file", value_name = "FILE")]
        handler_file: Option<String>,
    },

    /// Compile a spec accepting any handler name.
    ///
    /// Reports reference, schema and document errors (E2001, E2002, E2004-E2007).
    Check {
        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Print the spec with every internal $ref inlined, as JSON.
    Resolve {
        /// Input spec file (YAML or JSON).
        #[arg(short, long)]
        spec: String,
    },
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Input spec file (YAML or JSON).
    #[arg(short, long)]
    spec: String,

    /// Output format (text or json).
    #[arg(long, default_value = "text")]
    format: String,

    /// URL prefix prepended to every route.
    #[arg(long)]
    prefix: Option<String>,

    /// readOnly/writeOnly filter depth (shallow or recursive).
    #[arg(long, default_value = "shallow")]
    filter_depth: String,

    /// Emit a `required` list in parameter schemas.
    #[arg(long)]
    derive_required: bool,
}

impl CompileArgs {
    fn options(&self) -> Option<CompileOptions> {
        let depth = FilterDepth::parse(&self.filter_depth)?;
        let mut options = CompileOptions::new()
            .with_filter_depth(depth)
            .with_required_parameters(self.derive_required);
        if let Some(prefix) = &self.prefix {
            options = options.with_prefix(prefix.clone());
        }
        Some(options)
    }
}

/// Load the spec file, printing the failure.
fn load_spec(spec: &str) -> Option<Value> {
    match load_document(Path::new(spec)) {
        Ok(document) => {
            log_spec_loaded!(spec = %spec);
            Some(document)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            None
        }
    }
}

/// Compile against `registry` and print the route table.
fn compile_and_print<R: HandlerRegistry>(
    args: &CompileArgs,
    document: Value,
    registry: &R,
) -> ExitCode {
    let Some(format) = OutputFormat::parse(&args.format) else {
        eprintln!("error: unknown output format: {} (expected text or json)", args.format);
        return ExitCode::from(2);
    };

    let Some(options) = args.options() else {
        eprintln!(
            "error: unknown filter depth: {} (expected shallow or recursive)",
            args.filter_depth
        );
        return ExitCode::from(2);
    };

    let routes = match compile_routes_with_options(document, registry, &options) {
        Ok(routes) => routes,
        Err(e) => return compile_failed(&args.spec, &e),
    };
    log_routes_compiled!(spec = %args.spec, routes = routes.len());

    print_routes(&routes, format)
}

fn print_routes<H>(routes: &[RouteDescriptor<H>], format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(routes));
            eprintln!("compiled {} route(s)", routes.len());
        }
        OutputFormat::Json => match render_json(routes) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize routes: {}", e);
                return ExitCode::from(1);
            }
        },
    }
    ExitCode::SUCCESS
}

fn compile_failed(spec: &str, error: &CompileError) -> ExitCode {
    log_compile_failed!(spec = %spec, code = error.code(), error = %error);
    eprintln!("error: {}", error.report());
    ExitCode::from(1)
}

/// Run the compile command.
fn run_compile(args: &CompileArgs, handlers: &[String], handler_file: Option<&str>) -> ExitCode {
    let mut registry: HandlerNames = handlers.iter().cloned().collect();
    if let Some(file) = handler_file {
        match load_handler_list(Path::new(file)) {
            Ok(names) => {
                for name in names {
                    registry.insert(name);
                }
            }
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(1);
            }
        }
    }

    let Some(document) = load_spec(&args.spec) else {
        return ExitCode::from(1);
    };
    compile_and_print(args, document, &registry)
}

/// Run the check command.
fn run_check(args: &CompileArgs) -> ExitCode {
    let Some(document) = load_spec(&args.spec) else {
        return ExitCode::from(1);
    };
    compile_and_print(args, document, &AnyHandler)
}

/// Run the resolve command.
fn run_resolve(spec: &str) -> ExitCode {
    let Some(document) = load_spec(spec) else {
        return ExitCode::from(1);
    };

    let resolved = match resolve_document(document) {
        Ok(resolved) => resolved,
        Err(e) => return compile_failed(spec, &e),
    };

    match serde_json::to_string_pretty(&resolved) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize document: {}", e);
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!("error: unknown log format: {} (expected json or pretty)", cli.log_format);
        return ExitCode::from(2);
    };
    let config = TelemetryConfig::new()
        .with_log_level(cli.log_level.clone())
        .with_log_format(log_format);
    if let Err(e) = init_logging(&config) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }
    log_startup!(service = %config.service_name, version = env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Compile {
            compile,
            handlers,
            handler_file,
        } => run_compile(&compile, &handlers, handler_file.as_deref()),
        Commands::Check { compile } => run_check(&compile),
        Commands::Resolve { spec } => run_resolve(&spec),
    }
}
