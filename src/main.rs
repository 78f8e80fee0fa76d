use std::{fs, process::ExitCode};

use clap::Parser;
use tracing::Level;
use vexl::{Binding, ConversionFallback, Context, DEFAULT_MAX_DEPTH, EvalOptions, Expression};

/// vexl evaluates a vector math expression against variables given on the
/// command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binds a variable, as `name=value`. Values that are numbers bind as
    /// numbers; anything else is compiled as an expression. Repeatable.
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_binding)]
    set: Vec<(String, String)>,

    /// Fails instead of reading unknown variables as zero.
    #[arg(long)]
    strict: bool,

    /// Reads text variables that are not numbers as zero instead of failing.
    #[arg(long)]
    substitute_zero: bool,

    /// Maximum nesting of variables bound to expressions.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Prints the unknown variables instead of evaluating.
    #[arg(short, long)]
    unknowns: bool,

    /// Prints the compiled instructions before evaluating.
    #[arg(short, long)]
    instructions: bool,

    /// Tells vexl to read the expression from a file instead.
    #[arg(short, long)]
    file: bool,

    /// Logs to stderr; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn parse_binding(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg.split_once('=')
                           .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}'"))?;
    let name = name.trim();

    if name.is_empty() {
        return Err(format!("missing variable name in `{arg}'"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

fn build_context(bindings: &[(String, String)]) -> Result<Context, vexl::ParseError> {
    let mut context = Context::new();

    for (name, value) in bindings {
        let binding = match value.parse::<f64>() {
            Ok(n) => Binding::Number(n),
            Err(_) => Expression::parse(value)?.into(),
        };
        context.insert(name.as_str(), binding);
    }

    Ok(context)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt().with_max_level(level)
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = if args.file {
        fs::read_to_string(&args.contents).map_err(|e| {
                                              format!("Failed to read the input file '{}': {e}",
                                                      &args.contents)
                                          })?
    } else {
        args.contents
    };

    let expression = Expression::parse(source.trim())?;
    let context = build_context(&args.set)?;

    if args.instructions {
        for (i, instruction) in expression.instructions().iter().enumerate() {
            println!("{i:>4}  {instruction}");
        }
    }

    if args.unknowns {
        for name in expression.resolve_unknowns(&[&context]) {
            println!("{name}");
        }
        return Ok(());
    }

    let conversion = if args.substitute_zero {
        ConversionFallback::Zero
    } else {
        ConversionFallback::Error
    };
    let options = EvalOptions::default().strict(args.strict)
                                        .conversion(conversion)
                                        .max_depth(args.max_depth);

    println!("{}", expression.evaluate_with(&[&context], &options)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
