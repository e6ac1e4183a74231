use std::path::Path;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use rxt_cli::Commands;
use rxt_cli::OutputFormat;
use rxt_cli::RxtCli;
use rxt_core::AnyEmptyResult;
use rxt_core::MatchMap;
use rxt_core::PatternSet;
use rxt_core::evaluate_arithmetic;
use rxt_core::evaluate_comparison;
use rxt_core::find_variables;
use rxt_core::render;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = RxtCli::parse();

	// Respect NO_COLOR, the --no-color flag, and non-tty stdout.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	if args.verbose {
		tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
			.with_writer(std::io::stderr)
			.init();
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Render {
			patterns,
			template,
			input,
			format,
		}) => run_render(&patterns, &template, input.as_deref(), format),
		Some(Commands::Eval { expression }) => run_eval(&expression),
		Some(Commands::Vars { text, format }) => run_vars(&text, format),
		None => {
			eprintln!("No subcommand specified. Run `rxt --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render through miette for rich diagnostics with help text and
		// error codes where possible.
		match e.downcast::<rxt_core::RxtError>() {
			Ok(rxt_err) => {
				let report: miette::Report = (*rxt_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run_render(
	patterns: &Path,
	template: &Path,
	input: Option<&Path>,
	format: OutputFormat,
) -> AnyEmptyResult {
	let set = PatternSet::load(patterns)?;
	set.validate()?;

	let template = std::fs::read_to_string(template)?;
	let text = match input {
		Some(path) => std::fs::read_to_string(path)?,
		None => std::io::read_to_string(std::io::stdin())?,
	};

	let matches = MatchMap::scan(&set.patterns, &text)?;
	let output = render(&template, &matches);

	match format {
		OutputFormat::Text => println!("{output}"),
		OutputFormat::Json => {
			let value = serde_json::json!({
				"output": output,
				"matches": &matches,
			});
			println!("{}", serde_json::to_string_pretty(&value)?);
		}
	}

	Ok(())
}

/// The comparison operators checked when deciding whether an expression is
/// a comparison or pure arithmetic.
const COMPARISON_OPERATORS: [&str; 6] = ["<=", ">=", "==", "!=", "<", ">"];

fn run_eval(expression: &str) -> AnyEmptyResult {
	let is_comparison = COMPARISON_OPERATORS.iter().any(|op| expression.contains(op));

	if is_comparison {
		println!("{}", evaluate_comparison(expression)?);
	} else {
		println!("{}", evaluate_arithmetic(expression)?);
	}

	Ok(())
}

fn run_vars(text: &str, format: OutputFormat) -> AnyEmptyResult {
	let names = find_variables(text);

	match format {
		OutputFormat::Text => {
			for name in &names {
				println!("{name}");
			}
		}
		OutputFormat::Json => println!("{}", serde_json::to_string(&names)?),
	}

	Ok(())
}
