use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Extract regex matches from text and render them through template scripts.",
	long_about = "rxt is a template scripting engine driven by named regular expressions.\n\nA \
	              pattern set maps names to regexes; rxt extracts every match of every pattern \
	              from the input text, then renders a template that can loop over the matches \
	              ({for name}...{/for}), branch on numeric conditions computed from captured \
	              groups ({if name.group(1) > 100}...{/if}), and substitute captured text \
	              ({name.group(1)}).\n\nQuick start:\n  rxt render -p rxt.toml -t template.txt \
	              -i input.txt\n  rxt eval \"2 + 3 * 4\"\n  rxt vars \"Hello (name)!\""
)]
pub struct RxtCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Enable verbose output (debug-level tracing on stderr).
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Scan input text with a pattern set and render a template against the
	/// matches.
	///
	/// The pattern set is a TOML file with a `[[patterns]]` array of
	/// `name`/`regex` entries. Every pattern is applied to the input text
	/// (leftmost, non-overlapping matching) and the template is rendered
	/// against the resulting match map. Malformed templates render
	/// best-effort; only invalid regexes abort the command.
	Render {
		/// Path to the pattern set file (TOML with a `[[patterns]]` array).
		#[arg(long, short)]
		patterns: PathBuf,

		/// Path to the template file.
		#[arg(long, short)]
		template: PathBuf,

		/// Path to the input text to scan. Reads stdin when omitted.
		#[arg(long, short)]
		input: Option<PathBuf>,

		/// Output format. Use `text` for the rendered output alone, or
		/// `json` for the output together with the extracted match map.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Evaluate an arithmetic or comparison expression.
	///
	/// Useful for testing `{if}` conditions before putting them in a
	/// template. Expressions containing a comparison operator (`<=`, `>=`,
	/// `==`, `!=`, `<`, `>`) print `true` or `false`; pure arithmetic
	/// expressions print their numeric value.
	Eval {
		/// The expression to evaluate.
		expression: String,
	},
	/// List the `(name)` placeholders found in the given text.
	///
	/// Placeholders use the lightweight `(name)` syntax for message
	/// personalization, unrelated to template directives. Escaped
	/// parentheses (`\(`) are ignored.
	Vars {
		/// The text to scan for placeholders.
		text: String,

		/// Output format. Use `text` for one name per line or `json` for a
		/// JSON array.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
