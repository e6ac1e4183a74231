use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RxtError {
	#[error(transparent)]
	#[diagnostic(code(rxt::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid regular expression `{pattern}`: {reason}")]
	#[diagnostic(
		code(rxt::invalid_pattern),
		help("rxt patterns use the Rust `regex` crate syntax; see https://docs.rs/regex")
	)]
	InvalidPattern { pattern: String, reason: String },

	#[error("malformed expression: {0}")]
	#[diagnostic(
		code(rxt::malformed_expression),
		help("reduce the parenthesis nesting depth of the expression")
	)]
	MalformedExpression(String),

	#[error("pattern name must not be empty")]
	#[diagnostic(
		code(rxt::empty_pattern_name),
		help("every `[[patterns]]` entry needs a non-empty `name` key")
	)]
	EmptyPatternName,

	#[error("failed to parse pattern set: {0}")]
	#[diagnostic(
		code(rxt::config_parse),
		help("check that the file is valid TOML with a `[[patterns]]` array of `name`/`regex` entries")
	)]
	ConfigParse(String),
}

pub type RxtResult<T> = Result<T, RxtError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
