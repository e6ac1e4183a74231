use logos::Logos;

use crate::RxtError;
use crate::RxtResult;

/// Absolute tolerance used by the `==` and `!=` comparison operators. Two
/// values compare equal when their difference is strictly below this bound.
pub const EQUALITY_TOLERANCE: f64 = 0.0001;

/// Parenthesis/unary nesting cap for the recursive-descent parser. Deeper
/// expressions fail with [`RxtError::MalformedExpression`] instead of
/// overflowing the stack.
const MAX_NESTING_DEPTH: usize = 64;

/// Raw tokens produced by logos for flat tokenization of expression text.
/// Unrecognized bytes become lexer errors and are dropped before parsing,
/// which is what makes garbled input degrade to `0` instead of failing.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum ExprToken {
	#[token("+")]
	Plus,
	#[token("-")]
	Minus,
	#[token("*")]
	Star,
	#[token("/")]
	Slash,
	#[token("%")]
	Percent,
	#[token("(")]
	ParenOpen,
	#[token(")")]
	ParenClose,
	#[token("<=")]
	LessEqual,
	#[token(">=")]
	GreaterEqual,
	#[token("==")]
	Equal,
	#[token("!=")]
	NotEqual,
	#[token("<")]
	Less,
	#[token(">")]
	Greater,
	#[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
	Number(f64),
}

fn lex(expression: &str) -> Vec<ExprToken> {
	ExprToken::lexer(expression).filter_map(Result::ok).collect()
}

/// Cursor over the token stream for the recursive-descent arithmetic parser.
struct ExprCursor<'a> {
	tokens: &'a [ExprToken],
	index: usize,
	depth: usize,
}

impl<'a> ExprCursor<'a> {
	fn new(tokens: &'a [ExprToken]) -> Self {
		Self {
			tokens,
			index: 0,
			depth: 0,
		}
	}

	fn peek(&self) -> Option<ExprToken> {
		self.tokens.get(self.index).copied()
	}

	fn advance(&mut self) {
		self.index += 1;
	}

	/// `expr := term (('+' | '-') term)*`
	fn parse_expr(&mut self) -> RxtResult<f64> {
		let mut value = self.parse_term()?;

		loop {
			match self.peek() {
				Some(ExprToken::Plus) => {
					self.advance();
					value += self.parse_term()?;
				}
				Some(ExprToken::Minus) => {
					self.advance();
					value -= self.parse_term()?;
				}
				_ => break,
			}
		}

		Ok(value)
	}

	/// `term := factor (('*' | '/' | '%') factor)*`
	///
	/// Division and modulo follow `f64` semantics; a zero divisor produces
	/// infinity or NaN rather than an error.
	fn parse_term(&mut self) -> RxtResult<f64> {
		let mut value = self.parse_factor()?;

		loop {
			match self.peek() {
				Some(ExprToken::Star) => {
					self.advance();
					value *= self.parse_factor()?;
				}
				Some(ExprToken::Slash) => {
					self.advance();
					value /= self.parse_factor()?;
				}
				Some(ExprToken::Percent) => {
					self.advance();
					value %= self.parse_factor()?;
				}
				_ => break,
			}
		}

		Ok(value)
	}

	/// `factor := '-' factor | '(' expr ')' | number`
	///
	/// Wherever a number is required but none is present, the factor
	/// evaluates to `0` without consuming the offending token. Partial and
	/// garbled expressions therefore render as zero instead of erroring,
	/// and a missing `)` is tolerated.
	fn parse_factor(&mut self) -> RxtResult<f64> {
		self.depth += 1;
		if self.depth > MAX_NESTING_DEPTH {
			return Err(RxtError::MalformedExpression(format!(
				"nesting exceeds {MAX_NESTING_DEPTH} levels"
			)));
		}

		let value = match self.peek() {
			Some(ExprToken::Minus) => {
				self.advance();
				-self.parse_factor()?
			}
			Some(ExprToken::ParenOpen) => {
				self.advance();
				let value = self.parse_expr()?;
				if matches!(self.peek(), Some(ExprToken::ParenClose)) {
					self.advance();
				}
				value
			}
			Some(ExprToken::Number(number)) => {
				self.advance();
				number
			}
			_ => 0.0,
		};

		self.depth -= 1;

		Ok(value)
	}
}

fn evaluate_tokens(tokens: &[ExprToken]) -> RxtResult<f64> {
	ExprCursor::new(tokens).parse_expr()
}

/// Evaluate a pure arithmetic expression (`+ - * / %`, parentheses, unary
/// minus, standard precedence) to a floating-point number. Trailing garbage
/// is ignored and unparseable positions degrade to `0`.
pub fn evaluate_arithmetic(expression: &str) -> RxtResult<f64> {
	let tokens = lex(expression);
	let value = evaluate_tokens(&tokens)?;

	tracing::trace!(expression, value, "evaluated arithmetic expression");

	Ok(value)
}

/// The comparison operators recognized inside `{if}` conditions, in the
/// fixed priority order used when scanning an expression for its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComparisonOp {
	LessEqual,
	GreaterEqual,
	Equal,
	NotEqual,
	Less,
	Greater,
}

impl ComparisonOp {
	/// Scan priority: two-character operators are considered before their
	/// one-character prefixes, and equality before relational.
	const PRIORITY: [ComparisonOp; 6] = [
		ComparisonOp::LessEqual,
		ComparisonOp::GreaterEqual,
		ComparisonOp::Equal,
		ComparisonOp::NotEqual,
		ComparisonOp::Less,
		ComparisonOp::Greater,
	];

	fn token(self) -> ExprToken {
		match self {
			ComparisonOp::LessEqual => ExprToken::LessEqual,
			ComparisonOp::GreaterEqual => ExprToken::GreaterEqual,
			ComparisonOp::Equal => ExprToken::Equal,
			ComparisonOp::NotEqual => ExprToken::NotEqual,
			ComparisonOp::Less => ExprToken::Less,
			ComparisonOp::Greater => ExprToken::Greater,
		}
	}

	fn apply(self, left: f64, right: f64) -> bool {
		match self {
			ComparisonOp::LessEqual => left <= right,
			ComparisonOp::GreaterEqual => left >= right,
			ComparisonOp::Equal => (left - right).abs() < EQUALITY_TOLERANCE,
			ComparisonOp::NotEqual => (left - right).abs() >= EQUALITY_TOLERANCE,
			ComparisonOp::Less => left < right,
			ComparisonOp::Greater => left > right,
		}
	}
}

/// Evaluate a comparison expression to a boolean. The expression is scanned
/// for the first comparison operator in priority order (`<=`, `>=`, `==`,
/// `!=`, `<`, `>`); the operator splits it into two arithmetic
/// sub-expressions. `==`/`!=` use the [`EQUALITY_TOLERANCE`] while the
/// relational operators compare exactly. An expression containing no
/// comparison operator evaluates to `false`.
pub fn evaluate_comparison(expression: &str) -> RxtResult<bool> {
	let tokens = lex(expression);

	let split = ComparisonOp::PRIORITY.iter().find_map(|op| {
		tokens
			.iter()
			.position(|token| *token == op.token())
			.map(|index| (*op, index))
	});

	let Some((op, index)) = split else {
		return Ok(false);
	};

	let left = evaluate_tokens(&tokens[..index])?;
	let right = evaluate_tokens(&tokens[index + 1..])?;
	let holds = op.apply(left, right);

	tracing::trace!(expression, left, right, holds, "evaluated comparison");

	Ok(holds)
}
