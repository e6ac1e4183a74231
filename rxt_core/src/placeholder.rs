//! Placeholder syntax for plain message text: a parenthesized name such as
//! `(name)`, unrelated to the `{…}` template directives. A `(` preceded by
//! a backslash (`\(`) is escaped and never starts a placeholder.

use std::collections::HashMap;

/// Byte ranges of every unescaped `(name)` span, in left-to-right order.
fn placeholder_spans(text: &str) -> Vec<(usize, usize)> {
	let bytes = text.as_bytes();
	let mut spans = Vec::new();
	let mut index = 0;

	while index < bytes.len() {
		match bytes[index] {
			b'\\' if bytes.get(index + 1) == Some(&b'(') => {
				index += 2;
			}
			b'(' => {
				if let Some(close) = text[index + 1..].find(')') {
					let end = index + 1 + close + 1;
					spans.push((index, end));
					index = end;
				} else {
					// Unclosed parenthesis: not a placeholder.
					index += 1;
				}
			}
			_ => {
				index += 1;
			}
		}
	}

	spans
}

/// Find every unescaped placeholder in `text`, in order of occurrence and
/// without deduplication. The returned names are the literal text between
/// the parentheses and may contain spaces.
pub fn find_variables(text: &str) -> Vec<String> {
	placeholder_spans(text)
		.into_iter()
		.map(|(start, end)| text[start + 1..end - 1].to_string())
		.collect()
}

/// Whether `text` contains at least one unescaped placeholder.
pub fn has_variables(text: &str) -> bool {
	!placeholder_spans(text).is_empty()
}

/// Replace placeholders with the supplied values. A placeholder with a
/// missing or empty value is left verbatim as `(name)`, which lets a user
/// fill a message in iteratively. The escape `\(` renders as a literal `(`
/// with the backslash consumed.
pub fn replace_variables(text: &str, values: &HashMap<String, String>) -> String {
	let bytes = text.as_bytes();
	let mut output = String::with_capacity(text.len());
	let mut literal_start = 0;
	let mut index = 0;

	while index < bytes.len() {
		match bytes[index] {
			b'\\' if bytes.get(index + 1) == Some(&b'(') => {
				output.push_str(&text[literal_start..index]);
				output.push('(');
				index += 2;
				literal_start = index;
			}
			b'(' => {
				let Some(close) = text[index + 1..].find(')') else {
					index += 1;
					continue;
				};

				let end = index + 1 + close + 1;
				let name = &text[index + 1..end - 1];
				output.push_str(&text[literal_start..index]);

				match values.get(name).filter(|value| !value.is_empty()) {
					Some(value) => output.push_str(value),
					None => output.push_str(&text[index..end]),
				}

				index = end;
				literal_start = index;
			}
			_ => {
				index += 1;
			}
		}
	}

	output.push_str(&text[literal_start..]);
	output
}
