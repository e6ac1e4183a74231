use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::MatchMap;
use crate::MatchRecord;
use crate::eval::evaluate_comparison;

/// Matches bare `name.group(N)` references inside `{if}` condition text.
static GROUP_REF: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\.group\((\d+)\)").expect("group reference pattern compiles")
});

/// Matches braced `{name.group(N)}` references inside `{for}` loop bodies.
static BRACED_GROUP_REF: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\.group\((\d+)\)\}")
		.expect("braced group reference pattern compiles")
});

/// The pattern name and zero-based iteration index active inside a `{for}`
/// body. Absent at the top level.
#[derive(Debug, Clone, Copy)]
struct LoopContext<'a> {
	pattern: &'a str,
	index: usize,
}

/// Render a template against a map of extracted matches.
///
/// The template is literal text interleaved with three directive shapes:
///
/// - `{if <condition>}…{/if}` — the body renders only when the numeric
///   condition holds; `{if}` blocks nest.
/// - `{for <patternName>}…{/for}` — the body renders once per match of the
///   named pattern, with `{patternName.group(N)}` references substituted
///   from the current match. The body ends at the first `{/for}`; nested
///   `{for}` is unsupported.
/// - `{var}` — substituted only when a loop is active and `var` is
///   `<activePattern>.group(N)`; any other bare variable passes through
///   verbatim so partially bound templates stay editable.
///
/// Malformed templates degrade instead of erroring: a directive without a
/// matching close stops rendering at that point, and an unmatched `{`
/// copies through as a literal character. Rendering is a pure function of
/// its inputs.
pub fn render(template: &str, matches: &MatchMap) -> String {
	tracing::debug!(template_len = template.len(), patterns = matches.len(), "rendering template");
	render_scoped(template, matches, None)
}

fn render_scoped(template: &str, matches: &MatchMap, context: Option<LoopContext<'_>>) -> String {
	let mut output = String::with_capacity(template.len());
	let mut position = 0;

	while position < template.len() {
		let Some(offset) = template[position..].find('{') else {
			output.push_str(&template[position..]);
			break;
		};

		let brace = position + offset;
		output.push_str(&template[position..brace]);
		let rest = &template[brace..];

		if let Some(after_tag) = rest.strip_prefix("{if ") {
			let Some(condition_end) = after_tag.find('}') else {
				output.push('{');
				position = brace + 1;
				continue;
			};

			let condition = &after_tag[..condition_end];
			let body_start = brace + "{if ".len() + condition_end + 1;

			// No matching close tag: stop rendering here, best effort.
			let Some((body, resume)) = find_matching_if_close(&template[body_start..]) else {
				return output;
			};

			if condition_holds(condition, matches, context) {
				output.push_str(&render_scoped(body, matches, context));
			}

			position = body_start + resume;
		} else if let Some(after_tag) = rest.strip_prefix("{for ") {
			let Some(name_end) = after_tag.find('}') else {
				output.push('{');
				position = brace + 1;
				continue;
			};

			let pattern_name = after_tag[..name_end].trim();
			let body_start = brace + "{for ".len() + name_end + 1;

			let Some(close) = template[body_start..].find("{/for}") else {
				return output;
			};

			let body = &template[body_start..body_start + close];
			output.push_str(&render_loop(body, pattern_name, matches));
			position = body_start + close + "{/for}".len();
		} else {
			let Some(var_end) = rest[1..].find('}') else {
				output.push('{');
				position = brace + 1;
				continue;
			};

			let variable = &rest[1..=var_end];

			match context.and_then(|ctx| resolve_loop_variable(variable, matches, ctx)) {
				Some(value) => output.push_str(value),
				// Unresolved variables pass through verbatim.
				None => output.push_str(&rest[..var_end + 2]),
			}

			position = brace + var_end + 2;
		}
	}

	output
}

/// Locate the `{/if}` matching an already-consumed `{if …}` opening tag.
/// Depth starts at 1; each nested `{if ` increments it and each `{/if}`
/// decrements it. Returns the body slice and the offset just past the
/// matching close, or `None` when the block is never closed.
fn find_matching_if_close(text: &str) -> Option<(&str, usize)> {
	let mut depth = 1usize;
	let mut search = 0usize;

	loop {
		let close = text[search..].find("{/if}")?;
		let open = text[search..].find("{if ");

		match open {
			Some(open) if open < close => {
				depth += 1;
				search += open + "{if ".len();
			}
			_ => {
				depth -= 1;
				let close = search + close;
				if depth == 0 {
					return Some((&text[..close], close + "{/if}".len()));
				}
				search = close + "{/if}".len();
			}
		}
	}
}

/// Render a `{for}` body once per match record. Each iteration substitutes
/// the braced group references for the current match, renders the result
/// recursively (processing nested `{if}` blocks), and trims it; iterations
/// are joined by a single blank line. Zero matches produce no output.
fn render_loop(body: &str, pattern_name: &str, matches: &MatchMap) -> String {
	let records = matches.records(pattern_name);
	let mut parts = Vec::with_capacity(records.len());

	for (index, record) in records.iter().enumerate() {
		let substituted = substitute_group_refs(body, pattern_name, record);
		let context = LoopContext {
			pattern: pattern_name,
			index,
		};
		let rendered = render_scoped(&substituted, matches, Some(context));
		parts.push(rendered.trim().to_string());
	}

	parts.join("\n\n")
}

/// Replace every braced `{pattern.group(N)}` occurrence for the active
/// pattern with the captured text of the current record, or an empty string
/// when the group is unavailable. References to other patterns are left
/// untouched.
fn substitute_group_refs(body: &str, pattern: &str, record: &MatchRecord) -> String {
	BRACED_GROUP_REF
		.replace_all(body, |caps: &Captures<'_>| {
			if &caps[1] != pattern {
				return caps[0].to_string();
			}

			let index = caps[2].parse::<usize>().ok();
			index
				.and_then(|index| record.group(index))
				.unwrap_or("")
				.to_string()
		})
		.into_owned()
}

/// Evaluate an `{if}` condition. Bare `pattern.group(N)` references to the
/// active loop pattern are substituted with their captured text (`0` when
/// unavailable) before the comparison runs. Evaluator failures degrade to
/// `false` rather than aborting the render.
fn condition_holds(condition: &str, matches: &MatchMap, context: Option<LoopContext<'_>>) -> bool {
	let substituted = match context {
		Some(ctx) => substitute_condition_refs(condition, matches, ctx),
		None => Cow::Borrowed(condition),
	};

	evaluate_comparison(&substituted).unwrap_or(false)
}

fn substitute_condition_refs<'a>(
	condition: &'a str,
	matches: &MatchMap,
	context: LoopContext<'_>,
) -> Cow<'a, str> {
	GROUP_REF.replace_all(condition, |caps: &Captures<'_>| {
		if &caps[1] != context.pattern {
			return caps[0].to_string();
		}

		let index = caps[2].parse::<usize>().ok();
		let value = index.and_then(|index| {
			matches
				.records(context.pattern)
				.get(context.index)
				.and_then(|record| record.group(index))
		});

		value.unwrap_or("0").to_string()
	})
}

/// Resolve a bare `{var}` token against the active loop context. Only
/// `<activePattern>.group(N)` references resolve; everything else is left
/// for the caller to emit verbatim. An unavailable group resolves to the
/// empty string.
fn resolve_loop_variable<'a>(
	variable: &str,
	matches: &'a MatchMap,
	context: LoopContext<'_>,
) -> Option<&'a str> {
	let rest = variable.strip_prefix(context.pattern)?;
	let digits = rest.strip_prefix(".group(")?.strip_suffix(')')?;
	let index = digits.parse::<usize>().ok()?;

	let value = matches
		.records(context.pattern)
		.get(context.index)
		.and_then(|record| record.group(index))
		.unwrap_or("");

	Some(value)
}
