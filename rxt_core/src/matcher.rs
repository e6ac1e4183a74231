use std::borrow::Cow;
use std::collections::HashMap;

use derive_more::Deref;
use derive_more::DerefMut;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::RxtError;
use crate::RxtResult;

/// A named regular expression configured by the caller. The name is the
/// lookup key for the pattern's matches inside a [`MatchMap`] and must be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
	/// The unique name used to reference this pattern from templates.
	pub name: String,
	/// The regular expression source.
	#[serde(alias = "regex")]
	pub source: String,
}

impl Pattern {
	pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: source.into(),
		}
	}

	/// Compile the pattern source into a [`Regex`], reporting
	/// [`RxtError::InvalidPattern`] when the source does not compile.
	pub fn compile(&self) -> RxtResult<Regex> {
		compile_source(&self.source)
	}
}

fn compile_source(source: &str) -> RxtResult<Regex> {
	Regex::new(source).map_err(|error| {
		RxtError::InvalidPattern {
			pattern: source.to_string(),
			reason: error.to_string(),
		}
	})
}

/// A pattern usable by [`extract_matches`]: either a raw source string that
/// is compiled per call, or a precompiled [`Regex`] handle that is borrowed
/// as-is. Caching compiled patterns across calls is the caller's choice.
pub trait PatternHandle {
	fn compiled(&self) -> RxtResult<Cow<'_, Regex>>;
}

impl PatternHandle for Regex {
	fn compiled(&self) -> RxtResult<Cow<'_, Regex>> {
		Ok(Cow::Borrowed(self))
	}
}

impl PatternHandle for Pattern {
	fn compiled(&self) -> RxtResult<Cow<'_, Regex>> {
		Ok(Cow::Owned(self.compile()?))
	}
}

impl PatternHandle for &str {
	fn compiled(&self) -> RxtResult<Cow<'_, Regex>> {
		Ok(Cow::Owned(compile_source(self)?))
	}
}

impl PatternHandle for String {
	fn compiled(&self) -> RxtResult<Cow<'_, Regex>> {
		Ok(Cow::Owned(compile_source(self)?))
	}
}

/// One successful match of a pattern against input text. Immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
	/// The full matched substring (conceptually capture group 0).
	pub text: String,
	/// The captured groups in order. `groups[i]` holds group `i + 1`;
	/// `None` means the group did not participate in the match.
	pub groups: Vec<Option<String>>,
}

impl MatchRecord {
	/// Get a captured group by its 1-indexed number. Index `0` returns the
	/// full matched text. Returns `None` when the index exceeds the group
	/// count or the group did not participate.
	pub fn group(&self, index: usize) -> Option<&str> {
		if index == 0 {
			Some(self.text.as_str())
		} else {
			self.groups.get(index - 1).and_then(|group| group.as_deref())
		}
	}

	/// The number of capture groups (excluding the full match).
	pub fn group_count(&self) -> usize {
		self.groups.len()
	}
}

/// Apply a pattern against `text` using leftmost, non-overlapping successive
/// matching and collect one [`MatchRecord`] per match, in order of
/// occurrence. Returns an empty `Vec` when nothing matches.
pub fn extract_matches(pattern: &impl PatternHandle, text: &str) -> RxtResult<Vec<MatchRecord>> {
	let regex = pattern.compiled()?;
	let mut records = Vec::new();

	for captures in regex.captures_iter(text) {
		let Some(full) = captures.get(0) else {
			continue;
		};

		let groups = (1..captures.len())
			.map(|index| captures.get(index).map(|group| group.as_str().to_string()))
			.collect();

		records.push(MatchRecord {
			text: full.as_str().to_string(),
			groups,
		});
	}

	tracing::debug!(pattern = %regex.as_str(), matches = records.len(), "extracted matches");

	Ok(records)
}

/// Pattern-name-keyed collection of ordered [`MatchRecord`]s for one input
/// text. A key may map to an empty sequence when its pattern matched
/// nothing.
#[derive(Debug, Clone, Default, Deref, DerefMut, Serialize, Deserialize)]
pub struct MatchMap(
	#[deref]
	#[deref_mut]
	HashMap<String, Vec<MatchRecord>>,
);

impl MatchMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Run every pattern through [`extract_matches`] over `text` and collect
	/// the results keyed by pattern name. Fails on the first pattern that
	/// does not compile rather than producing a partial map.
	pub fn scan(patterns: &[Pattern], text: &str) -> RxtResult<Self> {
		let mut map = Self::new();

		for pattern in patterns {
			let records = extract_matches(pattern, text)?;
			map.insert(pattern.name.clone(), records);
		}

		Ok(map)
	}

	/// The ordered match records for a pattern name. Unknown names yield an
	/// empty slice.
	pub fn records(&self, name: &str) -> &[MatchRecord] {
		self.0.get(name).map_or(&[], Vec::as_slice)
	}
}

impl From<HashMap<String, Vec<MatchRecord>>> for MatchMap {
	fn from(map: HashMap<String, Vec<MatchRecord>>) -> Self {
		Self(map)
	}
}
