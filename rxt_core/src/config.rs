use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::Pattern;
use crate::RxtError;
use crate::RxtResult;

/// A set of named patterns loaded from a TOML file:
///
/// ```toml
/// [[patterns]]
/// name = "prices"
/// regex = '\$(\d+)'
///
/// [[patterns]]
/// name = "emails"
/// regex = '[\w.]+@[\w.]+'
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
	#[serde(default)]
	pub patterns: Vec<Pattern>,
}

impl PatternSet {
	/// Parse a pattern set from TOML text.
	pub fn from_toml_str(content: &str) -> RxtResult<Self> {
		toml::from_str(content).map_err(|error| RxtError::ConfigParse(error.to_string()))
	}

	/// Load a pattern set from a TOML file on disk.
	pub fn load(path: impl AsRef<Path>) -> RxtResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Validate every entry: names must be non-empty and each regex source
	/// must compile. Reports the first problem found.
	pub fn validate(&self) -> RxtResult<()> {
		for pattern in &self.patterns {
			if pattern.name.is_empty() {
				return Err(RxtError::EmptyPatternName);
			}

			pattern.compile()?;
		}

		Ok(())
	}
}
