//! `rxt_core` is the core library for the rxt template scripting engine.
//! Given a block of free text and a set of named regular-expression
//! patterns, it extracts every match per pattern and renders a template that
//! can iterate over those matches, branch on numeric conditions computed
//! from captured groups, and substitute captured text into the output. A
//! companion arithmetic/comparison evaluator powers `{if}` conditions, and
//! a separate placeholder scanner supports the simpler `(name)` syntax used
//! in plain message text.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input text + named patterns
//!   → Match extraction (regex, leftmost non-overlapping)
//!   → MatchMap (pattern name → ordered MatchRecords)
//!   → Template interpreter ({if}/{for}/{var} directives)
//!   → Expression evaluator (once per {if} condition)
//!   → Rendered output
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Pattern-set loading from TOML files (`[[patterns]]`
//!   entries with `name` and `regex` keys).
//!
//! ## Key Types
//!
//! - [`Pattern`] — A named regular expression.
//! - [`MatchRecord`] — One match occurrence with its captured groups.
//! - [`MatchMap`] — Pattern-name-keyed ordered match records for one input.
//! - [`PatternHandle`] — Seam accepting either raw pattern sources or
//!   precompiled [`regex::Regex`] handles; caching stays with the caller.
//!
//! ## Leniency
//!
//! The engine favors partial output over failure. Template directives
//! without a matching close tag stop rendering at that point; unresolved
//! bare `{variables}` pass through verbatim; unparseable positions in
//! arithmetic expressions degrade to `0`. Only regex compile failures and
//! pathologically nested expressions surface as typed errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxt_core::MatchMap;
//! use rxt_core::Pattern;
//! use rxt_core::render;
//!
//! let patterns = vec![Pattern::new("prices", r"\$(\d+)")];
//! let matches = MatchMap::scan(&patterns, "cart: $50, $120 and $8").unwrap();
//!
//! let template = "{for prices}\nPrice: ${prices.group(1)}\n{if prices.group(1) > 100} - Premium item{/if}\n{/for}";
//! let output = render(template, &matches);
//!
//! assert_eq!(output, "Price: $50\n\nPrice: $120\n - Premium item\n\nPrice: $8");
//! ```

pub use config::*;
pub use error::*;
pub use eval::*;
pub use matcher::*;
pub use placeholder::*;
pub use template::*;

pub mod config;
mod error;
mod eval;
mod matcher;
mod placeholder;
mod template;

#[cfg(test)]
mod __fixtures;
