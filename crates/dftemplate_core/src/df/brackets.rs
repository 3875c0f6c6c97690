use std::fmt;

use tracing::debug;

use crate::df::{Bracket, Entry, Result, TemplateError};

/// Region type delimited by a bracket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
	/// Conditional region.
	Norm,
	/// Repeat region.
	Repeat,
}

impl BracketKind {
	/// Kind of a bracket half.
	pub fn of(bracket: Bracket) -> Self {
		if bracket.is_repeat() { Self::Repeat } else { Self::Norm }
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Norm => "norm",
			Self::Repeat => "repeat",
		}
	}
}

impl fmt::Display for BracketKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Matched bracket halves, as entry indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
	/// Index of the opening half.
	pub open: usize,
	/// Index of the closing half.
	pub close: usize,
	/// Region type.
	pub kind: BracketKind,
}

/// Pair every bracket in `entries`, keeping one stack per bracket kind.
///
/// Returns pairs in closing order. Fails on a close with no pending open of
/// the same kind, or on any open still pending at the end; the first
/// unclosed bracket in entry order is reported.
pub fn match_brackets(entries: &[Entry]) -> Result<Vec<BracketPair>> {
	let mut norm = Vec::new();
	let mut repeat = Vec::new();
	let mut pairs = Vec::new();

	for (index, bracket) in entries.iter().enumerate().filter_map(|(index, entry)| entry.as_bracket().map(|bracket| (index, bracket))) {
		let kind = BracketKind::of(bracket);
		let stack = match kind {
			BracketKind::Norm => &mut norm,
			BracketKind::Repeat => &mut repeat,
		};

		if bracket.is_open() {
			stack.push(index);
			continue;
		}

		let open = stack.pop().ok_or(TemplateError::UnmatchedClose { index, kind })?;
		pairs.push(BracketPair { open, close: index, kind });
	}

	let leftover = [(norm.first(), BracketKind::Norm), (repeat.first(), BracketKind::Repeat)]
		.into_iter()
		.filter_map(|(index, kind)| index.map(|index| (*index, kind)))
		.min_by_key(|(index, _)| *index);
	if let Some((index, kind)) = leftover {
		return Err(TemplateError::UnclosedBracket { index, kind });
	}

	debug!(entries = entries.len(), pairs = pairs.len(), "brackets balanced");
	Ok(pairs)
}

#[cfg(test)]
mod tests;
