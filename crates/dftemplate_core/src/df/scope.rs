use std::fmt;
use std::str::FromStr;

use crate::df::TemplateError;

/// Storage scope of a DiamondFire variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableScope {
	/// Game-wide, cleared when the plot unloads (`unsaved`).
	#[default]
	Game,
	/// Game-wide and persisted (`saved`).
	Saved,
	/// Scoped to the running thread (`local`).
	Local,
	/// Scoped to the current line of code (`line`).
	Line,
}

impl VariableScope {
	/// All scopes in declaration order.
	pub const ALL: [Self; 4] = [Self::Game, Self::Saved, Self::Local, Self::Line];

	/// Wire identifier used in item data.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Game => "unsaved",
			Self::Saved => "saved",
			Self::Local => "local",
			Self::Line => "line",
		}
	}
}

impl fmt::Display for VariableScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for VariableScope {
	type Err = TemplateError;

	/// Accept the wire id or the lowercase variant name (`game`).
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"unsaved" | "game" => Ok(Self::Game),
			"saved" => Ok(Self::Saved),
			"local" => Ok(Self::Local),
			"line" => Ok(Self::Line),
			_ => Err(TemplateError::InvalidScope { value: value.to_owned() }),
		}
	}
}

#[cfg(test)]
mod tests;
