use std::fmt;
use std::str::FromStr;

use crate::df::TemplateError;

/// Kind of code block, matching the plugin's supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeBlockCategory {
	/// Player event header.
	PlayerEvent,
	/// Entity event header.
	EntityEvent,
	/// Function definition header.
	Function,
	/// Process definition header.
	Process,
	/// Action performed on players.
	PlayerAction,
	/// Action performed on entities.
	EntityAction,
	/// Action performed on the game.
	GameAction,
	/// Variable assignment.
	SetVariable,
	/// Conditional on players.
	IfPlayer,
	/// Conditional on entities.
	IfEntity,
	/// Conditional on game state.
	IfGame,
	/// Conditional on variables.
	IfVariable,
	/// Else branch following a conditional bracket.
	Else,
	/// Loop.
	Repeat,
	/// Flow control (wait, return, ...).
	Control,
	/// Target selection.
	SelectObject,
	/// Function call.
	CallFunction,
	/// Process start.
	StartProcess,
}

impl CodeBlockCategory {
	/// All categories in declaration order.
	pub const ALL: [Self; 18] = [
		Self::PlayerEvent,
		Self::EntityEvent,
		Self::Function,
		Self::Process,
		Self::PlayerAction,
		Self::EntityAction,
		Self::GameAction,
		Self::SetVariable,
		Self::IfPlayer,
		Self::IfEntity,
		Self::IfGame,
		Self::IfVariable,
		Self::Else,
		Self::Repeat,
		Self::Control,
		Self::SelectObject,
		Self::CallFunction,
		Self::StartProcess,
	];

	/// Wire identifier used in block records.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::PlayerEvent => "event",
			Self::EntityEvent => "entity_event",
			Self::Function => "func",
			Self::Process => "process",
			Self::PlayerAction => "player_action",
			Self::EntityAction => "entity_action",
			Self::GameAction => "game_action",
			Self::SetVariable => "set_var",
			Self::IfPlayer => "if_player",
			Self::IfEntity => "if_entity",
			Self::IfGame => "if_game",
			Self::IfVariable => "if_var",
			Self::Else => "else",
			Self::Repeat => "repeat",
			Self::Control => "control",
			Self::SelectObject => "select_obj",
			Self::CallFunction => "call_func",
			Self::StartProcess => "start_process",
		}
	}

	/// Blocks that carry a function/process name instead of an action.
	pub fn takes_data_name(self) -> bool {
		matches!(self, Self::Function | Self::Process | Self::CallFunction | Self::StartProcess)
	}

	/// Conditional blocks that accept the `NOT` attribute.
	pub fn is_conditional(self) -> bool {
		matches!(self, Self::IfPlayer | Self::IfEntity | Self::IfGame | Self::IfVariable)
	}
}

impl fmt::Display for CodeBlockCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for CodeBlockCategory {
	type Err = TemplateError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|category| category.as_str() == value)
			.ok_or_else(|| TemplateError::InvalidCategory { value: value.to_owned() })
	}
}

/// Target a block or game value applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
	/// Current selection.
	Selection,
	/// Default target of the event.
	Default,
	/// Killer in a kill event.
	Killer,
	/// Damager in a damage event.
	Damager,
	/// Victim in a damage/kill event.
	Victim,
	/// Shooter of a projectile.
	Shooter,
	/// Projectile involved in the event.
	Projectile,
	/// Most recently spawned entity.
	LastEntity,
	/// Every player on the plot.
	AllPlayers,
	/// Every entity on the plot.
	AllEntities,
	/// Every mob on the plot.
	AllMobs,
}

impl Selection {
	/// All selections in declaration order.
	pub const ALL: [Self; 11] = [
		Self::Selection,
		Self::Default,
		Self::Killer,
		Self::Damager,
		Self::Victim,
		Self::Shooter,
		Self::Projectile,
		Self::LastEntity,
		Self::AllPlayers,
		Self::AllEntities,
		Self::AllMobs,
	];

	/// Wire identifier.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Selection => "Selection",
			Self::Default => "Default",
			Self::Killer => "Killer",
			Self::Damager => "Damager",
			Self::Victim => "Victim",
			Self::Shooter => "Shooter",
			Self::Projectile => "Projectile",
			Self::LastEntity => "LastEntity",
			Self::AllPlayers => "AllPlayers",
			Self::AllEntities => "AllEntities",
			Self::AllMobs => "AllMobs",
		}
	}
}

impl FromStr for Selection {
	type Err = TemplateError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|selection| selection.as_str() == value)
			.ok_or_else(|| TemplateError::InvalidSelection { value: value.to_owned() })
	}
}

/// Value type accepted by a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
	/// Plain string.
	String,
	/// Styled text.
	Text,
	/// Number.
	Number,
	/// Location.
	Location,
	/// Vector.
	Vector,
	/// Sound.
	Sound,
	/// Particle.
	Particle,
	/// Potion effect.
	Potion,
	/// Item stack.
	Item,
	/// Any value.
	Any,
	/// Variable reference.
	Variable,
	/// List.
	List,
	/// Dictionary.
	Dictionary,
}

impl DataType {
	/// All data types in declaration order.
	pub const ALL: [Self; 13] = [
		Self::String,
		Self::Text,
		Self::Number,
		Self::Location,
		Self::Vector,
		Self::Sound,
		Self::Particle,
		Self::Potion,
		Self::Item,
		Self::Any,
		Self::Variable,
		Self::List,
		Self::Dictionary,
	];

	/// Wire identifier.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::String => "txt",
			Self::Text => "comp",
			Self::Number => "num",
			Self::Location => "loc",
			Self::Vector => "vec",
			Self::Sound => "snd",
			Self::Particle => "part",
			Self::Potion => "pot",
			Self::Item => "item",
			Self::Any => "any",
			Self::Variable => "var",
			Self::List => "list",
			Self::Dictionary => "dict",
		}
	}
}

impl FromStr for DataType {
	type Err = TemplateError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|data_type| data_type.as_str() == value)
			.ok_or_else(|| TemplateError::InvalidDataType { value: value.to_owned() })
	}
}
