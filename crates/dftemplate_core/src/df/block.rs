use crate::df::record::{BracketDirection, BracketType};
use crate::df::{
	ArgsRecord, BlockRecord, BracketRecord, CodeBlockCategory, CodeBlockRecord, Result, Selection, SlotRecord, TemplateError, Value,
};

/// Highest chest slot index.
pub const MAX_SLOT: u8 = 26;

/// Block tag options default to `dynamic` when their block has no action.
const DYNAMIC_ACTION: &str = "dynamic";

/// Build a `Vec<Value>` from heterogeneous literals.
///
/// ```
/// use dftemplate::df::Variable;
///
/// let args = dftemplate::values![Variable::line("index"), 10, "text"];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! values {
	($($value:expr),* $(,)?) => {
		::std::vec![$($crate::df::Value::from($value)),*]
	};
}

/// One chest argument, placed by position unless a slot is pinned.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
	value: Value,
	slot: Option<u8>,
}

impl Argument {
	/// Positional argument.
	pub fn new(value: impl Into<Value>) -> Self {
		Self {
			value: value.into(),
			slot: None,
		}
	}

	/// Argument pinned to `slot`.
	pub fn at(slot: usize, value: impl Into<Value>) -> Result<Self> {
		let slot = checked_slot(slot)?;
		Ok(Self {
			value: value.into(),
			slot: Some(slot),
		})
	}

	/// Argument value.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Pinned slot, if any.
	pub fn slot(&self) -> Option<u8> {
		self.slot
	}
}

fn checked_slot(slot: usize) -> Result<u8> {
	u8::try_from(slot)
		.ok()
		.filter(|slot| *slot <= MAX_SLOT)
		.ok_or(TemplateError::SlotOutOfRange { slot, max: MAX_SLOT })
}

/// Action, event, or control step of a template.
///
/// The action name is not checked against the category; the plugin rejects
/// unknown actions on import.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
	category: CodeBlockCategory,
	action: Box<str>,
	data: Option<Box<str>>,
	target: Option<Selection>,
	negated: bool,
	sub_action: Option<Box<str>>,
	args: Vec<Argument>,
}

impl CodeBlock {
	/// Create a block from a category, action name, and positional arguments.
	///
	/// For function-like categories (`func`, `process`, `call_func`,
	/// `start_process`) the name is stored as the function/process name.
	pub fn new<V>(category: CodeBlockCategory, action: &str, args: impl IntoIterator<Item = V>) -> Result<Self>
	where
		V: Into<Value>,
	{
		if category.takes_data_name() {
			return Self::named(category, action, args);
		}
		if action.is_empty() {
			return Err(TemplateError::EmptyAction {
				category: category.as_str(),
			});
		}

		let mut block = Self::bare(category, action);
		block.push_positional(args)?;
		Ok(block)
	}

	/// `else` block; the only block kind without an action.
	pub fn else_block() -> Self {
		Self::bare(CodeBlockCategory::Else, "")
	}

	/// Player event header.
	pub fn player_event(action: &str) -> Result<Self> {
		Self::new(CodeBlockCategory::PlayerEvent, action, Vec::<Value>::new())
	}

	/// Entity event header.
	pub fn entity_event(action: &str) -> Result<Self> {
		Self::new(CodeBlockCategory::EntityEvent, action, Vec::<Value>::new())
	}

	/// Player action.
	pub fn player_action<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::PlayerAction, action, args)
	}

	/// Entity action.
	pub fn entity_action<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::EntityAction, action, args)
	}

	/// Game action.
	pub fn game_action<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::GameAction, action, args)
	}

	/// Set variable.
	pub fn set_var<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::SetVariable, action, args)
	}

	/// If player conditional.
	pub fn if_player<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::IfPlayer, action, args)
	}

	/// If entity conditional.
	pub fn if_entity<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::IfEntity, action, args)
	}

	/// If game conditional.
	pub fn if_game<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::IfGame, action, args)
	}

	/// If variable conditional.
	pub fn if_var<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::IfVariable, action, args)
	}

	/// Repeat loop.
	pub fn repeat<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::Repeat, action, args)
	}

	/// Control block.
	pub fn control<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::Control, action, args)
	}

	/// Select object.
	pub fn select_object<V: Into<Value>>(action: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::new(CodeBlockCategory::SelectObject, action, args)
	}

	/// Function definition header.
	pub fn function<V: Into<Value>>(name: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::named(CodeBlockCategory::Function, name, args)
	}

	/// Process definition header.
	pub fn process<V: Into<Value>>(name: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::named(CodeBlockCategory::Process, name, args)
	}

	/// Function call.
	pub fn call_function<V: Into<Value>>(name: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::named(CodeBlockCategory::CallFunction, name, args)
	}

	/// Process start.
	pub fn start_process<V: Into<Value>>(name: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		Self::named(CodeBlockCategory::StartProcess, name, args)
	}

	fn named<V: Into<Value>>(category: CodeBlockCategory, name: &str, args: impl IntoIterator<Item = V>) -> Result<Self> {
		if name.is_empty() {
			return Err(TemplateError::EmptyDataName {
				category: category.as_str(),
			});
		}

		let mut block = Self::bare(category, "");
		block.data = Some(name.into());
		block.push_positional(args)?;
		Ok(block)
	}

	fn bare(category: CodeBlockCategory, action: &str) -> Self {
		Self {
			category,
			action: action.into(),
			data: None,
			target: None,
			negated: false,
			sub_action: None,
			args: Vec::new(),
		}
	}

	fn push_positional<V: Into<Value>>(&mut self, args: impl IntoIterator<Item = V>) -> Result<()> {
		for value in args {
			self.push_arg(Argument::new(value))?;
		}
		Ok(())
	}

	fn push_arg(&mut self, arg: Argument) -> Result<()> {
		if arg.slot.is_none() {
			checked_slot(self.args.len())?;
		}
		self.args.push(arg);
		Ok(())
	}

	/// Same block targeting `target`.
	pub fn with_target(self, target: Selection) -> Self {
		Self {
			target: Some(target),
			..self
		}
	}

	/// Same block with the `NOT` attribute, inverting a conditional.
	pub fn negated(self) -> Self {
		Self { negated: true, ..self }
	}

	/// Same block with a sub-action, used by `while` and select-by-condition.
	pub fn with_sub_action(self, sub_action: &str) -> Self {
		Self {
			sub_action: Some(sub_action.into()),
			..self
		}
	}

	/// Same block with one more positional argument.
	pub fn with_arg(mut self, value: impl Into<Value>) -> Result<Self> {
		self.push_arg(Argument::new(value))?;
		Ok(self)
	}

	/// Same block with an argument pinned to `slot`.
	pub fn with_arg_at(mut self, slot: usize, value: impl Into<Value>) -> Result<Self> {
		self.push_arg(Argument::at(slot, value)?)?;
		Ok(self)
	}

	/// Block category.
	pub fn category(&self) -> CodeBlockCategory {
		self.category
	}

	/// Action name; empty for `else` and function-like blocks.
	pub fn action(&self) -> &str {
		&self.action
	}

	/// Function/process name for function-like blocks.
	pub fn data_name(&self) -> Option<&str> {
		self.data.as_deref()
	}

	/// Explicit target selection.
	pub fn target(&self) -> Option<Selection> {
		self.target
	}

	/// Whether the `NOT` attribute is set.
	pub fn is_negated(&self) -> bool {
		self.negated
	}

	/// Sub-action name.
	pub fn sub_action(&self) -> Option<&str> {
		self.sub_action.as_deref()
	}

	/// Arguments in insertion order.
	pub fn args(&self) -> &[Argument] {
		&self.args
	}

	/// Render the block record.
	///
	/// Arguments take their list position as slot; block tags fill the chest
	/// from slot 26 downwards. Pinned slots win over both. Two arguments
	/// landing in one slot fail with [`TemplateError::SlotTaken`].
	pub fn to_record(&self) -> Result<CodeBlockRecord> {
		let mut items = Vec::with_capacity(self.args.len());
		let mut occupied = 0_u32;
		let mut tags = 0_u8;

		for (index, arg) in self.args.iter().enumerate() {
			let mut item = arg.value.to_record()?;
			let mut slot = arg.slot;

			if let Value::BlockTag(_) = arg.value {
				slot = slot.or(Some(MAX_SLOT.saturating_sub(tags)));
				tags = tags.saturating_add(1);
				if let serde_json::Value::Object(data) = &mut item.data {
					let action: &str = if self.action.is_empty() { DYNAMIC_ACTION } else { &self.action };
					data.insert("action".to_owned(), action.into());
					data.insert("block".to_owned(), self.category.as_str().into());
				}
			}

			let slot = match slot {
				Some(slot) => slot,
				None => checked_slot(index)?,
			};
			if occupied & (1 << slot) != 0 {
				return Err(TemplateError::SlotTaken { slot });
			}
			occupied |= 1 << slot;
			items.push(SlotRecord { item, slot });
		}

		Ok(CodeBlockRecord {
			block: self.category.as_str().to_owned(),
			action: (!self.action.is_empty()).then(|| self.action.to_string()),
			data: self.data.as_deref().map(str::to_owned),
			target: self.target.map(|target| target.as_str().to_owned()),
			attribute: self.negated.then(|| "NOT".to_owned()),
			sub_action: self.sub_action.as_deref().map(str::to_owned),
			args: ArgsRecord { items },
		})
	}
}

/// Opening or closing half of a repeat or conditional region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bracket {
	open: bool,
	repeat: bool,
}

impl Bracket {
	/// Create a bracket half.
	pub fn new(open: bool, repeat: bool) -> Self {
		Self { open, repeat }
	}

	/// Opening repeat bracket.
	pub fn open_repeat() -> Self {
		Self::new(true, true)
	}

	/// Closing repeat bracket.
	pub fn close_repeat() -> Self {
		Self::new(false, true)
	}

	/// Opening conditional bracket.
	pub fn open_norm() -> Self {
		Self::new(true, false)
	}

	/// Closing conditional bracket.
	pub fn close_norm() -> Self {
		Self::new(false, false)
	}

	/// Whether this is the opening half.
	pub fn is_open(self) -> bool {
		self.open
	}

	/// Whether this delimits a repeat region.
	pub fn is_repeat(self) -> bool {
		self.repeat
	}

	/// Render the bracket record.
	pub fn to_record(self) -> BracketRecord {
		BracketRecord {
			direct: if self.open { BracketDirection::Open } else { BracketDirection::Close },
			kind: if self.repeat { BracketType::Repeat } else { BracketType::Norm },
		}
	}
}

/// Template entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
	/// Code block.
	Block(CodeBlock),
	/// Bracket half.
	Bracket(Bracket),
}

impl Entry {
	/// Render the entry record.
	pub fn to_record(&self) -> Result<BlockRecord> {
		Ok(match self {
			Self::Block(block) => BlockRecord::Block(block.to_record()?),
			Self::Bracket(bracket) => BlockRecord::Bracket(bracket.to_record()),
		})
	}

	/// Bracket half, if this entry is one.
	pub fn as_bracket(&self) -> Option<Bracket> {
		match self {
			Self::Bracket(bracket) => Some(*bracket),
			Self::Block(_) => None,
		}
	}
}

impl From<CodeBlock> for Entry {
	fn from(value: CodeBlock) -> Self {
		Self::Block(value)
	}
}

impl From<Bracket> for Entry {
	fn from(value: Bracket) -> Self {
		Self::Bracket(value)
	}
}

#[cfg(test)]
mod tests;
