//! Intermediate records mirroring the plugin's template JSON schema.
//!
//! ```text
//! {"blocks": [
//!   {"id":"block","block":"repeat","action":"Multiple","args":{"items":[{"item":{"id":"num","data":{"name":"10"}},"slot":1}]}},
//!   {"id":"bracket","direct":"open","type":"repeat"}
//! ]}
//! ```

use serde::{Deserialize, Serialize};

/// Top-level template payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateRecord {
	/// Entries in execution order.
	pub blocks: Vec<BlockRecord>,
}

/// One template entry, discriminated by its `id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "lowercase")]
pub enum BlockRecord {
	/// Code block.
	Block(CodeBlockRecord),
	/// Bracket half.
	Bracket(BracketRecord),
}

/// Code block entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockRecord {
	/// Category wire id.
	pub block: String,
	/// Action name, absent for `else` and function-like blocks.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	/// Function/process name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<String>,
	/// Target selection.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target: Option<String>,
	/// `NOT` marker on conditionals.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attribute: Option<String>,
	/// Nested condition action for `while`/select-by-condition.
	#[serde(default, rename = "subAction", skip_serializing_if = "Option::is_none")]
	pub sub_action: Option<String>,
	/// Chest contents.
	pub args: ArgsRecord,
}

/// Chest contents of a code block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArgsRecord {
	/// Occupied slots.
	pub items: Vec<SlotRecord>,
}

/// One occupied chest slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRecord {
	/// Item in the slot.
	pub item: ItemRecord,
	/// Slot index, `0..=26`.
	pub slot: u8,
}

/// Typed item payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
	/// Item kind id (`txt`, `num`, `var`, ...).
	pub id: String,
	/// Kind-specific data object.
	pub data: serde_json::Value,
}

/// Bracket entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRecord {
	/// Opening or closing half.
	pub direct: BracketDirection,
	/// Repeat or conditional region.
	#[serde(rename = "type")]
	pub kind: BracketType,
}

/// Bracket half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketDirection {
	/// Opening half.
	Open,
	/// Closing half.
	Close,
}

/// Bracket region type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketType {
	/// Conditional region.
	Norm,
	/// Repeat region.
	Repeat,
}
