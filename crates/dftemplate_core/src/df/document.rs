//! JSON authoring format for templates.
//!
//! ```json
//! {
//!   "name": "counter",
//!   "entries": [
//!     {"block": {"category": "event", "action": "Join"}},
//!     {"block": {"category": "repeat", "action": "Multiple", "args": [{"var": {"name": "i", "scope": "line"}}, 10]}},
//!     {"bracket": {"open": true, "repeat": true}},
//!     {"block": {"category": "player_action", "action": "SendMessage", "args": [{"comp": "%var(i)"}]}},
//!     {"bracket": {"open": false, "repeat": true}}
//!   ]
//! }
//! ```
//!
//! Bare JSON numbers and strings in `args` become number and string values.
//! Documents are built through the same constructors as the Rust API, so the
//! same validation applies. They describe templates to build; they are not
//! the plugin's own template format.

use std::path::Path;

use serde::Deserialize;

use crate::df::{
	BlockTag, Bracket, CodeBlock, CodeBlockCategory, Entry, GameValue, Location, Parameter, Particle, Potion, Result, Sound,
	Template, TemplateError, Value, Variable, Vector,
};

/// Parsed authoring document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateDocument {
	/// Optional item display name.
	#[serde(default)]
	pub name: Option<String>,
	entries: Vec<EntryDoc>,
}

impl TemplateDocument {
	/// Parse a document from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		serde_json::from_str(text).map_err(|err| TemplateError::Document(err.to_string()))
	}

	/// Read and parse a document file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_json(&text)
	}

	/// Number of entries described.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the document describes no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Build the described template.
	pub fn into_template(self) -> Result<Template> {
		let entries = self.entries.into_iter().map(EntryDoc::into_entry).collect::<Result<Vec<_>>>()?;
		let template = Template::new(entries);
		Ok(match self.name {
			Some(name) => template.with_name(name),
			None => template,
		})
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EntryDoc {
	Block(BlockDoc),
	Bracket(BracketDoc),
}

impl EntryDoc {
	fn into_entry(self) -> Result<Entry> {
		match self {
			Self::Block(block) => Ok(Entry::Block(block.into_block()?)),
			Self::Bracket(BracketDoc { open, repeat }) => Ok(Entry::Bracket(Bracket::new(open, repeat))),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BracketDoc {
	open: bool,
	#[serde(default)]
	repeat: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockDoc {
	category: String,
	#[serde(default)]
	action: String,
	#[serde(default)]
	target: Option<String>,
	#[serde(default)]
	not: bool,
	#[serde(default)]
	sub_action: Option<String>,
	#[serde(default)]
	args: Vec<ArgDoc>,
}

impl BlockDoc {
	fn into_block(self) -> Result<CodeBlock> {
		let category: CodeBlockCategory = self.category.parse()?;
		let mut block = if category == CodeBlockCategory::Else && self.action.is_empty() {
			CodeBlock::else_block()
		} else {
			CodeBlock::new(category, &self.action, Vec::<Value>::new())?
		};

		if let Some(target) = self.target {
			block = block.with_target(target.parse()?);
		}
		if self.not {
			block = block.negated();
		}
		if let Some(sub_action) = self.sub_action {
			block = block.with_sub_action(&sub_action);
		}

		for arg in self.args {
			block = arg.apply(block)?;
		}
		Ok(block)
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ArgDoc {
	Number(serde_json::Number),
	String(String),
	Pinned { slot: usize, value: ValueDoc },
	Tagged(ValueDoc),
}

impl ArgDoc {
	fn apply(self, block: CodeBlock) -> Result<CodeBlock> {
		match self {
			Self::Number(number) => block.with_arg(Value::number_expr(number.to_string())),
			Self::String(text) => block.with_arg(text),
			Self::Pinned { slot, value } => block.with_arg_at(slot, value.into_value()?),
			Self::Tagged(value) => block.with_arg(value.into_value()?),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberDoc {
	Literal(serde_json::Number),
	Expr(String),
}

#[derive(Debug, Clone, Deserialize)]
enum ValueDoc {
	#[serde(rename = "txt")]
	String(String),
	#[serde(rename = "comp")]
	Text(String),
	#[serde(rename = "num")]
	Number(NumberDoc),
	#[serde(rename = "var")]
	Variable {
		name: String,
		#[serde(default = "default_scope")]
		scope: String,
	},
	#[serde(rename = "loc")]
	Location {
		x: f64,
		y: f64,
		z: f64,
		#[serde(default)]
		pitch: f64,
		#[serde(default)]
		yaw: f64,
	},
	#[serde(rename = "vec")]
	Vector { x: f64, y: f64, z: f64 },
	#[serde(rename = "snd")]
	Sound {
		sound: String,
		#[serde(default)]
		pitch: Option<f64>,
		#[serde(default)]
		vol: Option<f64>,
		#[serde(default)]
		custom: bool,
	},
	#[serde(rename = "part")]
	Particle {
		particle: String,
		#[serde(default)]
		amount: Option<u32>,
		#[serde(default)]
		horizontal: f64,
		#[serde(default)]
		vertical: f64,
	},
	#[serde(rename = "pot")]
	Potion {
		pot: String,
		#[serde(default)]
		dur: Option<u32>,
		#[serde(default)]
		amp: Option<i32>,
	},
	#[serde(rename = "g_val")]
	GameValue {
		#[serde(rename = "type")]
		kind: String,
		#[serde(default)]
		target: Option<String>,
	},
	#[serde(rename = "pn_el")]
	Parameter {
		name: String,
		#[serde(rename = "type")]
		data_type: String,
		#[serde(default)]
		plural: bool,
		#[serde(default)]
		optional: bool,
		#[serde(default)]
		default: Option<Box<ValueDoc>>,
		#[serde(default)]
		description: Option<String>,
		#[serde(default)]
		note: Option<String>,
	},
	#[serde(rename = "bl_tag")]
	BlockTag { tag: String, option: String },
}

fn default_scope() -> String {
	"unsaved".to_owned()
}

impl ValueDoc {
	fn into_value(self) -> Result<Value> {
		Ok(match self {
			Self::String(text) => Value::string(text),
			Self::Text(text) => Value::text(text),
			Self::Number(NumberDoc::Literal(number)) => Value::number_expr(number.to_string()),
			Self::Number(NumberDoc::Expr(expr)) => Value::number_expr(expr),
			Self::Variable { name, scope } => Variable::parse(&scope, name)?.into(),
			Self::Location { x, y, z, pitch, yaw } => Location::new(x, y, z).with_rotation(pitch, yaw).into(),
			Self::Vector { x, y, z } => Vector::new(x, y, z).into(),
			Self::Sound { sound, pitch, vol, custom } => {
				let mut value = if custom { Sound::custom(sound) } else { Sound::new(sound) };
				if let Some(pitch) = pitch {
					value = value.with_pitch(pitch);
				}
				if let Some(vol) = vol {
					value = value.with_volume(vol);
				}
				value.into()
			}
			Self::Particle {
				particle,
				amount,
				horizontal,
				vertical,
			} => {
				let mut value = Particle::new(particle);
				value.amount = amount.unwrap_or(value.amount);
				value.spread = (horizontal, vertical);
				value.into()
			}
			Self::Potion { pot, dur, amp } => {
				let mut value = Potion::new(pot);
				value.duration = dur;
				if let Some(amp) = amp {
					value = value.with_amplifier(amp);
				}
				value.into()
			}
			Self::GameValue { kind, target } => {
				let value = GameValue::new(kind);
				match target {
					Some(target) => value.with_target(target.parse()?).into(),
					None => value.into(),
				}
			}
			Self::Parameter {
				name,
				data_type,
				plural,
				optional,
				default,
				description,
				note,
			} => {
				let mut param = Parameter::new(name, data_type.parse()?);
				if plural {
					param = param.plural();
				}
				if optional {
					let default = default.map(|value| value.into_value()).transpose()?;
					param = param.optional(default);
				}
				if let Some(description) = description {
					param = param.with_description(description);
				}
				if let Some(note) = note {
					param = param.with_note(note);
				}
				param.into()
			}
			Self::BlockTag { tag, option } => BlockTag::new(tag, option).into(),
		})
	}
}
