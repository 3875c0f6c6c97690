use serde_json::{Map, json};

use crate::df::{DataType, ItemRecord, Result, Selection, TemplateError, VariableScope};

/// Argument value placed into a code block's chest.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Plain string (`txt`).
	String(Box<str>),
	/// Styled MiniMessage text (`comp`).
	Text(Box<str>),
	/// Number in textual form, so `%math(...)` expressions are allowed (`num`).
	Number(Box<str>),
	/// World location (`loc`).
	Location(Location),
	/// Direction vector (`vec`).
	Vector(Vector),
	/// Sound effect (`snd`).
	Sound(Sound),
	/// Particle effect (`part`).
	Particle(Particle),
	/// Potion effect (`pot`).
	Potion(Potion),
	/// Game value lookup (`g_val`).
	GameValue(GameValue),
	/// Function parameter pattern element (`pn_el`).
	Parameter(Parameter),
	/// Block tag option (`bl_tag`).
	BlockTag(BlockTag),
	/// Variable reference (`var`).
	Variable(Variable),
}

impl Value {
	/// Plain string value.
	pub fn string(value: impl Into<Box<str>>) -> Self {
		Self::String(value.into())
	}

	/// Styled text value.
	pub fn text(value: impl Into<Box<str>>) -> Self {
		Self::Text(value.into())
	}

	/// Number given as raw text, e.g. `%math(%var(a)+1)`.
	pub fn number_expr(value: impl Into<Box<str>>) -> Self {
		Self::Number(value.into())
	}

	/// Wire item id of this value.
	pub fn item_id(&self) -> &'static str {
		match self {
			Self::String(_) => "txt",
			Self::Text(_) => "comp",
			Self::Number(_) => "num",
			Self::Location(_) => "loc",
			Self::Vector(_) => "vec",
			Self::Sound(_) => "snd",
			Self::Particle(_) => "part",
			Self::Potion(_) => "pot",
			Self::GameValue(_) => "g_val",
			Self::Parameter(_) => "pn_el",
			Self::BlockTag(_) => "bl_tag",
			Self::Variable(_) => "var",
		}
	}

	/// Render the `{"id", "data"}` item record for this value.
	///
	/// Infinite or NaN floats, including number literals spelled `inf` or
	/// `NaN`, fail with [`TemplateError::NonFiniteNumber`].
	pub fn to_record(&self) -> Result<ItemRecord> {
		self.ensure_finite()?;
		let data = match self {
			Self::String(name) | Self::Text(name) | Self::Number(name) => json!({ "name": name }),
			Self::Location(loc) => json!({
				"isBlock": false,
				"loc": {
					"x": loc.x,
					"y": loc.y,
					"z": loc.z,
					"pitch": loc.pitch,
					"yaw": loc.yaw,
				},
			}),
			Self::Vector(vec) => json!({ "x": vec.x, "y": vec.y, "z": vec.z }),
			Self::Sound(sound) => {
				let key = if sound.custom { "key" } else { "sound" };
				let mut data = Map::new();
				data.insert("pitch".to_owned(), json!(sound.pitch));
				data.insert("vol".to_owned(), json!(sound.volume));
				data.insert(key.to_owned(), json!(sound.name));
				serde_json::Value::Object(data)
			}
			Self::Particle(particle) => json!({
				"particle": particle.particle,
				"cluster": {
					"amount": particle.amount,
					"horizontal": particle.spread.0,
					"vertical": particle.spread.1,
				},
				"data": particle.data.to_json(),
			}),
			Self::Potion(potion) => json!({
				"pot": potion.effect,
				"dur": potion.duration.unwrap_or(Potion::INFINITE_TICKS),
				"amp": potion.amplifier - 1,
			}),
			Self::GameValue(value) => json!({ "type": value.kind, "target": value.target.as_str() }),
			Self::Parameter(param) => param.to_json()?,
			Self::BlockTag(tag) => json!({ "option": tag.option, "tag": tag.tag }),
			Self::Variable(var) => json!({ "name": var.name(), "scope": var.scope().as_str() }),
		};

		Ok(ItemRecord {
			id: self.item_id().to_owned(),
			data,
		})
	}

	fn ensure_finite(&self) -> Result<()> {
		match self {
			Self::Number(text) if text.trim().parse::<f64>().is_ok_and(|number| !number.is_finite()) => {
				Err(TemplateError::NonFiniteNumber { field: "num" })
			}
			Self::Location(loc) => finite("loc", &[loc.x, loc.y, loc.z, loc.pitch, loc.yaw]),
			Self::Vector(vec) => finite("vec", &[vec.x, vec.y, vec.z]),
			Self::Sound(sound) => finite("snd", &[sound.pitch, sound.volume]),
			Self::Particle(particle) => {
				let data = &particle.data;
				finite(
					"part",
					&[
						particle.spread.0,
						particle.spread.1,
						data.color_variation,
						data.size,
						data.size_variation,
						data.motion.0,
						data.motion.1,
						data.motion.2,
						data.motion_variation,
						data.roll,
					],
				)
			}
			_ => Ok(()),
		}
	}
}

fn finite(field: &'static str, values: &[f64]) -> Result<()> {
	if values.iter().all(|value| value.is_finite()) {
		Ok(())
	} else {
		Err(TemplateError::NonFiniteNumber { field })
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::string(value)
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::string(value)
	}
}

macro_rules! number_from {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Number(value.to_string().into())
				}
			}
		)*
	};
}

number_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<Variable> for Value {
	fn from(value: Variable) -> Self {
		Self::Variable(value)
	}
}

impl From<Location> for Value {
	fn from(value: Location) -> Self {
		Self::Location(value)
	}
}

impl From<Vector> for Value {
	fn from(value: Vector) -> Self {
		Self::Vector(value)
	}
}

impl From<Sound> for Value {
	fn from(value: Sound) -> Self {
		Self::Sound(value)
	}
}

impl From<Particle> for Value {
	fn from(value: Particle) -> Self {
		Self::Particle(value)
	}
}

impl From<Potion> for Value {
	fn from(value: Potion) -> Self {
		Self::Potion(value)
	}
}

impl From<GameValue> for Value {
	fn from(value: GameValue) -> Self {
		Self::GameValue(value)
	}
}

impl From<Parameter> for Value {
	fn from(value: Parameter) -> Self {
		Self::Parameter(value)
	}
}

impl From<BlockTag> for Value {
	fn from(value: BlockTag) -> Self {
		Self::BlockTag(value)
	}
}

/// Named variable reference; identity is the `(name, scope)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
	name: Box<str>,
	scope: VariableScope,
}

impl Variable {
	/// Create a variable reference.
	pub fn new(name: impl Into<Box<str>>, scope: VariableScope) -> Self {
		Self { name: name.into(), scope }
	}

	/// Create a variable from a textual scope id such as `line`.
	pub fn parse(scope: &str, name: impl Into<Box<str>>) -> Result<Self> {
		Ok(Self::new(name, scope.parse()?))
	}

	/// Shortcut for a line-scoped variable.
	pub fn line(name: impl Into<Box<str>>) -> Self {
		Self::new(name, VariableScope::Line)
	}

	/// Shortcut for a local variable.
	pub fn local(name: impl Into<Box<str>>) -> Self {
		Self::new(name, VariableScope::Local)
	}

	/// Shortcut for a game (unsaved) variable.
	pub fn game(name: impl Into<Box<str>>) -> Self {
		Self::new(name, VariableScope::Game)
	}

	/// Shortcut for a saved variable.
	pub fn saved(name: impl Into<Box<str>>) -> Self {
		Self::new(name, VariableScope::Saved)
	}

	/// Variable name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Variable scope.
	pub fn scope(&self) -> VariableScope {
		self.scope
	}
}

/// World position with rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
	/// X coordinate.
	pub x: f64,
	/// Y coordinate.
	pub y: f64,
	/// Z coordinate.
	pub z: f64,
	/// Pitch in degrees.
	pub pitch: f64,
	/// Yaw in degrees.
	pub yaw: f64,
}

impl Location {
	/// Location with zero rotation.
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z, pitch: 0.0, yaw: 0.0 }
	}

	/// Same location rotated.
	pub fn with_rotation(self, pitch: f64, yaw: f64) -> Self {
		Self { pitch, yaw, ..self }
	}
}

/// Three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
	/// X component.
	pub x: f64,
	/// Y component.
	pub y: f64,
	/// Z component.
	pub z: f64,
}

impl Vector {
	/// Create a vector.
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}
}

/// Sound effect, either vanilla or a resource-pack key.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
	/// Sound name, or resource key when `custom`.
	pub name: Box<str>,
	/// Playback pitch.
	pub pitch: f64,
	/// Playback volume.
	pub volume: f64,
	/// Whether `name` is a resource-pack key.
	pub custom: bool,
}

impl Sound {
	/// Vanilla sound with default pitch 1 and volume 2.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			pitch: 1.0,
			volume: 2.0,
			custom: false,
		}
	}

	/// Resource-pack sound referenced by key.
	pub fn custom(key: impl Into<Box<str>>) -> Self {
		Self { custom: true, ..Self::new(key) }
	}

	/// Same sound at a different pitch.
	pub fn with_pitch(self, pitch: f64) -> Self {
		Self { pitch, ..self }
	}

	/// Same sound at a different volume.
	pub fn with_volume(self, volume: f64) -> Self {
		Self { volume, ..self }
	}
}

/// Extra particle parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleData {
	/// RGB color.
	pub color: u32,
	/// Color variation percentage.
	pub color_variation: f64,
	/// RGB fade color.
	pub fade_color: u32,
	/// Particle size.
	pub size: f64,
	/// Size variation percentage.
	pub size_variation: f64,
	/// Motion vector.
	pub motion: (f64, f64, f64),
	/// Motion variation percentage.
	pub motion_variation: f64,
	/// Material for block/item particles.
	pub material: Box<str>,
	/// Roll angle.
	pub roll: f64,
}

impl Default for ParticleData {
	fn default() -> Self {
		Self {
			color: 0xFF0000,
			color_variation: 0.0,
			fade_color: 0x000000,
			size: 1.0,
			size_variation: 0.0,
			motion: (0.0, 0.0, 0.0),
			motion_variation: 0.0,
			material: "air".into(),
			roll: 0.0,
		}
	}
}

impl ParticleData {
	fn to_json(&self) -> serde_json::Value {
		json!({
			"rgb": self.color,
			"colorVariation": self.color_variation,
			"rgb_fade": self.fade_color,
			"size": self.size,
			"sizeVariation": self.size_variation,
			"x": self.motion.0,
			"y": self.motion.1,
			"z": self.motion.2,
			"motionVariation": self.motion_variation,
			"material": self.material.to_uppercase(),
			"roll": self.roll,
		})
	}
}

/// Particle effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
	/// Particle name.
	pub particle: Box<str>,
	/// Particles per spawn.
	pub amount: u32,
	/// Horizontal and vertical spread.
	pub spread: (f64, f64),
	/// Extra parameters.
	pub data: ParticleData,
}

impl Particle {
	/// Single particle without spread.
	pub fn new(particle: impl Into<Box<str>>) -> Self {
		Self {
			particle: particle.into(),
			amount: 1,
			spread: (0.0, 0.0),
			data: ParticleData::default(),
		}
	}
}

/// Potion effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Potion {
	/// Effect name.
	pub effect: Box<str>,
	/// Duration in ticks, `None` for infinite.
	pub duration: Option<u32>,
	/// One-based amplifier as shown in game.
	pub amplifier: i32,
}

impl Potion {
	/// Tick count the plugin treats as infinite.
	pub const INFINITE_TICKS: u32 = 1_000_000;

	/// Infinite level-1 effect.
	pub fn new(effect: impl Into<Box<str>>) -> Self {
		Self {
			effect: effect.into(),
			duration: None,
			amplifier: 1,
		}
	}

	/// Same effect with a finite duration.
	pub fn with_duration(self, ticks: u32) -> Self {
		Self {
			duration: Some(ticks),
			..self
		}
	}

	/// Same effect at another amplifier.
	pub fn with_amplifier(self, amplifier: i32) -> Self {
		Self { amplifier, ..self }
	}
}

/// Game value lookup such as `Location` or `Current Health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameValue {
	/// Game value name.
	pub kind: Box<str>,
	/// Target the value is read from.
	pub target: Selection,
}

impl GameValue {
	/// Game value read from the default target.
	pub fn new(kind: impl Into<Box<str>>) -> Self {
		Self {
			kind: kind.into(),
			target: Selection::Default,
		}
	}

	/// Same value read from another target.
	pub fn with_target(self, target: Selection) -> Self {
		Self { target, ..self }
	}
}

/// Function parameter description.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
	/// Parameter name.
	pub name: Box<str>,
	/// Accepted type.
	pub data_type: DataType,
	/// Whether several values may be passed.
	pub plural: bool,
	/// Whether the argument may be omitted.
	pub optional: bool,
	/// Value used when an optional argument is omitted.
	pub default: Option<Box<Value>>,
	/// Description shown in game.
	pub description: Option<Box<str>>,
	/// Additional note shown in game.
	pub note: Option<Box<str>>,
}

impl Parameter {
	/// Required single-valued parameter.
	pub fn new(name: impl Into<Box<str>>, data_type: DataType) -> Self {
		Self {
			name: name.into(),
			data_type,
			plural: false,
			optional: false,
			default: None,
			description: None,
			note: None,
		}
	}

	/// Accept several values.
	pub fn plural(self) -> Self {
		Self { plural: true, ..self }
	}

	/// Make optional, with an optional default value.
	pub fn optional(self, default: Option<Value>) -> Self {
		Self {
			optional: true,
			default: default.map(Box::new),
			..self
		}
	}

	/// Attach a description.
	pub fn with_description(self, description: impl Into<Box<str>>) -> Self {
		Self {
			description: Some(description.into()),
			..self
		}
	}

	/// Attach a note.
	pub fn with_note(self, note: impl Into<Box<str>>) -> Self {
		Self {
			note: Some(note.into()),
			..self
		}
	}

	fn to_json(&self) -> Result<serde_json::Value> {
		let mut data = Map::new();
		data.insert("name".to_owned(), json!(self.name));
		data.insert("type".to_owned(), json!(self.data_type.as_str()));
		data.insert("plural".to_owned(), json!(self.plural));
		data.insert("optional".to_owned(), json!(self.optional));
		if let (true, Some(default)) = (self.optional, &self.default) {
			data.insert("default_value".to_owned(), serde_json::to_value(default.to_record()?)?);
		}
		if let Some(description) = &self.description {
			data.insert("description".to_owned(), json!(description));
		}
		if let Some(note) = &self.note {
			data.insert("note".to_owned(), json!(note));
		}
		Ok(serde_json::Value::Object(data))
	}
}

/// Block tag option, always placed in the chest's last slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTag {
	/// Tag name.
	pub tag: Box<str>,
	/// Selected option.
	pub option: Box<str>,
}

impl BlockTag {
	/// Create a tag selection.
	pub fn new(tag: impl Into<Box<str>>, option: impl Into<Box<str>>) -> Self {
		Self {
			tag: tag.into(),
			option: option.into(),
		}
	}
}
