mod block;
mod brackets;
mod category;
mod codeclient;
mod compression;
mod document;
mod error;
mod item;
mod record;
mod scope;
mod template;
mod value;

/// Code block, bracket, and argument types.
pub use block::{Argument, Bracket, CodeBlock, Entry, MAX_SLOT};
/// Pure bracket matching over an entry sequence.
pub use brackets::{BracketKind, BracketPair, match_brackets};
/// Block category, target selection, and parameter type enumerations.
pub use category::{CodeBlockCategory, DataType, Selection};
/// CodeClient companion transport.
pub use codeclient::{CodeClient, CodeClientConfig, PlaceMode, PlayerMode, Scope, Scopes, Transport};
/// Gzip/base64 codec and its options.
pub use compression::{EncodeOptions, MAX_ENCODED_LEN, decode_records};
/// JSON authoring document format.
pub use document::TemplateDocument;
/// Error and result aliases.
pub use error::{DeliveryError, ErrorKind, Result, TemplateError};
/// Template item rendering for in-game delivery.
pub use item::template_item_snbt;
/// Intermediate wire records mirroring the plugin's template schema.
pub use record::{ArgsRecord, BlockRecord, BracketDirection, BracketRecord, BracketType, CodeBlockRecord, ItemRecord, SlotRecord, TemplateRecord};
/// Variable scope enumeration.
pub use scope::VariableScope;
/// Template container and its encoded form.
pub use template::{EncodedTemplate, Template};
/// Argument value types.
pub use value::{BlockTag, GameValue, Location, Parameter, Particle, ParticleData, Potion, Sound, Value, Variable, Vector};
