use thiserror::Error;

use crate::df::BracketKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Coarse classification of a [`TemplateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Malformed constructor or document input.
	InvalidArgument,
	/// Unbalanced or misordered brackets found at encode time.
	Structural,
	/// Transport call failed or was refused.
	Delivery,
	/// Serialization, compression, or size failure.
	Encoding,
}

/// Errors produced while building, encoding, and sending templates.
#[derive(Debug, Error)]
pub enum TemplateError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Unknown variable scope identifier.
	#[error("unknown variable scope: {value}")]
	InvalidScope {
		/// Offending scope text.
		value: String,
	},
	/// Unknown code block category identifier.
	#[error("unknown code block category: {value}")]
	InvalidCategory {
		/// Offending category text.
		value: String,
	},
	/// Unknown target selection identifier.
	#[error("unknown target selection: {value}")]
	InvalidSelection {
		/// Offending selection text.
		value: String,
	},
	/// Unknown parameter data type identifier.
	#[error("unknown data type: {value}")]
	InvalidDataType {
		/// Offending data type text.
		value: String,
	},
	/// Unknown CodeClient scope identifier.
	#[error("unknown codeclient scope: {value}")]
	InvalidClientScope {
		/// Offending scope text.
		value: String,
	},
	/// Code block was built without an action name.
	#[error("empty action name for {category} block")]
	EmptyAction {
		/// Category wire id of the rejected block.
		category: &'static str,
	},
	/// Function or process block was built without a name.
	#[error("empty function/process name for {category} block")]
	EmptyDataName {
		/// Category wire id of the rejected block.
		category: &'static str,
	},
	/// Argument slot lies outside the chest.
	#[error("argument slot {slot} out of range (max={max})")]
	SlotOutOfRange {
		/// Requested slot.
		slot: usize,
		/// Highest valid slot.
		max: u8,
	},
	/// Two arguments of one block resolve to the same chest slot.
	#[error("chest slot {slot} is used by more than one argument")]
	SlotTaken {
		/// Contested slot.
		slot: u8,
	},
	/// Float value is infinite or NaN.
	#[error("non-finite number in {field}")]
	NonFiniteNumber {
		/// Item field holding the value.
		field: &'static str,
	},
	/// Authoring document did not describe a valid template.
	#[error("invalid template document: {0}")]
	Document(String),
	/// Closing bracket with no open bracket of the same kind before it.
	#[error("unmatched closing {kind} bracket at entry {index}")]
	UnmatchedClose {
		/// Entry index of the stray bracket.
		index: usize,
		/// Bracket kind.
		kind: BracketKind,
	},
	/// Opening bracket never closed before the end of the template.
	#[error("unclosed {kind} bracket at entry {index}")]
	UnclosedBracket {
		/// Entry index of the unclosed bracket.
		index: usize,
		/// Bracket kind.
		kind: BracketKind,
	},
	/// Record JSON (de)serialization failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Encoded text was not valid base64.
	#[error("base64: {0}")]
	Base64(#[from] base64::DecodeError),
	/// Encoded output exceeds what the plugin accepts.
	#[error("encoded template too large: {len} / {max}")]
	TooLarge {
		/// Encoded length in characters.
		len: usize,
		/// Maximum accepted length.
		max: usize,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Delivery to the companion failed.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
}

impl TemplateError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidScope { .. }
			| Self::InvalidCategory { .. }
			| Self::InvalidSelection { .. }
			| Self::InvalidDataType { .. }
			| Self::InvalidClientScope { .. }
			| Self::EmptyAction { .. }
			| Self::EmptyDataName { .. }
			| Self::SlotOutOfRange { .. }
			| Self::SlotTaken { .. }
			| Self::NonFiniteNumber { .. }
			| Self::Document(_) => ErrorKind::InvalidArgument,
			Self::UnmatchedClose { .. } | Self::UnclosedBracket { .. } => ErrorKind::Structural,
			Self::Delivery(_) => ErrorKind::Delivery,
			Self::Io(_) | Self::Json(_) | Self::Base64(_) | Self::TooLarge { .. } | Self::DecompressedTooLarge { .. } => ErrorKind::Encoding,
		}
	}

	/// Whether this is a bracket structure failure.
	pub fn is_structural(&self) -> bool {
		self.kind() == ErrorKind::Structural
	}
}

/// Failures talking to the CodeClient companion.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Endpoint URL could not be parsed or resolved.
	#[error("invalid codeclient url {url}: {reason}")]
	InvalidUrl {
		/// Configured URL.
		url: String,
		/// Parse or resolution failure.
		reason: String,
	},
	/// TCP connection could not be established.
	#[error("could not connect to codeclient at {url}: {source}")]
	Connect {
		/// Configured URL.
		url: String,
		/// Underlying socket error.
		source: std::io::Error,
	},
	/// Websocket upgrade failed.
	#[error("websocket handshake with {url} failed: {reason}")]
	Handshake {
		/// Configured URL.
		url: String,
		/// Handshake failure description.
		reason: String,
	},
	/// Socket failure after the connection was established.
	#[error("codeclient socket: {0}")]
	Socket(#[from] tungstenite::Error),
	/// Companion answered with a refusal.
	#[error("codeclient rejected the request: {message}")]
	Rejected {
		/// Reply text.
		message: String,
	},
	/// Companion did not answer a command that requires a reply.
	#[error("codeclient did not reply to {command}")]
	NoReply {
		/// Command that went unanswered.
		command: &'static str,
	},
	/// Command needs a scope the session has not been granted.
	#[error("codeclient command requires scope {scope}")]
	MissingScope {
		/// Missing scope identifier.
		scope: &'static str,
	},
}
