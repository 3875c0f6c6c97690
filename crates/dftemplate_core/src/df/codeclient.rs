//! Websocket client for the CodeClient companion mod.
//!
//! Every command is one text frame. Most commands are fire-and-forget; `give`
//! and `setinv` answer only when they refuse, so silence within the ack window
//! counts as success.

use std::fmt;
use std::io::ErrorKind as IoErrorKind;
use std::net::{TcpStream, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};
use tungstenite::client::IntoClientRequest;
use tungstenite::{Message, WebSocket};

use crate::df::{DeliveryError, EncodedTemplate, TemplateError, template_item_snbt};

type DeliveryResult<T> = std::result::Result<T, DeliveryError>;

/// Reply sent when a give or setinv is refused outside creative mode.
const NOT_CREATIVE: &str = "not creative mode";

/// Destination for encoded templates.
pub trait Transport {
	/// Deliver one encoded template, in a single attempt.
	fn deliver(&mut self, template: &EncodedTemplate) -> DeliveryResult<()>;
}

/// Connection settings for [`CodeClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeClientConfig {
	/// Websocket endpoint.
	pub url: String,
	/// Bound on TCP connect and handshake.
	pub connect_timeout: Duration,
	/// How long to wait for a refusal after a command.
	pub ack_timeout: Duration,
	/// Author recorded in delivered template items.
	pub author: String,
}

impl CodeClientConfig {
	/// Default CodeClient endpoint.
	pub const DEFAULT_URL: &'static str = "ws://localhost:31375";
}

impl Default for CodeClientConfig {
	fn default() -> Self {
		Self {
			url: Self::DEFAULT_URL.to_owned(),
			connect_timeout: Duration::from_secs(2),
			ack_timeout: Duration::from_millis(100),
			author: "dftemplate".to_owned(),
		}
	}
}

/// Permission a CodeClient session can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
	/// Read and replace the player's inventory.
	Inventory,
	/// Teleport and switch modes.
	Movement,
	/// Read plot metadata and code.
	ReadPlot,
	/// Place code templates.
	WriteCode,
	/// Wipe the plot's code.
	ClearPlot,
}

impl Scope {
	/// All requestable scopes.
	pub const ALL: [Self; 5] = [Self::Inventory, Self::Movement, Self::ReadPlot, Self::WriteCode, Self::ClearPlot];

	/// Wire identifier.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Inventory => "inventory",
			Self::Movement => "movement",
			Self::ReadPlot => "read_plot",
			Self::WriteCode => "write_code",
			Self::ClearPlot => "clear_plot",
		}
	}

	fn bit(self) -> u8 {
		1 << (self as u8)
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Scope {
	type Err = TemplateError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|scope| scope.as_str() == value)
			.ok_or_else(|| TemplateError::InvalidClientScope { value: value.to_owned() })
	}
}

/// Set of granted or requested scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scopes(u8);

impl Scopes {
	/// No scopes beyond the implicit default.
	pub fn empty() -> Self {
		Self(0)
	}

	/// Whether `scope` is in the set.
	pub fn contains(self, scope: Scope) -> bool {
		self.0 & scope.bit() != 0
	}

	/// Add `scope`.
	pub fn insert(&mut self, scope: Scope) {
		self.0 |= scope.bit();
	}

	/// Whether the set is empty.
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Scopes in the set, in declaration order.
	pub fn iter(self) -> impl Iterator<Item = Scope> {
		Scope::ALL.into_iter().filter(move |scope| self.contains(*scope))
	}

	/// Parse a space-separated scope list, skipping unknown words.
	pub fn from_reply(reply: &str) -> Self {
		reply.split_whitespace().filter_map(|word| word.parse().ok()).collect()
	}

	fn wire_list(self) -> String {
		self.iter().map(Scope::as_str).collect::<Vec<_>>().join(" ")
	}
}

impl fmt::Display for Scopes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.wire_list())
	}
}

impl FromIterator<Scope> for Scopes {
	fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
		let mut scopes = Self::empty();
		for scope in iter {
			scopes.insert(scope);
		}
		scopes
	}
}

/// How queued templates are laid out by `place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceMode {
	/// Companion default spacing.
	#[default]
	Default,
	/// One after another with no gap.
	Compact,
	/// Replace existing templates with the same header, place the rest.
	Swap,
}

/// Player mode on a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
	/// Hub/spawn.
	Spawn,
	/// Play mode.
	Play,
	/// Dev mode.
	Dev,
	/// Build mode.
	Build,
}

impl PlayerMode {
	/// Wire identifier.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Spawn => "spawn",
			Self::Play => "play",
			Self::Dev => "dev",
			Self::Build => "build",
		}
	}

	fn from_reply(reply: &str) -> Option<Self> {
		match reply.trim() {
			"spawn" => Some(Self::Spawn),
			"play" => Some(Self::Play),
			"dev" => Some(Self::Dev),
			"build" => Some(Self::Build),
			_ => None,
		}
	}
}

/// Open session with the CodeClient companion.
pub struct CodeClient {
	socket: WebSocket<TcpStream>,
	config: CodeClientConfig,
	granted: Scopes,
}

impl CodeClient {
	/// Connect to the companion described by `config`.
	pub fn connect(config: CodeClientConfig) -> DeliveryResult<Self> {
		let socket = open_socket(&config)?;
		debug!(url = %config.url, "connected to codeclient");
		Ok(Self {
			socket,
			config,
			granted: Scopes::empty(),
		})
	}

	/// Session settings.
	pub fn config(&self) -> &CodeClientConfig {
		&self.config
	}

	/// Scopes known to be granted to this session.
	pub fn granted(&self) -> Scopes {
		self.granted
	}

	/// Give the player an item described in SNBT.
	pub fn give(&mut self, snbt: &str) -> DeliveryResult<()> {
		self.send_text(format!("give {snbt}"))?;
		self.check_refusal("give")
	}

	/// Give the player the template item for `template`.
	pub fn give_template(&mut self, template: &EncodedTemplate) -> DeliveryResult<()> {
		let snbt = template_item_snbt(template, &self.config.author);
		self.give(&snbt)
	}

	/// Ask the companion which scopes this session holds.
	pub fn query_scopes(&mut self) -> DeliveryResult<Scopes> {
		self.send_text("scopes".to_owned())?;
		let reply = self.read_reply(self.config.ack_timeout)?.ok_or(DeliveryError::NoReply { command: "scopes" })?;
		self.granted = Scopes::from_reply(&reply);
		Ok(self.granted)
	}

	/// Request `scopes`; the player confirms in game, so `wait` should be generous.
	///
	/// Returns whether the request was granted.
	pub fn request_scopes(&mut self, scopes: Scopes, wait: Duration) -> DeliveryResult<bool> {
		self.send_text(format!("scopes {}", scopes.wire_list()))?;
		let granted = self.read_reply(wait)?.is_some_and(|reply| reply.contains("auth"));
		if granted {
			self.granted = scopes;
		}
		debug!(requested = %scopes.wire_list(), granted, "codeclient scope request");
		Ok(granted)
	}

	/// Place templates in the codespace, then run the placer.
	pub fn place(&mut self, templates: &[EncodedTemplate], mode: PlaceMode) -> DeliveryResult<()> {
		self.require(Scope::WriteCode)?;
		match mode {
			PlaceMode::Default => {}
			PlaceMode::Compact => self.send_text("place compact".to_owned())?,
			PlaceMode::Swap => self.send_text("place swap".to_owned())?,
		}
		for template in templates {
			self.send_text(format!("place {}", template.code))?;
		}
		self.send_text("place go".to_owned())
	}

	/// Player inventory as the raw SNBT list the companion sends.
	pub fn inventory(&mut self) -> DeliveryResult<String> {
		self.require(Scope::Inventory)?;
		self.send_text("inv".to_owned())?;
		self.read_reply(self.config.ack_timeout)?.ok_or(DeliveryError::NoReply { command: "inv" })
	}

	/// Replace the player inventory with `items`, each given in SNBT.
	pub fn set_inventory(&mut self, items: &[String]) -> DeliveryResult<()> {
		self.require(Scope::Inventory)?;
		self.send_text(format!("setinv [{}]", items.join(",")))?;
		self.check_refusal("setinv")
	}

	/// Current player mode.
	pub fn mode(&mut self) -> DeliveryResult<PlayerMode> {
		self.require(Scope::Movement)?;
		self.send_text("mode".to_owned())?;
		let reply = self.read_reply(self.config.ack_timeout)?.ok_or(DeliveryError::NoReply { command: "mode" })?;
		PlayerMode::from_reply(&reply).ok_or(DeliveryError::Rejected { message: reply })
	}

	/// Switch player mode; confirm with [`CodeClient::mode`].
	pub fn set_mode(&mut self, mode: PlayerMode) -> DeliveryResult<()> {
		self.require(Scope::Movement)?;
		self.send_text(format!("mode {}", mode.as_str()))
	}

	/// Teleport to the codespace spawn.
	pub fn spawn(&mut self) -> DeliveryResult<()> {
		self.require(Scope::Movement)?;
		self.send_text("spawn".to_owned())
	}

	/// Plot size label (`basic`, `large`, `massive`, `mega`).
	pub fn plot_size(&mut self) -> DeliveryResult<String> {
		self.require(Scope::ReadPlot)?;
		self.send_text("size".to_owned())?;
		self.read_reply(self.config.ack_timeout)?.ok_or(DeliveryError::NoReply { command: "size" })
	}

	/// Remove all code from the plot.
	pub fn clear_plot(&mut self) -> DeliveryResult<()> {
		self.require(Scope::ClearPlot)?;
		self.send_text("clear".to_owned())
	}

	/// Close the websocket.
	pub fn close(mut self) -> DeliveryResult<()> {
		self.socket.close(None)?;
		self.socket.flush()?;
		Ok(())
	}

	/// Map a `not creative mode` reply to [`DeliveryError::Rejected`]; silence is success.
	fn check_refusal(&mut self, command: &'static str) -> DeliveryResult<()> {
		match self.read_reply(self.config.ack_timeout)? {
			Some(reply) if reply == NOT_CREATIVE => {
				warn!(command, "codeclient refused: {reply}");
				Err(DeliveryError::Rejected { message: reply })
			}
			Some(reply) => {
				debug!(command, %reply, "codeclient replied");
				Ok(())
			}
			None => Ok(()),
		}
	}

	fn require(&self, scope: Scope) -> DeliveryResult<()> {
		if self.granted.contains(scope) {
			return Ok(());
		}
		Err(DeliveryError::MissingScope { scope: scope.as_str() })
	}

	fn send_text(&mut self, text: String) -> DeliveryResult<()> {
		debug!(command = text.split(' ').next().unwrap_or_default(), len = text.len(), "codeclient send");
		self.socket.send(Message::text(text))?;
		Ok(())
	}

	fn read_reply(&mut self, wait: Duration) -> DeliveryResult<Option<String>> {
		self.socket
			.get_ref()
			.set_read_timeout(Some(wait.max(Duration::from_millis(1))))
			.map_err(tungstenite::Error::from)?;

		loop {
			match self.socket.read() {
				Ok(message) if message.is_text() || message.is_binary() => return Ok(Some(message.to_text()?.to_owned())),
				Ok(Message::Close(_)) => return Err(DeliveryError::Socket(tungstenite::Error::ConnectionClosed)),
				Ok(_) => continue,
				Err(tungstenite::Error::Io(err)) if matches!(err.kind(), IoErrorKind::WouldBlock | IoErrorKind::TimedOut) => return Ok(None),
				Err(err) => return Err(err.into()),
			}
		}
	}
}

impl Transport for CodeClient {
	fn deliver(&mut self, template: &EncodedTemplate) -> DeliveryResult<()> {
		self.give_template(template)
	}
}

fn open_socket(config: &CodeClientConfig) -> DeliveryResult<WebSocket<TcpStream>> {
	let invalid = |reason: String| DeliveryError::InvalidUrl {
		url: config.url.clone(),
		reason,
	};

	let request = config.url.as_str().into_client_request().map_err(|err| invalid(err.to_string()))?;
	if request.uri().scheme_str() != Some("ws") {
		return Err(invalid("only plain ws:// endpoints are supported".to_owned()));
	}
	let host = request.uri().host().ok_or_else(|| invalid("missing host".to_owned()))?.to_owned();
	let port = request.uri().port_u16().unwrap_or(80);

	let addrs = (host.as_str(), port).to_socket_addrs().map_err(|err| invalid(err.to_string()))?;
	let mut last_err = None;
	let mut stream = None;
	for addr in addrs {
		match TcpStream::connect_timeout(&addr, config.connect_timeout) {
			Ok(connected) => {
				stream = Some(connected);
				break;
			}
			Err(err) => last_err = Some(err),
		}
	}

	let stream = stream.ok_or_else(|| DeliveryError::Connect {
		url: config.url.clone(),
		source: last_err.unwrap_or_else(|| std::io::Error::new(IoErrorKind::NotFound, "host resolved to no addresses")),
	})?;

	let connect_err = |source: std::io::Error| DeliveryError::Connect {
		url: config.url.clone(),
		source,
	};
	stream.set_nodelay(true).map_err(connect_err)?;
	stream.set_read_timeout(Some(config.connect_timeout)).map_err(connect_err)?;
	stream.set_write_timeout(Some(config.connect_timeout)).map_err(connect_err)?;

	let (socket, _response) = tungstenite::client::client(request, stream).map_err(|err| DeliveryError::Handshake {
		url: config.url.clone(),
		reason: err.to_string(),
	})?;
	Ok(socket)
}

#[cfg(test)]
mod tests;
