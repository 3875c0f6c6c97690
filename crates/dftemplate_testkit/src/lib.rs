//! Shared test helpers for workspace crates.

use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tungstenite::Message;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Websocket URL on localhost where nothing is listening.
pub fn unreachable_url() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
	let port = listener.local_addr().expect("listener has address").port();
	drop(listener);
	format!("ws://127.0.0.1:{port}")
}

type Responder = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// In-process stand-in for the CodeClient websocket.
///
/// Accepts connections one at a time on a background thread, records every
/// text frame, and answers with whatever the responder returns.
pub struct MockCodeClient {
	url: String,
	frames: Arc<Mutex<Vec<String>>>,
}

impl MockCodeClient {
	/// Server that never replies, which CodeClient uses to signal success.
	pub fn silent() -> Self {
		Self::with_responder(|_| None)
	}

	/// Server that answers every `give` with `message`.
	pub fn refusing(message: &str) -> Self {
		let message = message.to_owned();
		Self::with_responder(move |frame| frame.starts_with("give ").then(|| message.clone()))
	}

	/// Server answering each frame via `responder`.
	pub fn with_responder(responder: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
		let port = listener.local_addr().expect("listener has address").port();
		let frames = Arc::new(Mutex::new(Vec::new()));
		let responder: Responder = Arc::new(responder);

		let recorded = Arc::clone(&frames);
		thread::spawn(move || {
			for stream in listener.incoming() {
				let Ok(stream) = stream else { break };
				serve(stream, &recorded, &responder);
			}
		});

		Self {
			url: format!("ws://127.0.0.1:{port}"),
			frames,
		}
	}

	/// Endpoint to connect to.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Frames received so far.
	pub fn frames(&self) -> Vec<String> {
		self.frames.lock().expect("frames lock").clone()
	}

	/// Wait until at least `count` frames arrived, returning them.
	pub fn wait_for_frames(&self, count: usize) -> Vec<String> {
		let deadline = Instant::now() + Duration::from_secs(5);
		loop {
			let frames = self.frames();
			if frames.len() >= count || Instant::now() > deadline {
				return frames;
			}
			thread::sleep(Duration::from_millis(5));
		}
	}
}

fn serve(stream: TcpStream, frames: &Mutex<Vec<String>>, responder: &Responder) {
	let Ok(mut socket) = tungstenite::accept(stream) else {
		return;
	};

	while let Ok(message) = socket.read() {
		if !message.is_text() {
			continue;
		}
		let Ok(text) = message.to_text().map(str::to_owned) else {
			break;
		};
		frames.lock().expect("frames lock").push(text.clone());

		if let Some(reply) = responder(&text) {
			if socket.send(Message::text(reply)).is_err() {
				break;
			}
		}
	}
}
