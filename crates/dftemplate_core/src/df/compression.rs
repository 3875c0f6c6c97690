use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use tracing::debug;

use crate::df::{Result, TemplateError, TemplateRecord};

/// Longest encoded string the plugin accepts.
pub const MAX_ENCODED_LEN: usize = 65_535;
const MAX_DECOMPRESSED_BYTES: usize = 16 * 1024 * 1024;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
	/// Gzip level, `0..=9`.
	pub level: u32,
	/// Maximum encoded length in characters.
	pub max_len: usize,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			level: 9,
			max_len: MAX_ENCODED_LEN,
		}
	}
}

/// Serialize, gzip, and base64-encode a record list.
///
/// The gzip header carries no timestamp or file name, so equal records always
/// produce equal strings.
pub(crate) fn encode_records(record: &TemplateRecord, options: &EncodeOptions) -> Result<String> {
	let json = serde_json::to_vec(record)?;

	let mut encoder = GzBuilder::new().mtime(0).write(Vec::new(), Compression::new(options.level.min(9)));
	encoder.write_all(&json)?;
	let compressed = encoder.finish()?;

	let encoded = STANDARD.encode(&compressed);
	debug!(json = json.len(), gzip = compressed.len(), base64 = encoded.len(), "encoded template");

	if encoded.len() > options.max_len {
		return Err(TemplateError::TooLarge {
			len: encoded.len(),
			max: options.max_len,
		});
	}

	Ok(encoded)
}

/// Reverse [`encode_records`]: base64-decode, gunzip, and parse the records.
pub fn decode_records(code: &str) -> Result<TemplateRecord> {
	let compressed = STANDARD.decode(code.trim())?;
	let json = gunzip(&compressed)?;
	Ok(serde_json::from_slice(&json)?)
}

fn gunzip(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = GzDecoder::new(raw);
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(TemplateError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

#[cfg(test)]
mod tests;
