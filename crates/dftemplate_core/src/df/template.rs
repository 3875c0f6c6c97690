use tracing::debug;

use crate::df::compression::encode_records;
use crate::df::{
	BracketPair, CodeBlockCategory, CodeClient, CodeClientConfig, EncodeOptions, Entry, Result, TemplateRecord, Transport, match_brackets,
};

/// Ordered program description for import into the plugin.
///
/// Entries run in insertion order. Bracket balance is only checked when the
/// template is validated or encoded, so entries may be appended in any order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
	entries: Vec<Entry>,
	name: Option<Box<str>>,
}

/// Encoded template ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTemplate {
	/// Display name of the template item.
	pub name: String,
	/// Encoded template string.
	pub code: String,
}

impl Template {
	/// Create a template from entries in execution order.
	pub fn new(entries: Vec<Entry>) -> Self {
		Self { entries, name: None }
	}

	/// Same template with an explicit display name.
	pub fn with_name(self, name: impl Into<Box<str>>) -> Self {
		Self {
			name: Some(name.into()),
			..self
		}
	}

	/// Append one entry.
	pub fn push(&mut self, entry: impl Into<Entry>) -> &mut Self {
		self.entries.push(entry.into());
		self
	}

	/// Entries in execution order.
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Explicit display name, if set.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the template has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Check bracket balance without encoding.
	pub fn validate(&self) -> Result<Vec<BracketPair>> {
		match_brackets(&self.entries)
	}

	/// Render every entry into its wire record, without bracket checks.
	pub fn to_records(&self) -> Result<TemplateRecord> {
		let blocks = self.entries.iter().map(Entry::to_record).collect::<Result<Vec<_>>>()?;
		Ok(TemplateRecord { blocks })
	}

	/// Encode into the plugin's template string with default options.
	pub fn encode(&self) -> Result<String> {
		self.encode_with(&EncodeOptions::default())
	}

	/// Encode into the plugin's template string.
	pub fn encode_with(&self, options: &EncodeOptions) -> Result<String> {
		self.validate()?;
		let records = self.to_records()?;
		encode_records(&records, options)
	}

	/// Encode and pair the result with the display name.
	pub fn package(&self) -> Result<EncodedTemplate> {
		Ok(EncodedTemplate {
			name: self.display_name(),
			code: self.encode()?,
		})
	}

	/// Encode and hand the result to `transport`. The template is left untouched
	/// whatever the outcome, so a failed send can be retried.
	pub fn send<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<()> {
		let encoded = self.package()?;
		debug!(name = %encoded.name, len = encoded.code.len(), "sending template");
		transport.deliver(&encoded)?;
		Ok(())
	}

	/// Encode, then give the template item over a fresh CodeClient session.
	///
	/// Encoding errors surface before any connection is opened.
	pub fn send_to_codeclient(&self, config: &CodeClientConfig) -> Result<()> {
		let encoded = self.package()?;
		let mut client = CodeClient::connect(config.clone())?;
		debug!(name = %encoded.name, url = %config.url, "sending template to codeclient");
		client.deliver(&encoded)?;
		client.close()?;
		Ok(())
	}

	/// Item display name: the explicit name, else one derived from the first entry.
	pub fn display_name(&self) -> String {
		if let Some(name) = &self.name {
			return name.to_string();
		}

		let Some(head) = self.entries.first() else {
			return "§bEmpty Template".to_owned();
		};
		let Entry::Block(block) = head else {
			return "§bCode Template".to_owned();
		};

		let data = block.data_name().unwrap_or_default();
		let (prefix, action) = match block.category() {
			CodeBlockCategory::PlayerEvent => ("§e§lPlayer Event §6", format!("§e{}", block.action())),
			CodeBlockCategory::EntityEvent => ("§e§lEntity Event §6", format!("§e{}", block.action())),
			CodeBlockCategory::Function => ("§b§lFunction §5", format!("§b{data}")),
			CodeBlockCategory::Process => ("§b§lProcess §5", format!("§b{data}")),
			_ => ("§bCode Template §3", format!("§b{}", block.action())),
		};
		format!("{prefix}» {action}")
	}
}

impl FromIterator<Entry> for Template {
	fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl Extend<Entry> for Template {
	fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
		self.entries.extend(iter);
	}
}

#[cfg(test)]
mod tests;
