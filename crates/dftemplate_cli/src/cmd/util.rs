use std::path::Path;
use std::time::Duration;

use dftemplate::df::{CodeClientConfig, Result, Template, TemplateDocument};
use tracing::info;

/// Load an authoring document and build its template.
pub(crate) fn load_template(path: &Path) -> Result<Template> {
	let document = TemplateDocument::load(path)?;
	info!(path = %path.display(), entries = document.len(), "loaded template document");
	document.into_template()
}

/// Client settings from command-line flags.
pub(crate) fn client_config(url: String, author: String, connect_timeout_ms: u64, ack_timeout_ms: u64) -> CodeClientConfig {
	CodeClientConfig {
		url,
		connect_timeout: Duration::from_millis(connect_timeout_ms),
		ack_timeout: Duration::from_millis(ack_timeout_ms),
		author,
	}
}
