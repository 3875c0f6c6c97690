use std::path::PathBuf;

use dftemplate::df::{CodeClientConfig, Result};
use tracing::info;

use crate::cmd::util::load_template;

pub fn run(path: PathBuf, config: CodeClientConfig) -> Result<()> {
	let template = load_template(&path)?;
	template.send_to_codeclient(&config)?;

	let name = template.display_name();
	info!(%name, "template delivered");
	println!("sent: {name}");
	Ok(())
}
