use std::path::PathBuf;

use dftemplate::df::Result;

use crate::cmd::util::load_template;

/// Print the wire records. Brackets are validated first so the output is
/// always something `encode` would accept.
pub fn run(path: PathBuf, compact: bool) -> Result<()> {
	let template = load_template(&path)?;
	template.validate()?;
	let records = template.to_records()?;

	let json = if compact {
		serde_json::to_string(&records)?
	} else {
		serde_json::to_string_pretty(&records)?
	};
	println!("{json}");
	Ok(())
}
