use std::path::PathBuf;

use dftemplate::df::Result;

use crate::cmd::util::load_template;

pub fn run(path: PathBuf) -> Result<()> {
	let template = load_template(&path)?;
	println!("{}", template.encode()?);
	Ok(())
}
