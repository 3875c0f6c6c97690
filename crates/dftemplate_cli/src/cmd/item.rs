use std::path::PathBuf;

use dftemplate::df::{Result, template_item_snbt};

use crate::cmd::util::load_template;

pub fn run(path: PathBuf, author: String) -> Result<()> {
	let template = load_template(&path)?;
	let encoded = template.package()?;
	println!("{}", template_item_snbt(&encoded, &author));
	Ok(())
}
