use std::time::Duration;

use dftemplate::df::{CodeClient, CodeClientConfig, Result, Scope, Scopes};

pub fn run(config: CodeClientConfig, request: Vec<Scope>, wait_ms: u64) -> Result<()> {
	let mut client = CodeClient::connect(config)?;

	if request.is_empty() {
		let granted = client.query_scopes()?;
		println!("granted: {granted}");
	} else {
		let requested: Scopes = request.into_iter().collect();
		let granted = client.request_scopes(requested, Duration::from_millis(wait_ms))?;
		println!("requested: {requested}");
		println!("granted: {granted}");
	}

	client.close()?;
	Ok(())
}
