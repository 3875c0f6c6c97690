use serde_json::json;

use crate::df::EncodedTemplate;

/// Template data format version understood by the plugin.
const TEMPLATE_DATA_VERSION: u32 = 1;

/// Render the ender chest item that carries `template` into the game, as SNBT.
pub fn template_item_snbt(template: &EncodedTemplate, author: &str) -> String {
	let display_name = json!({ "italic": false, "text": template.name }).to_string();
	let template_data = json!({
		"author": author,
		"name": template.name,
		"version": TEMPLATE_DATA_VERSION,
		"code": template.code,
	})
	.to_string();

	format!(
		"{{Count:1b,id:\"minecraft:ender_chest\",tag:{{display:{{Name:{}}},PublicBukkitValues:{{\"hypercube:codetemplatedata\":{}}}}}}}",
		snbt_string(&display_name),
		snbt_string(&template_data),
	)
}

/// Quote a string tag, escaping backslashes and double quotes.
fn snbt_string(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);
	out.push('"');
	for ch in value.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			c => out.push(c),
		}
	}
	out.push('"');
	out
}
