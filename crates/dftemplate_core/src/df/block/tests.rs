use serde_json::json;

use crate::df::{BlockTag, Bracket, CodeBlock, CodeBlockCategory, ErrorKind, Selection, TemplateError, Value, Variable};

#[test]
fn empty_action_is_rejected() {
	let err = CodeBlock::player_action("", Vec::<Value>::new()).expect_err("empty action should fail");
	assert!(matches!(err, TemplateError::EmptyAction { category: "player_action" }));
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn action_is_not_checked_against_category() {
	let block = CodeBlock::player_event("NotARealEvent").expect("any non-empty action is accepted");
	assert_eq!(block.action(), "NotARealEvent");
}

#[test]
fn literals_are_normalized_to_values() {
	let block = CodeBlock::repeat("Multiple", crate::values![Variable::line("index"), 10]).expect("block builds");
	let record = block.to_record().expect("record renders");

	assert_eq!(record.block, "repeat");
	assert_eq!(record.action.as_deref(), Some("Multiple"));
	assert_eq!(record.args.items.len(), 2);
	assert_eq!(record.args.items[0].slot, 0);
	assert_eq!(record.args.items[0].item.id, "var");
	assert_eq!(record.args.items[0].item.data, json!({"name": "index", "scope": "line"}));
	assert_eq!(record.args.items[1].slot, 1);
	assert_eq!(record.args.items[1].item.id, "num");
	assert_eq!(record.args.items[1].item.data, json!({"name": "10"}));
}

#[test]
fn block_tags_fill_slots_from_the_end() {
	let block = CodeBlock::player_action(
		"GivePotion",
		crate::values![
			crate::df::Potion::new("Saturation").with_amplifier(10),
			BlockTag::new("Show Icon", "False"),
			BlockTag::new("Overwrite Effect", "True"),
		],
	)
	.expect("block builds");
	let record = block.to_record().expect("record renders");

	let slots: Vec<_> = record.args.items.iter().map(|item| item.slot).collect();
	assert_eq!(slots, vec![0, 26, 25]);
	assert_eq!(
		record.args.items[1].item.data,
		json!({"option": "False", "tag": "Show Icon", "action": "GivePotion", "block": "player_action"})
	);
	assert_eq!(record.args.items[0].item.data, json!({"pot": "Saturation", "dur": 1_000_000, "amp": 9}));
}

#[test]
fn block_tag_without_action_uses_dynamic() {
	let block = CodeBlock::call_function("helper", crate::values![BlockTag::new("Is Hidden", "False")]).expect("block builds");
	let record = block.to_record().expect("record renders");

	assert_eq!(record.action, None);
	assert_eq!(record.data.as_deref(), Some("helper"));
	assert_eq!(record.args.items[0].item.data["action"], "dynamic");
	assert_eq!(record.args.items[0].item.data["block"], "call_func");
}

#[test]
fn pinned_slots_override_position() {
	let block = CodeBlock::player_action("SendMessage", Vec::<Value>::new())
		.and_then(|block| block.with_arg_at(13, "hello"))
		.expect("block builds");
	let record = block.to_record().expect("record renders");
	assert_eq!(record.args.items[0].slot, 13);

	let err = CodeBlock::player_action("SendMessage", Vec::<Value>::new())
		.and_then(|block| block.with_arg_at(27, "hello"))
		.expect_err("slot 27 is outside the chest");
	assert!(matches!(err, TemplateError::SlotOutOfRange { slot: 27, max: 26 }));
}

#[test]
fn pinned_slot_colliding_with_position_fails() {
	let err = CodeBlock::player_action("SendMessage", crate::values!["a"])
		.and_then(|block| block.with_arg_at(0, "b"))
		.expect("arguments are only placed when rendering")
		.to_record()
		.expect_err("two arguments in slot 0");
	assert!(matches!(err, TemplateError::SlotTaken { slot: 0 }));
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn positional_argument_cannot_take_a_block_tag_slot() {
	let mut args = vec![Value::from(BlockTag::new("Alignment Mode", "Regular"))];
	args.extend((0..26).map(Value::from));
	let block = CodeBlock::player_action("SendMessage", args).expect("27 arguments fit the chest");

	let err = block.to_record().expect_err("last positional argument lands on the tag slot");
	assert!(matches!(err, TemplateError::SlotTaken { slot: 26 }));

	let fits = CodeBlock::player_action("SendMessage", crate::values![BlockTag::new("Alignment Mode", "Regular"), 1, 2])
		.expect("block builds")
		.to_record()
		.expect("distinct slots render");
	let slots: Vec<_> = fits.args.items.iter().map(|item| item.slot).collect();
	assert_eq!(slots, vec![26, 1, 2]);
}

#[test]
fn too_many_positional_arguments_fail() {
	let err = CodeBlock::player_action("SendMessage", (0..28).map(Value::from)).expect_err("28 args overflow the chest");
	assert!(matches!(err, TemplateError::SlotOutOfRange { slot: 27, .. }));
}

#[test]
fn extras_render_into_the_record() {
	let block = CodeBlock::if_var("=", crate::values![Variable::game("a"), 1])
		.expect("block builds")
		.negated()
		.with_target(Selection::AllPlayers);
	let record = block.to_record().expect("record renders");
	assert_eq!(record.attribute.as_deref(), Some("NOT"));
	assert_eq!(record.target.as_deref(), Some("AllPlayers"));

	let repeat = CodeBlock::repeat("While", Vec::<Value>::new()).expect("block builds").with_sub_action("VarIsTrue");
	assert_eq!(repeat.to_record().expect("record renders").sub_action.as_deref(), Some("VarIsTrue"));
}

#[test]
fn function_like_categories_store_the_name_as_data() {
	let block = CodeBlock::new(CodeBlockCategory::Function, "setup", Vec::<Value>::new()).expect("block builds");
	assert_eq!(block.data_name(), Some("setup"));
	assert_eq!(block.action(), "");

	let err = CodeBlock::process("", Vec::<Value>::new()).expect_err("empty process name should fail");
	assert!(matches!(err, TemplateError::EmptyDataName { category: "process" }));
}

#[test]
fn else_block_has_no_action() {
	let record = CodeBlock::else_block().to_record().expect("record renders");
	let json = serde_json::to_value(&record).expect("record serializes");
	assert_eq!(json, json!({"block": "else", "args": {"items": []}}));
}

#[test]
fn bracket_records_use_plugin_keywords() {
	let open = serde_json::to_value(crate::df::Entry::from(Bracket::open_repeat()).to_record().expect("record renders"))
		.expect("record serializes");
	assert_eq!(open, json!({"id": "bracket", "direct": "open", "type": "repeat"}));

	let close = serde_json::to_value(crate::df::Entry::from(Bracket::close_norm()).to_record().expect("record renders"))
		.expect("record serializes");
	assert_eq!(close, json!({"id": "bracket", "direct": "close", "type": "norm"}));
}
