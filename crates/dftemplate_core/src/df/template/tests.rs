use std::time::Duration;

use dftemplate_testkit::{MockCodeClient, unreachable_url};

use crate::df::{
	Bracket, BracketKind, CodeBlock, CodeClient, CodeClientConfig, DeliveryError, EncodedTemplate, Entry, ErrorKind, Template, TemplateError,
	Transport, Value, Variable, decode_records,
};

fn counter() -> Template {
	let mut template = Template::default();
	template
		.push(CodeBlock::player_event("Join").expect("event builds"))
		.push(CodeBlock::repeat("Multiple", crate::values![Variable::line("index"), 10]).expect("repeat builds"))
		.push(Bracket::open_repeat())
		.push(CodeBlock::player_action("SendMessage", crate::values![Variable::line("index")]).expect("action builds"))
		.push(Bracket::close_repeat());
	template
}

#[derive(Default)]
struct Recording {
	delivered: Vec<EncodedTemplate>,
	refuse: bool,
}

impl Transport for Recording {
	fn deliver(&mut self, template: &EncodedTemplate) -> Result<(), DeliveryError> {
		if self.refuse {
			return Err(DeliveryError::Rejected {
				message: "not creative mode".to_owned(),
			});
		}
		self.delivered.push(template.clone());
		Ok(())
	}
}

#[test]
fn empty_template_encodes_to_empty_block_list() {
	let template = Template::default();
	let code = template.encode().expect("empty template encodes");
	assert_eq!(decode_records(&code).expect("decodes").blocks, Vec::new());
	assert_eq!(template.display_name(), "§bEmpty Template");
}

#[test]
fn counter_template_round_trips() {
	let template = counter();
	let code = template.encode().expect("balanced template encodes");
	assert_eq!(decode_records(&code).expect("decodes"), template.to_records().expect("records render"));
}

#[test]
fn encoding_is_deterministic() {
	let template = counter();
	assert_eq!(template.encode().expect("encodes"), template.encode().expect("encodes again"));
	assert_eq!(template.encode().expect("encodes"), counter().encode().expect("equal template encodes"));
}

#[test]
fn missing_close_is_structural() {
	let entries = counter().entries()[..4].to_vec();
	let template = Template::new(entries);
	let err = template.encode().expect_err("unclosed bracket fails");
	assert!(matches!(
		err,
		TemplateError::UnclosedBracket {
			index: 2,
			kind: BracketKind::Repeat
		}
	));
	assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn records_render_without_bracket_checks() {
	let template: Template = [Entry::from(Bracket::close_norm())].into_iter().collect();
	assert_eq!(template.to_records().expect("records ignore balance").blocks.len(), 1);
	assert!(template.validate().is_err());
}

#[test]
fn display_name_follows_first_entry() {
	assert_eq!(counter().display_name(), "§e§lPlayer Event §6» §eJoin");

	let function: Template = [Entry::from(CodeBlock::function("setup", Vec::<Value>::new()).expect("function builds"))]
		.into_iter()
		.collect();
	assert_eq!(function.display_name(), "§b§lFunction §5» §bsetup");

	let action: Template = [Entry::from(CodeBlock::game_action("CancelEvent", Vec::<Value>::new()).expect("action builds"))]
		.into_iter()
		.collect();
	assert_eq!(action.display_name(), "§bCode Template §3» §bCancelEvent");

	assert_eq!(counter().with_name("custom").display_name(), "custom");
}

#[test]
fn send_hands_package_to_transport() {
	let template = counter();
	let mut transport = Recording::default();
	template.send(&mut transport).expect("delivery succeeds");

	assert_eq!(transport.delivered, vec![template.package().expect("packages")]);
}

#[test]
fn refused_send_leaves_template_usable() {
	let template = counter();
	let mut transport = Recording {
		refuse: true,
		..Recording::default()
	};
	let err = template.send(&mut transport).expect_err("refusal surfaces");
	assert_eq!(err.kind(), ErrorKind::Delivery);
	assert!(template.encode().is_ok());
}

#[test]
fn unbalanced_template_is_never_sent() {
	let mut template = counter();
	template.push(Bracket::close_norm());
	let mut transport = Recording::default();

	assert!(template.send(&mut transport).expect_err("unbalanced").is_structural());
	assert!(transport.delivered.is_empty());
}

#[test]
fn send_through_codeclient() {
	let server = MockCodeClient::silent();
	let mut client = CodeClient::connect(CodeClientConfig {
		url: server.url().to_owned(),
		ack_timeout: Duration::from_millis(100),
		..CodeClientConfig::default()
	})
	.expect("mock accepts connection");

	counter().send(&mut client).expect("silence is success");
	let frames = server.wait_for_frames(1);
	assert_eq!(frames.len(), 1);
	assert!(frames[0].starts_with("give {Count:1b,id:\"minecraft:ender_chest\""));
	assert!(frames[0].contains(&counter().encode().expect("encodes")));
}

#[test]
fn send_to_codeclient_gives_item_and_closes() {
	let server = MockCodeClient::silent();
	let config = CodeClientConfig {
		url: server.url().to_owned(),
		author: "builder".to_owned(),
		..CodeClientConfig::default()
	};

	counter().send_to_codeclient(&config).expect("silence is success");
	let frames = server.wait_for_frames(1);
	assert_eq!(frames.len(), 1);
	assert!(frames[0].contains("builder"));
	assert!(frames[0].contains(&counter().encode().expect("encodes")));
}

#[test]
fn send_to_unreachable_codeclient_is_a_delivery_error() {
	let template = counter();
	let before = template.clone();
	let config = CodeClientConfig {
		url: unreachable_url(),
		connect_timeout: Duration::from_millis(500),
		..CodeClientConfig::default()
	};

	let err = template.send_to_codeclient(&config).expect_err("nothing listens");
	assert!(matches!(err, TemplateError::Delivery(DeliveryError::Connect { .. })));
	assert_eq!(err.kind(), ErrorKind::Delivery);
	assert_eq!(template, before);
	assert_eq!(template.encode().expect("still encodes"), before.encode().expect("encodes"));
}

#[test]
fn unbalanced_template_never_connects() {
	let mut template = counter();
	template.push(Bracket::open_norm());
	let config = CodeClientConfig {
		url: unreachable_url(),
		..CodeClientConfig::default()
	};
	assert!(template.send_to_codeclient(&config).expect_err("unbalanced").is_structural());
}
