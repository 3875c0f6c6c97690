use std::time::Duration;

use dftemplate_testkit::{MockCodeClient, unreachable_url};

use crate::df::{CodeClient, CodeClientConfig, DeliveryError, EncodedTemplate, PlaceMode, PlayerMode, Scope, Scopes, TemplateError};

fn config(url: &str) -> CodeClientConfig {
	CodeClientConfig {
		url: url.to_owned(),
		connect_timeout: Duration::from_secs(2),
		ack_timeout: Duration::from_millis(200),
		author: "tester".to_owned(),
	}
}

fn encoded(code: &str) -> EncodedTemplate {
	EncodedTemplate {
		name: "§bCode Template".to_owned(),
		code: code.to_owned(),
	}
}

#[test]
fn give_without_reply_counts_as_success() {
	let server = MockCodeClient::silent();
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	client.give("{Count:1b,id:\"minecraft:stone\"}").expect("silence is success");
	assert_eq!(server.wait_for_frames(1), vec!["give {Count:1b,id:\"minecraft:stone\"}".to_owned()]);
	client.close().expect("socket closes");
}

#[test]
fn refusal_reply_is_rejected() {
	let server = MockCodeClient::refusing("not creative mode");
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	let err = client.give_template(&encoded("H4sI")).expect_err("refusal surfaces");
	assert!(matches!(&err, DeliveryError::Rejected { message } if message == "not creative mode"));
}

#[test]
fn give_template_wraps_code_in_item() {
	let server = MockCodeClient::silent();
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	client.give_template(&encoded("H4sIAAAA")).expect("give succeeds");
	let frames = server.wait_for_frames(1);
	assert!(frames[0].starts_with("give {"), "unexpected frame {}", frames[0]);
	assert!(frames[0].contains("hypercube:codetemplatedata"));
	assert!(frames[0].contains("H4sIAAAA"));
	assert!(frames[0].contains("tester"));
}

#[test]
fn unreachable_endpoint_is_connect_error() {
	let err = CodeClient::connect(config(&unreachable_url())).err().expect("nothing listens there");
	assert!(matches!(err, DeliveryError::Connect { .. }), "got {err}");
}

#[test]
fn non_ws_urls_are_rejected() {
	let err = CodeClient::connect(config("http://localhost:31375")).err().expect("http is not a websocket url");
	assert!(matches!(err, DeliveryError::InvalidUrl { .. }));
}

#[test]
fn scoped_commands_fail_locally_without_grant() {
	let server = MockCodeClient::silent();
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	let err = client.place(&[encoded("abc")], PlaceMode::Compact).expect_err("write_code not granted");
	assert!(matches!(err, DeliveryError::MissingScope { scope: "write_code" }));
	assert!(matches!(client.clear_plot(), Err(DeliveryError::MissingScope { scope: "clear_plot" })));
	assert!(server.frames().is_empty(), "no frame should be sent for a missing scope");
}

#[test]
fn granted_scopes_unlock_place() {
	let server = MockCodeClient::with_responder(|frame| match frame {
		"scopes" => Some("default write_code movement".to_owned()),
		"mode" => Some("dev".to_owned()),
		_ => None,
	});
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	let scopes = client.query_scopes().expect("scopes reply arrives");
	assert!(scopes.contains(Scope::WriteCode));
	assert!(scopes.contains(Scope::Movement));
	assert!(!scopes.contains(Scope::ClearPlot));

	client.place(&[encoded("one"), encoded("two")], PlaceMode::Swap).expect("place succeeds");
	assert_eq!(client.mode().expect("mode reply arrives"), PlayerMode::Dev);

	let frames = server.wait_for_frames(6);
	assert_eq!(frames, vec!["scopes", "place swap", "place one", "place two", "place go", "mode"]);
}

#[test]
fn inventory_commands_need_inventory_scope() {
	let server = MockCodeClient::silent();
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	assert!(matches!(client.inventory(), Err(DeliveryError::MissingScope { scope: "inventory" })));
	let items = vec!["{id:\"minecraft:stone\",Count:1b}".to_owned()];
	assert!(matches!(client.set_inventory(&items), Err(DeliveryError::MissingScope { scope: "inventory" })));
	assert!(server.frames().is_empty());
}

#[test]
fn inventory_is_read_and_replaced() {
	let server = MockCodeClient::with_responder(|frame| match frame {
		"scopes" => Some("default inventory".to_owned()),
		"inv" => Some("[{Count:1b,id:\"minecraft:stone\"}]".to_owned()),
		_ => None,
	});
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");
	client.query_scopes().expect("scopes reply arrives");

	assert_eq!(client.inventory().expect("inventory reply arrives"), "[{Count:1b,id:\"minecraft:stone\"}]");
	let items = vec!["{Count:1b,id:\"minecraft:stone\"}".to_owned(), "{Count:2b,id:\"minecraft:dirt\"}".to_owned()];
	client.set_inventory(&items).expect("silence is success");

	assert_eq!(
		server.wait_for_frames(3),
		vec![
			"scopes".to_owned(),
			"inv".to_owned(),
			"setinv [{Count:1b,id:\"minecraft:stone\"},{Count:2b,id:\"minecraft:dirt\"}]".to_owned(),
		]
	);
}

#[test]
fn set_inventory_outside_creative_is_rejected() {
	let server = MockCodeClient::with_responder(|frame| match frame {
		"scopes" => Some("inventory".to_owned()),
		_ if frame.starts_with("setinv ") => Some("not creative mode".to_owned()),
		_ => None,
	});
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");
	client.query_scopes().expect("scopes reply arrives");

	let err = client.set_inventory(&[]).expect_err("refusal surfaces");
	assert!(matches!(err, DeliveryError::Rejected { ref message } if message == "not creative mode"));
	assert_eq!(server.wait_for_frames(2)[1], "setinv []");
}

#[test]
fn scope_request_is_granted_on_auth_reply() {
	let server = MockCodeClient::with_responder(|frame| frame.starts_with("scopes ").then(|| "auth".to_owned()));
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");

	let requested: Scopes = [Scope::Inventory, Scope::ClearPlot].into_iter().collect();
	assert!(client.request_scopes(requested, Duration::from_millis(500)).expect("request completes"));
	assert_eq!(client.granted(), requested);
	assert_eq!(server.wait_for_frames(1), vec!["scopes inventory clear_plot"]);
}

#[test]
fn unanswered_query_is_no_reply() {
	let server = MockCodeClient::silent();
	let mut client = CodeClient::connect(config(server.url())).expect("mock accepts connection");
	assert!(matches!(client.query_scopes(), Err(DeliveryError::NoReply { command: "scopes" })));
}

#[test]
fn scope_identifiers_parse() {
	assert_eq!("read_plot".parse::<Scope>().expect("scope parses"), Scope::ReadPlot);
	assert!(matches!("admin".parse::<Scope>(), Err(TemplateError::InvalidClientScope { .. })));
	assert_eq!(Scopes::from_reply("default inventory bogus").iter().collect::<Vec<_>>(), vec![Scope::Inventory]);
}
