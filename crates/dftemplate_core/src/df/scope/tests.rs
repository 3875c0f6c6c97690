use crate::df::{ErrorKind, TemplateError, VariableScope};

#[test]
fn parses_wire_ids_and_aliases() {
	for scope in VariableScope::ALL {
		assert_eq!(scope.as_str().parse::<VariableScope>().expect("wire id parses"), scope);
	}
	assert_eq!("game".parse::<VariableScope>().expect("alias parses"), VariableScope::Game);
}

#[test]
fn rejects_unknown_scope() {
	let err = "global".parse::<VariableScope>().expect_err("unknown scope should fail");
	assert!(matches!(&err, TemplateError::InvalidScope { value } if value == "global"));
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
