use crate::df::{Bracket, BracketKind, BracketPair, CodeBlock, Entry, TemplateError, Value, match_brackets};

fn action() -> Entry {
	CodeBlock::player_action("SendMessage", Vec::<Value>::new()).expect("block builds").into()
}

#[test]
fn empty_sequence_has_no_pairs() {
	assert!(match_brackets(&[]).expect("empty input is balanced").is_empty());
}

#[test]
fn nested_regions_pair_innermost_first() {
	let entries = vec![
		Entry::from(Bracket::open_repeat()),
		Bracket::open_norm().into(),
		action(),
		Bracket::close_norm().into(),
		Bracket::close_repeat().into(),
	];
	let pairs = match_brackets(&entries).expect("nested brackets balance");
	assert_eq!(
		pairs,
		vec![
			BracketPair {
				open: 1,
				close: 3,
				kind: BracketKind::Norm,
			},
			BracketPair {
				open: 0,
				close: 4,
				kind: BracketKind::Repeat,
			},
		]
	);
}

#[test]
fn stray_close_reports_its_index() {
	let entries = vec![action(), Bracket::close_repeat().into()];
	let err = match_brackets(&entries).expect_err("stray close should fail");
	assert!(matches!(err, TemplateError::UnmatchedClose { index: 1, kind: BracketKind::Repeat }));
	assert!(err.is_structural());
}

#[test]
fn close_of_other_kind_does_not_match() {
	let entries = vec![Entry::from(Bracket::open_repeat()), Bracket::close_norm().into()];
	let err = match_brackets(&entries).expect_err("kinds must agree");
	assert!(matches!(err, TemplateError::UnmatchedClose { index: 1, kind: BracketKind::Norm }));
}

#[test]
fn first_unclosed_bracket_is_reported() {
	let entries = vec![
		Entry::from(Bracket::open_norm()),
		Bracket::open_repeat().into(),
		Bracket::open_repeat().into(),
		Bracket::close_repeat().into(),
	];
	let err = match_brackets(&entries).expect_err("unclosed brackets should fail");
	assert!(matches!(err, TemplateError::UnclosedBracket { index: 0, kind: BracketKind::Norm }));
}

#[test]
fn balanced_sequences_of_any_depth_succeed() {
	for depth in 0..8 {
		let mut entries = Vec::new();
		for level in 0..depth {
			entries.push(Entry::from(Bracket::new(true, level % 2 == 0)));
			entries.push(action());
		}
		for level in (0..depth).rev() {
			entries.push(Entry::from(Bracket::new(false, level % 2 == 0)));
		}
		assert_eq!(match_brackets(&entries).expect("balanced input succeeds").len(), depth);

		if depth > 0 {
			entries.pop();
			assert!(match_brackets(&entries).expect_err("dropping a close fails").is_structural());
		}
	}
}
