use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::GzDecoder;

use super::encode_records;
use crate::df::{BlockRecord, EncodeOptions, ErrorKind, TemplateError, TemplateRecord, decode_records};

#[test]
fn empty_record_list_encodes_to_empty_program() {
	let code = encode_records(&TemplateRecord::default(), &EncodeOptions::default()).expect("empty template encodes");
	let compressed = STANDARD.decode(&code).expect("output is standard base64");

	let mut json = String::new();
	GzDecoder::new(&compressed[..]).read_to_string(&mut json).expect("output is gzip");
	assert_eq!(json, r#"{"blocks":[]}"#);
}

#[test]
fn gzip_header_has_no_timestamp() {
	let code = encode_records(&TemplateRecord::default(), &EncodeOptions::default()).expect("template encodes");
	let compressed = STANDARD.decode(&code).expect("output is standard base64");
	assert_eq!(&compressed[..3], &[0x1f, 0x8b, 0x08]);
	assert_eq!(&compressed[4..8], &[0, 0, 0, 0], "mtime must be zero");
}

#[test]
fn decode_reverses_encode() {
	let record: TemplateRecord = serde_json::from_str(
		r#"{"blocks":[
			{"id":"block","block":"event","action":"Join","args":{"items":[]}},
			{"id":"bracket","direct":"open","type":"norm"},
			{"id":"bracket","direct":"close","type":"norm"}
		]}"#,
	)
	.expect("fixture parses");

	let code = encode_records(&record, &EncodeOptions::default()).expect("records encode");
	assert_eq!(decode_records(&code).expect("code decodes"), record);
	assert!(matches!(record.blocks[1], BlockRecord::Bracket(_)));
}

#[test]
fn oversized_output_is_rejected() {
	let options = EncodeOptions {
		max_len: 8,
		..EncodeOptions::default()
	};
	let err = encode_records(&TemplateRecord::default(), &options).expect_err("limit of 8 chars is too small");
	assert!(matches!(err, TemplateError::TooLarge { max: 8, .. }));
	assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn invalid_base64_is_an_encoding_error() {
	let err = decode_records("not base64!").expect_err("garbage should fail");
	assert!(matches!(err, TemplateError::Base64(_)));
}
