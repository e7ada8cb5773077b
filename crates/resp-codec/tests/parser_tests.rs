//! Integration tests for the buffer-mode decoder

use resp_codec::DecodeConfig;
use resp_codec::ParseError;
use resp_codec::RespValue;
use rstest::rstest;

fn fixtures() -> Vec<(&'static str, RespValue)> {
	vec![
		("+OK\r\n", RespValue::simple_string("OK")),
		("+中文\r\n", RespValue::simple_string("中文")),
		("+\r\n", RespValue::simple_string("")),
		("-Error message\r\n", RespValue::error("Error message")),
		(":1000\r\n", RespValue::integer(1000)),
		(
			":1456061893587000000\r\n",
			RespValue::integer(1456061893587000000),
		),
		(":-1\r\n", RespValue::integer(-1)),
		("$6\r\nfoobar\r\n", RespValue::bulk_string("foobar")),
		("$6\r\n中文\r\n", RespValue::bulk_string("中文")),
		("$0\r\n\r\n", RespValue::bulk_string("")),
		("$-1\r\n", RespValue::null()),
		(
			"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n",
			RespValue::array(vec![
				RespValue::bulk_string("foo"),
				RespValue::bulk_string("bar"),
			]),
		),
		(
			"*3\r\n:1\r\n:2\r\n:3\r\n",
			RespValue::array(vec![
				RespValue::integer(1),
				RespValue::integer(2),
				RespValue::integer(3),
			]),
		),
		(
			"*2\r\n*3\r\n:1\r\n:2\r\n:3\r\n*2\r\n+Foo\r\n-Bar\r\n",
			RespValue::array(vec![
				RespValue::array(vec![
					RespValue::integer(1),
					RespValue::integer(2),
					RespValue::integer(3),
				]),
				RespValue::array(vec![
					RespValue::simple_string("Foo"),
					RespValue::error("Bar"),
				]),
			]),
		),
		(
			"*3\r\n$3\r\nfoo\r\n$-1\r\n$3\r\nbar\r\n",
			RespValue::array(vec![
				RespValue::bulk_string("foo"),
				RespValue::null(),
				RespValue::bulk_string("bar"),
			]),
		),
		("*0\r\n", RespValue::array(vec![])),
		("*-1\r\n", RespValue::null_array()),
	]
}

#[test]
fn test_single_decode() {
	for (input, expected) in fixtures() {
		let (consumed, value) = resp_codec::parse(input.as_bytes()).unwrap();
		assert_eq!(value, expected, "case {:?}", input);
		assert_eq!(consumed, input.len());
	}
}

#[test]
fn test_multiple_decode_from_one_buffer() {
	let cases = fixtures();
	let joined: Vec<u8> = cases.iter().flat_map(|(input, _)| input.bytes()).collect();

	let mut pos = 0;
	for (_, expected) in &cases {
		let (consumed, value) = resp_codec::parse(&joined[pos..]).unwrap();
		assert_eq!(&value, expected);
		pos += consumed;
	}
	assert_eq!(pos, joined.len());

	let all = resp_codec::decode_all(&joined).unwrap();
	assert_eq!(all.len(), cases.len());
}

#[test]
fn test_null_states_distinguishable() {
	let null = resp_codec::decode(b"$-1\r\n").unwrap();
	let null_array = resp_codec::decode(b"*-1\r\n").unwrap();
	let empty_array = resp_codec::decode(b"*0\r\n").unwrap();

	assert_eq!(null, RespValue::BulkString(None));
	assert_eq!(null_array, RespValue::Array(None));
	assert_eq!(empty_array, RespValue::Array(Some(vec![])));
	assert_ne!(null_array, empty_array);
}

#[rstest]
#[case(b"", ParseError::TooShort(0))]
#[case(b"!0\r\n", ParseError::UnknownType('!'))]
#[case(b":x\r\n", ParseError::MalformedInteger("x".to_string()))]
#[case(b":99999999999999999999\r\n", ParseError::MalformedInteger("99999999999999999999".to_string()))]
#[case(b"$x\r\nfoobar\r\n", ParseError::MalformedLength("x".to_string()))]
#[case(b"$6\r\nfoo\r\n", ParseError::Truncated)]
#[case(b"*x\r\n:1\r\n:2\r\n", ParseError::MalformedLength("x".to_string()))]
#[case(b"*2\r\n:1\r\n", ParseError::Truncated)]
#[case(b"*2\r\n:1\r\n!\r\n", ParseError::UnknownType('!'))]
fn test_decode_errors(#[case] input: &[u8], #[case] expected: ParseError) {
	assert_eq!(resp_codec::decode(input).unwrap_err(), expected);
}

#[test]
fn test_bulk_string_at_configured_bound() {
	let config = DecodeConfig::default().with_max_bulk_len(8);

	let at_bound = b"$8\r\n12345678\r\n";
	assert_eq!(
		resp_codec::decode_with_config(at_bound, &config).unwrap(),
		RespValue::bulk_string("12345678")
	);

	let over_bound = b"$9\r\n123456789\r\n";
	assert_eq!(
		resp_codec::decode_with_config(over_bound, &config).unwrap_err(),
		ParseError::LengthOutOfBounds(9)
	);
}

#[test]
fn test_default_bulk_bound() {
	let over = format!("${}\r\n", resp_codec::MAX_BULK_LEN + 1);
	assert_eq!(
		resp_codec::decode(over.as_bytes()).unwrap_err(),
		ParseError::LengthOutOfBounds(resp_codec::MAX_BULK_LEN as i64 + 1)
	);
}
