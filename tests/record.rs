use localmr::testing::{identity_mapper, identity_reducer, map_str};
use localmr::{Harness, RecordCodec, RecordStream};

#[test]
fn decode_splits_on_the_field_delimiter() {
    let codec = RecordCodec::default();
    assert_eq!(codec.decode("a\tb\tc"), ["a", "b", "c"]);
    assert_eq!(codec.decode("a\tb\t"), ["a", "b", ""]);
    assert_eq!(codec.decode("plain"), ["plain"]);
    // An empty line is one empty field, never zero fields.
    assert_eq!(codec.decode(""), [""]);
}

#[test]
fn encode_joins_fields_and_appends_the_record_delimiter() -> anyhow::Result<()> {
    let codec = RecordCodec::default();
    let mut out = Vec::new();
    codec.encode_to(&mut out, &["a".to_string(), "b".to_string()])?;
    codec.encode_to(&mut out, &["c".to_string()])?;
    assert_eq!(String::from_utf8(out)?, "a\tb\nc\n");
    Ok(())
}

#[test]
fn fields_are_opaque_text() {
    // No trimming, no coercion.
    let codec = RecordCodec::default();
    assert_eq!(codec.decode(" a \t 1 "), [" a ", " 1 "]);
}

#[test]
#[should_panic(expected = "delimiters must be ASCII")]
fn non_ascii_delimiters_are_rejected() {
    let _ = RecordCodec::new('→', '\n');
}

#[test]
#[should_panic(expected = "field and record delimiters must differ")]
fn equal_delimiters_are_rejected() {
    let _ = RecordCodec::new('\t', '\t');
}

#[test]
fn stream_peek_does_not_consume() -> anyhow::Result<()> {
    let mut reader = "a\tb\nc".as_bytes();
    let mut stream = RecordStream::new(&mut reader, RecordCodec::default())?;

    assert_eq!(stream.peek().map(|r| r[0].as_str()), Some("a"));
    assert_eq!(stream.peek().map(|r| r[0].as_str()), Some("a"));

    assert_eq!(stream.next_record()?, Some(vec!["a".to_string(), "b".to_string()]));
    assert_eq!(stream.peek().map(|r| r[0].as_str()), Some("c"));
    assert_eq!(stream.next_record()?, Some(vec!["c".to_string()]));

    assert_eq!(stream.peek(), None);
    assert_eq!(stream.next_record()?, None);
    assert_eq!(stream.records_read(), 2);
    Ok(())
}

#[test]
fn trailing_record_delimiter_adds_no_empty_record() -> anyhow::Result<()> {
    let mut reader = "a\n".as_bytes();
    let mut stream = RecordStream::new(&mut reader, RecordCodec::default())?;
    assert_eq!(stream.next_record()?, Some(vec!["a".to_string()]));
    assert_eq!(stream.next_record()?, None);
    Ok(())
}

#[test]
fn blank_interior_line_is_a_single_empty_field() -> anyhow::Result<()> {
    let mut reader = "a\n\nb".as_bytes();
    let mut stream = RecordStream::new(&mut reader, RecordCodec::default())?;
    assert_eq!(stream.next_record()?, Some(vec!["a".to_string()]));
    assert_eq!(stream.next_record()?, Some(vec![String::new()]));
    assert_eq!(stream.next_record()?, Some(vec!["b".to_string()]));
    Ok(())
}

#[test]
fn carriage_returns_are_stripped_under_newline_framing() -> anyhow::Result<()> {
    let out = map_str("a\tb\r\nc\td\r\n", identity_mapper())?;
    assert_eq!(out, "a\tb\nc\td\n");
    Ok(())
}

#[test]
fn custom_delimiters_apply_to_both_sides() -> anyhow::Result<()> {
    let harness = Harness::with_delimiters(',', ';');

    let mut out = Vec::new();
    harness.map("a,b;c,d".as_bytes(), &mut out, identity_mapper())?;
    assert_eq!(String::from_utf8(out)?, "a,b;c,d;");

    // Tabs are ordinary field text under a comma codec.
    let mut out = Vec::new();
    harness.reduce("k,x\ty;k,2".as_bytes(), &mut out, identity_reducer())?;
    assert_eq!(String::from_utf8(out)?, "k,x\ty;k,2;");
    Ok(())
}

#[test]
fn invalid_utf8_input_fails_the_run() {
    let bytes: &[u8] = &[0xff, 0xfe, b'\n'];
    let mut out = Vec::new();
    let err = localmr::run_map(bytes, &mut out, identity_mapper()).unwrap_err();
    assert!(err.to_string().contains("not valid UTF-8"));
}
