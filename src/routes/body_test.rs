use super::*;

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct Sample {
    #[serde(deserialize_with = "lenient_str")]
    name: Option<String>,
    #[serde(rename = "listId", deserialize_with = "lenient_str")]
    list_id: Option<String>,
    extra: Option<Value>,
}

#[test]
fn well_formed_body_decodes() {
    let body: Sample = decode_lenient(br#"{"name":"Buy milk","listId":"L1","extra":true}"#);
    assert_eq!(
        body,
        Sample { name: Some("Buy milk".into()), list_id: Some("L1".into()), extra: Some(Value::Bool(true)) }
    );
}

#[test]
fn empty_or_garbage_body_is_default() {
    assert_eq!(decode_lenient::<Sample>(b""), Sample::default());
    assert_eq!(decode_lenient::<Sample>(b"{not json"), Sample::default());
    assert_eq!(decode_lenient::<Sample>(b"[1,2]"), Sample::default());
}

#[test]
fn wrong_field_type_reads_as_absent() {
    let body: Sample = decode_lenient(br#"{"name":42,"listId":"L1"}"#);
    assert_eq!(body.name, None);
    assert_eq!(body.list_id.as_deref(), Some("L1"));

    let body: Sample = decode_lenient(br#"{"name":null}"#);
    assert_eq!(body.name, None);
}
