use crate::{repair, Options};

fn repaired_json(input: &str, opts: &Options) -> (String, usize) {
    let outcome = repair(input.as_bytes(), opts).unwrap();
    (
        serde_json::to_string(&outcome.value).unwrap(),
        outcome.actions.map(|a| a.len()).unwrap_or(0),
    )
}

#[test]
fn python_style_legacy_literals() {
    let mut opts = Options::default();
    opts.logging = true;
    let input = r#"{'users': [{'name': 'Alice', 'active': True, 'metadata': None}], 'success': True}"#;
    let (out, action_count) = repaired_json(input, &opts);
    assert_eq!(
        out,
        r#"{"users":[{"name":"Alice","active":true,"metadata":null}],"success":true}"#
    );
    assert!(action_count > 0);
}

#[test]
fn llm_output_with_markdown_fence() {
    let mut opts = Options::default();
    opts.logging = true;
    let input = "Here's your data:\n```json\n{name: \"Alice\", age: 30}\n```";
    let outcome = repair(input.as_bytes(), &opts).unwrap();
    assert_eq!(
        serde_json::to_string(&outcome.value).unwrap(),
        r#"{"name":"Alice","age":30}"#
    );
    let actions = outcome.actions.unwrap();
    assert!(actions.iter().any(|a| a.stage == crate::action::Stage::ContentCleaning));
    assert!(actions.iter().any(|a| a.stage == crate::action::Stage::SyntaxNormalization));
}

#[test]
fn truncated_stream_gets_closing_delimiters() {
    let opts = Options::default();
    let (out, _) = repaired_json(r#"{"status":"processing","data":[1,2,3"#, &opts);
    assert_eq!(out, r#"{"status":"processing","data":[1,2,3]}"#);
}

#[test]
fn concatenated_objects_are_aggregated_into_an_array() {
    let opts = Options::default();
    let (out, _) = repaired_json(r#"{"a":1}{"b":2}"#, &opts);
    assert_eq!(out, r#"[{"a":1},{"b":2}]"#);
}

#[test]
fn string_content_is_never_a_repair_target() {
    let mut opts = Options::default();
    opts.logging = true;
    let input = r#"{"message":"Set active to True, use None"}"#;
    let (out, action_count) = repaired_json(input, &opts);
    assert_eq!(out, input);
    assert_eq!(action_count, 0);
}

#[test]
fn trailing_comma_only() {
    let mut opts = Options::default();
    opts.logging = true;
    let (out, action_count) = repaired_json("[1,2,3,]", &opts);
    assert_eq!(out, "[1,2,3]");
    assert_eq!(action_count, 1);
}
