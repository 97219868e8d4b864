use crate::action::RepairContext;
use crate::options::Options;
use crate::stage::{Stage, StageOutcome};
use crate::stages::ContentCleaning;

fn run(input: &str) -> (String, RepairContext) {
    let mut ctx = RepairContext::new(Options::default());
    let out = ContentCleaning.process(input.to_string(), &mut ctx).unwrap();
    match out {
        StageOutcome::Ok(s) | StageOutcome::Continue(s) => (s, ctx),
    }
}

#[test]
fn strips_markdown_fence_around_whole_input() {
    let (out, ctx) = run("```json\n{\"a\":1}```");
    assert_eq!(out, "{\"a\":1}");
    assert!(ctx.total_repairs() > 0);
}

#[test]
fn unwraps_html_container_tag() {
    let (out, _ctx) = run("<response>{\"a\":1}</response>");
    assert_eq!(out, "{\"a\":1}");
}

#[test]
fn strips_line_comments_outside_strings() {
    let (out, _ctx) = run("{\"a\":1 // trailing note\n}");
    assert_eq!(out, "{\"a\":1 \n}");
}

#[test]
fn strips_block_comments_outside_strings() {
    let (out, _ctx) = run("{/* lead */\"a\":1}");
    assert_eq!(out, "{\"a\":1}");
}

#[test]
fn strips_hash_comments_outside_strings() {
    let (out, _ctx) = run("{\"a\":1 # note\n}");
    assert_eq!(out, "{\"a\":1 \n}");
}

#[test]
fn does_not_strip_comment_markers_inside_strings() {
    let (out, ctx) = run("{\"url\":\"http://example.com\"}");
    assert_eq!(out, "{\"url\":\"http://example.com\"}");
    assert_eq!(ctx.total_repairs(), 0);
}

#[test]
fn trims_surrounding_prose() {
    let (out, ctx) = run("Here is the JSON: {\"a\":1} - hope that helps!");
    assert_eq!(out, "{\"a\":1}");
    assert!(ctx.total_repairs() > 0);
}

#[test]
fn leaves_well_formed_input_untouched() {
    let (out, ctx) = run("{\"a\":1}");
    assert_eq!(out, "{\"a\":1}");
    assert_eq!(ctx.total_repairs(), 0);
}
