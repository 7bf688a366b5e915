use std::cmp::Ordering;

use super::{
    ContextSize, DiffOptions, Differ, Opcode, OptionsError, OptionsPatch, Tag, slice_by_index,
    split_lines,
};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn fruit_lists_form_a_single_hunk() {
    let differ = Differ::new(
        lines(&["apples", "oranges", "kiwis", "carrots"]),
        lines(&["apples", "kiwis", "carrots", "grapefruits"]),
        DiffOptions::default(),
    );

    assert_eq!(
        differ.grouped_opcodes(),
        &[vec![
            Opcode::new(Tag::Equal, 0, 1, 0, 1),
            Opcode::new(Tag::Delete, 1, 2, 1, 1),
            Opcode::new(Tag::Equal, 2, 4, 1, 3),
            Opcode::new(Tag::Insert, 4, 4, 3, 4),
        ]]
    );
}

#[test]
fn identical_sequences_have_no_hunks_by_default() {
    let same = lines(&["a", "b", "c"]);
    let differ = Differ::new(same.clone(), same, DiffOptions::default());

    assert!(differ.is_identical());
    assert!(differ.grouped_opcodes().is_empty());
    assert_eq!(differ.ratio(), 1.0);
}

#[test]
fn full_context_if_identical_emits_whole_range() {
    let same = lines(&["a", "b", "c"]);
    let options = DiffOptions::default().with_full_context_if_identical(true);
    let differ = Differ::new(same.clone(), same, options);

    assert_eq!(
        differ.grouped_opcodes(),
        &[vec![Opcode::new(Tag::Equal, 0, 3, 0, 3)]]
    );
    assert_eq!(
        differ.grouped_opcodes_gnu().hunks,
        vec![vec![Opcode::new(Tag::Equal, 0, 3, 0, 3)]]
    );
}

#[test]
fn empty_old_side_is_an_insert() {
    let differ = Differ::new(Vec::new(), lines(&["a"]), DiffOptions::default());

    assert_eq!(
        differ.grouped_opcodes(),
        &[vec![Opcode::new(Tag::Insert, 0, 0, 0, 1)]]
    );
    assert_eq!(differ.old_new_comparison(), Ordering::Less);
}

#[test]
fn ignore_case_option_reaches_the_matcher() {
    let mut differ = Differ::new(lines(&["Foo"]), lines(&["foo"]), DiffOptions::default());
    assert_eq!(differ.grouped_opcodes().len(), 1);

    differ.set_options(DiffOptions::default().with_ignore_case(true));
    assert!(differ.grouped_opcodes().is_empty());
    assert_eq!(differ.ratio(), 1.0);
    // raw comparison still sees the difference
    assert_ne!(differ.old_new_comparison(), Ordering::Equal);
}

#[test]
fn missing_terminator_is_only_reported_by_gnu_grouping() {
    let differ = Differ::from_text("a\nb\nc", "a\nb\nc\n", DiffOptions::default());

    let plain = differ.grouped_opcodes();
    assert_eq!(
        plain,
        &[vec![
            Opcode::new(Tag::Equal, 0, 3, 0, 3),
            Opcode::new(Tag::Insert, 3, 3, 3, 4),
        ]]
    );

    let gnu = differ.grouped_opcodes_gnu();
    assert_eq!(
        gnu.hunks,
        vec![vec![
            Opcode::new(Tag::Equal, 0, 3, 0, 3),
            Opcode::new(Tag::Insert, 3, 3, 3, 4),
        ]]
    );
    assert_eq!(gnu.old_no_eol_at_eof, Some(3));
    assert_eq!(gnu.new_no_eol_at_eof, None);
}

#[test]
fn gnu_grouping_never_leaks_helper_lines() {
    let differ = Differ::from_text("x\ny\n", "x\nz", DiffOptions::default());
    let gnu = differ.grouped_opcodes_gnu();

    for op in gnu.hunks.iter().flatten() {
        assert!(op.i2 <= differ.old_lines().len());
        assert!(op.j2 <= differ.new_lines().len());
        assert!(op.i1 < op.i2 || op.j1 < op.j2);
    }
    assert_eq!(gnu.old_no_eol_at_eof, None);
    assert_eq!(gnu.new_no_eol_at_eof, Some(2));
}

#[test]
fn setters_only_invalidate_on_value_change() {
    let mut differ = Differ::new(lines(&["a"]), lines(&["b"]), DiffOptions::default());
    let first = differ.grouped_opcodes().to_vec();
    assert_eq!(differ.generation(), 0);

    differ.set_old(lines(&["a"]));
    differ.set_new(lines(&["b"]));
    differ.set_options(DiffOptions::default());
    assert_eq!(differ.generation(), 0);
    assert_eq!(differ.grouped_opcodes(), first.as_slice());

    differ.set_new(lines(&["a"]));
    assert_eq!(differ.generation(), 1);
    assert!(differ.grouped_opcodes().is_empty());
}

#[test]
fn reverting_options_restores_original_result() {
    let old = lines(&["Alpha", "beta", "gamma"]);
    let new = lines(&["alpha", "beta", "delta"]);
    let mut differ = Differ::new(old, new, DiffOptions::default());
    let original = differ.grouped_opcodes().to_vec();

    differ.set_options(DiffOptions::default().with_ignore_case(true));
    let folded = differ.grouped_opcodes().to_vec();
    assert_ne!(original, folded);

    differ.set_options(DiffOptions::default());
    assert_eq!(differ.grouped_opcodes(), original.as_slice());
}

#[test]
fn merge_options_only_overrides_present_fields() {
    let mut differ = Differ::new(
        lines(&["a"]),
        lines(&["b"]),
        DiffOptions::default().with_ignore_whitespace(true),
    );

    differ.merge_options(&OptionsPatch {
        context: Some(ContextSize::Lines(1)),
        ..OptionsPatch::default()
    });

    assert_eq!(differ.options().context, ContextSize::Lines(1));
    assert!(differ.options().ignore_whitespace);
    assert!(!differ.options().ignore_case);
    assert_eq!(differ.generation(), 1);

    differ.merge_options(&OptionsPatch::default());
    assert_eq!(differ.generation(), 1);
}

#[test]
fn context_option_controls_hunk_split() {
    let old = (0..20).map(|idx| format!("l{idx}")).collect::<Vec<_>>();
    let mut new = old.clone();
    new[1] = "x1".to_string();
    new[18] = "x18".to_string();
    let mut differ = Differ::new(old, new, DiffOptions::default());

    assert_eq!(differ.grouped_opcodes().len(), 2);

    differ.set_options(DiffOptions::default().with_context(ContextSize::All));
    assert_eq!(differ.grouped_opcodes().len(), 1);
    assert_eq!(differ.grouped_opcodes()[0][0], Opcode::new(Tag::Equal, 0, 1, 0, 1));
}

#[test]
fn zero_context_plain_and_gnu_groupings_agree() {
    let options = DiffOptions::default().with_context(ContextSize::Lines(0));
    let differ = Differ::new(lines(&["a", "b", "c"]), lines(&["a", "x", "c"]), options);

    assert_eq!(
        differ.grouped_opcodes(),
        &[vec![Opcode::new(Tag::Replace, 1, 2, 1, 2)]]
    );
    assert_eq!(differ.grouped_opcodes_gnu().hunks, differ.grouped_opcodes());
}

#[test]
fn ranges_accept_negative_and_out_of_bounds_indices() {
    let differ = Differ::new(
        lines(&["a", "b", "c", "d"]),
        lines(&["x"]),
        DiffOptions::default(),
    );

    assert_eq!(differ.old_range(0, None), differ.old_lines());
    assert_eq!(differ.old_range(-1, None), &lines(&["d"])[..]);
    assert_eq!(differ.old_range(1, Some(-1)), &lines(&["b", "c"])[..]);
    assert_eq!(differ.old_range(-10, Some(2)), &lines(&["a", "b"])[..]);
    assert!(differ.old_range(3, Some(1)).is_empty());
    assert!(differ.new_range(5, None).is_empty());

    assert_eq!(slice_by_index(&[1, 2, 3], -2, Some(100)), &[2, 3]);
}

#[test]
fn statistics_count_changed_lines() {
    let differ = Differ::new(
        lines(&["a", "b", "c", "d"]),
        lines(&["a", "x", "y", "d", "e"]),
        DiffOptions::default(),
    );

    let stats = differ.statistics();
    assert_eq!(stats.inserted, 3);
    assert_eq!(stats.deleted, 2);
    assert_eq!(stats.unmodified, 2);
    assert_eq!(stats.changed_ratio, 0.5);

    let empty = Differ::new(Vec::new(), Vec::new(), DiffOptions::default());
    assert_eq!(empty.statistics().changed_ratio, 0.0);
}

#[test]
fn split_lines_keeps_trailing_empty_token() {
    assert_eq!(split_lines("a\nb\n"), lines(&["a", "b", ""]));
    assert_eq!(split_lines("a\r\nb"), lines(&["a\r", "b"]));
    assert_eq!(split_lines(""), lines(&[""]));
}

#[test]
fn options_parse_from_json_with_defaults() {
    let options = DiffOptions::from_json(r#"{"context": "all", "ignore_case": true}"#)
        .expect("valid options");
    assert_eq!(options.context, ContextSize::All);
    assert!(options.ignore_case);
    assert!(!options.ignore_whitespace);

    let defaults = DiffOptions::from_json("{}").expect("empty document");
    assert_eq!(defaults, DiffOptions::default());
}

#[test]
fn invalid_options_are_rejected_at_the_boundary() {
    assert!(matches!(
        DiffOptions::from_json(r#"{"context": -1}"#),
        Err(OptionsError::Document(_))
    ));
    assert!(matches!(
        DiffOptions::from_json(r#"{"ignore_case": "yes"}"#),
        Err(OptionsError::Document(_))
    ));
    assert!(matches!(
        DiffOptions::from_json(r#"{"ignoreCase": true}"#),
        Err(OptionsError::Document(_))
    ));
    assert!(matches!(
        DiffOptions::default().with_context_str("-2"),
        Err(OptionsError::Context(_))
    ));
    assert!(OptionsPatch::from_json(r#"{"context": "most"}"#).is_err());

    let patch = OptionsPatch::from_json(r#"{"context": 5}"#).expect("valid patch");
    assert_eq!(patch.context, Some(ContextSize::Lines(5)));
    assert!(!patch.is_empty());
}
