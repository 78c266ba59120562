use super::*;

fn eight() -> Vec<String> {
    ["a", "b", "c", "d", "e", "f", "g", "h"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

// =============================================================
// validate_goal
// =============================================================

#[test]
fn goal_accepts_ascii_alphanumerics() {
    assert_eq!(validate_goal("Run5k"), Ok("Run5k".into()));
}

#[test]
fn goal_accepts_japanese_scripts() {
    assert_eq!(validate_goal("毎日ジョギングする"), Ok("毎日ジョギングする".into()));
}

#[test]
fn goal_is_trimmed() {
    assert_eq!(validate_goal("  read10books \t"), Ok("read10books".into()));
}

#[test]
fn goal_blank_is_empty_error() {
    assert_eq!(validate_goal(""), Err(FieldError::Empty));
    assert_eq!(validate_goal("   "), Err(FieldError::Empty));
}

#[test]
fn goal_at_thirty_chars_passes() {
    let goal = "a".repeat(30);
    assert_eq!(validate_goal(&goal), Ok(goal.clone()));
}

#[test]
fn goal_over_thirty_chars_fails() {
    assert_eq!(validate_goal(&"a".repeat(31)), Err(FieldError::TooLong { len: 31 }));
}

#[test]
fn goal_length_counts_characters_not_bytes() {
    let goal = "目".repeat(30);
    assert!(goal.len() > 30);
    assert!(validate_goal(&goal).is_ok());
}

#[test]
fn goal_rejects_punctuation_and_emoji() {
    assert_eq!(validate_goal("run!"), Err(FieldError::InvalidCharacter { ch: '!' }));
    assert_eq!(validate_goal("run🏃"), Err(FieldError::InvalidCharacter { ch: '🏃' }));
}

#[test]
fn goal_rejects_inner_space() {
    assert_eq!(validate_goal("run far"), Err(FieldError::InvalidCharacter { ch: ' ' }));
}

#[test]
fn goal_rejects_full_width_letters() {
    assert_eq!(validate_goal("ＡＢＣ"), Err(FieldError::InvalidCharacter { ch: 'Ａ' }));
}

#[test]
fn allowed_char_range_edges() {
    assert!(is_allowed_char('\u{3040}'));
    assert!(is_allowed_char('\u{30FF}'));
    assert!(is_allowed_char('\u{4E00}'));
    assert!(is_allowed_char('\u{9FAF}'));
    assert!(!is_allowed_char('\u{9FB0}'));
    assert!(!is_allowed_char('\u{303F}'));
    assert!(!is_allowed_char('_'));
}

// =============================================================
// validate_goals
// =============================================================

#[test]
fn eight_valid_goals_pass() {
    let goals = validate_goals(&eight()).unwrap();
    assert_eq!(goals.as_slice(), eight().as_slice());
}

#[test]
fn valid_goals_are_returned_trimmed() {
    let mut input = eight();
    input[2] = "  c  ".into();
    let goals = validate_goals(&input).unwrap();
    assert_eq!(goals.as_slice()[2], "c");
}

#[test]
fn long_entry_fails_at_its_index() {
    let mut input = eight();
    input[5] = "x".repeat(31);
    let report = validate_goals(&input).unwrap_err();
    assert_eq!(report.field_error(5), Some(FieldError::TooLong { len: 31 }));
    assert_eq!(report.field_errors().len(), 1);
    assert!(report.count_error().is_none());
}

#[test]
fn seven_entries_fail_with_missing_count() {
    let mut input = eight();
    input[7] = String::new();
    let report = validate_goals(&input).unwrap_err();
    assert_eq!(report.count_error(), Some(CountError::Missing { found: 7 }));
    assert_eq!(report.field_error(7), Some(FieldError::Empty));
}

#[test]
fn short_list_reports_missing_without_field_errors() {
    let report = validate_goals(&["a", "b", "c", "d", "e", "f", "g"]).unwrap_err();
    assert_eq!(report.count_error(), Some(CountError::Missing { found: 7 }));
    assert!(report.field_errors().is_empty());
}

#[test]
fn nine_entries_fail_with_too_many() {
    let mut input = eight();
    input.push("i".into());
    let report = validate_goals(&input).unwrap_err();
    assert_eq!(report.count_error(), Some(CountError::TooMany { found: 9 }));
}

#[test]
fn disallowed_character_fails_with_charset_error() {
    let mut input = eight();
    input[0] = "go😀".into();
    let report = validate_goals(&input).unwrap_err();
    assert_eq!(report.field_error(0), Some(FieldError::InvalidCharacter { ch: '😀' }));
}

#[test]
fn empty_form_reports_every_field() {
    let report = validate_goals(&vec![String::new(); 8]).unwrap_err();
    assert_eq!(report.field_errors().len(), 8);
    assert_eq!(report.count_error(), Some(CountError::Missing { found: 0 }));
}

#[test]
fn report_display_lists_count_then_fields() {
    let mut input = eight();
    input[1] = String::new();
    let report = validate_goals(&input).unwrap_err();
    assert_eq!(report.to_string(), "enter 8 goals (7 given); goal 2: enter a goal");
}
