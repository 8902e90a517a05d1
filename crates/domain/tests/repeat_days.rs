use domain::RepeatDays;

#[test]
fn empty_list_is_stored_as_empty_text() {
    assert_eq!(RepeatDays::default().to_stored(), "");
}

#[test]
fn list_is_stored_as_json_array() {
    let days = RepeatDays::new(vec!["Mon".to_string(), "Wed".to_string()]);
    assert_eq!(days.to_stored(), r#"["Mon","Wed"]"#);
}

#[test]
fn stored_json_decodes_back_to_list() {
    let days = RepeatDays::from_stored(r#"["Sat","Sun"]"#);
    assert_eq!(days.as_slice(), ["Sat", "Sun"]);
}

#[test]
fn unset_or_malformed_text_decodes_to_empty() {
    assert!(RepeatDays::from_stored("").is_empty());
    assert!(RepeatDays::from_stored("   ").is_empty());
    assert!(RepeatDays::from_stored("Mon,Wed").is_empty());
    assert!(RepeatDays::from_stored(r#"{"day":"Mon"}"#).is_empty());
    assert!(RepeatDays::from_stored("[1, 2]").is_empty());
}
