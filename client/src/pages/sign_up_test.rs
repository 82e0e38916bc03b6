use super::*;

#[test]
fn password_field_is_plain_while_empty() {
    assert_eq!(password_input_class(&SignUpDraft::default()), "sign-up-form__password");
}

#[test]
fn password_field_flags_rejected_input() {
    let mut draft = SignUpDraft::default();
    draft.set_password("Abc!23".to_owned());
    assert!(password_input_class(&draft).ends_with(" invalid"));
}

#[test]
fn password_field_clears_flag_once_accepted() {
    let mut draft = SignUpDraft::default();
    draft.set_password("Abc!23".to_owned());
    draft.set_password("Abcdefg!".to_owned());
    assert_eq!(password_input_class(&draft), "sign-up-form__password");
}
