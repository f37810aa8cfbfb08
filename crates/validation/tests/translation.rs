//! Translating error sets into documents.

use std::collections::HashMap;

use mockall::mock;
use mockall::predicate::eq;
use nebula_validation::lang::{self, LanguageTranslator};
use nebula_validation::prelude::*;
use nebula_validation::{TranslationError, Translator};
use pretty_assertions::assert_eq;
use serde_json::json;

mock! {
    pub Locale {}

    impl Translator for Locale {
        fn translate_field(
            &self,
            field: &str,
            error: &ValidationError,
        ) -> Result<String, TranslationError>;

        fn translate_single(&self, error: &ValidationError) -> Result<String, TranslationError>;
    }
}

fn errors() -> ValidationErrors {
    ValidationErrors::new()
        .with("b", ValidationError::new("too_short", "too short"))
        .with(
            "a",
            ValidationErrors::new().with("inner", ValidationError::new("blank", "cannot be blank")),
        )
}

#[test]
fn translator_sees_every_leaf_with_its_field() {
    let mut locale = MockLocale::new();
    locale
        .expect_translate_field()
        .with(eq("inner"), mockall::predicate::always())
        .times(1)
        .returning(|_, error| Ok(format!("[{}]", error.code())));
    locale
        .expect_translate_field()
        .with(eq("b"), mockall::predicate::always())
        .times(1)
        .returning(|_, error| Ok(error.message().to_uppercase()));

    let document = errors().translate(&locale).unwrap();
    assert_eq!(
        serde_json::Value::Object(document),
        json!({ "a": { "inner": "[blank]" }, "b": "TOO SHORT" })
    );
}

#[test]
fn first_translation_failure_aborts() {
    let mut locale = MockLocale::new();
    locale
        .expect_translate_field()
        .times(1)
        .returning(|_, _| Err(TranslationError::new("no translation")));

    let err = errors().translate(&locale).unwrap_err();
    assert_eq!(err.message(), "no translation");
}

#[test]
fn single_errors_translate_through_the_translator() {
    let mut locale = MockLocale::new();
    locale
        .expect_translate_single()
        .times(1)
        .returning(|_| Ok("ungültig".to_owned()));

    let error = ValidationError::new("invalid", "is invalid");
    assert_eq!(error.translate(&locale).unwrap(), "ungültig");
}

#[test]
fn language_translator_uses_codes_and_params() {
    lang::register_language(
        "xx-translation-test",
        [
            ("validation_required_is_blank", "must be filled in"),
            ("length_between", "needs {min} to {max} characters"),
        ],
    );

    let data = HashMap::from([("name", ""), ("code", "abcdefgh")]);
    let size = length(2, 4);
    let err = validate_map(
        &data,
        [key("name", &[&required()]), key("code", &[&size])],
    )
    .unwrap_err();
    let errors = err.as_nested().unwrap();

    let document = errors
        .translate(&LanguageTranslator::new("xx-translation-test"))
        .unwrap();
    insta::assert_json_snapshot!(serde_json::Value::Object(document), @r#"
    {
      "code": "needs 2 to 4 characters",
      "name": "must be filled in"
    }
    "#);

    // rendering outside translation still uses the current language
    assert_eq!(err.to_string(), "code: the length must be between 2 and 4; name: cannot be blank.");
}

#[test]
fn unknown_language_fails_translation() {
    let errors = errors();
    let err = errors
        .translate(&LanguageTranslator::new("xx-never-registered"))
        .unwrap_err();
    assert!(err.message().contains("xx-never-registered"));
    assert!(errors.translate(&LanguageTranslator::new(lang::DEFAULT_LANGUAGE)).is_ok());
}
