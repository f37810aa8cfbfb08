//! Switching the process-wide language.
//!
//! Kept in its own test binary: the language is global state.

use nebula_validation::lang;
use nebula_validation::prelude::*;

#[test]
fn messages_follow_the_current_language() {
    lang::register_language(
        "fa",
        [
            ("validation_required_is_blank", "فیلد ضروری می باشد."),
            ("validation_match_invalid", "فرمت داده نامعتبر می باشد."),
        ],
    );
    lang::register_translation("en", "validation_match_invalid", "has an invalid format");

    assert_eq!(lang::language(), lang::DEFAULT_LANGUAGE);
    assert_eq!(
        validate(&"", &[&required()]).unwrap_err().to_string(),
        "cannot be blank"
    );

    lang::set_language("fa");
    assert_eq!(
        validate(&"", &[&required()]).unwrap_err().to_string(),
        "فیلد ضروری می باشد."
    );

    // missing in "fa", present in the default language
    lang::set_language("de");
    let pattern = matches(regex::Regex::new("^[0-9]+$").unwrap());
    assert_eq!(
        validate(&"abc", &[&pattern]).unwrap_err().to_string(),
        "has an invalid format"
    );

    // custom messages always win
    assert_eq!(
        validate(&"", &[&required().error("custom")]).unwrap_err().to_string(),
        "custom"
    );

    lang::set_language(lang::DEFAULT_LANGUAGE);
    assert_eq!(
        validate(&"", &[&required()]).unwrap_err().to_string(),
        "cannot be blank"
    );
}
