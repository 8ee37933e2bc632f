use crate::{FormField, SignInForm, SignUpForm};

use googletest::prelude::*;

// =========================================================================
// Sign-in form
// =========================================================================

#[test]
fn given_valid_credentials_when_validate_sign_in_then_no_errors() {
    let form = SignInForm::new("owner@pg.example.com", "x");

    let errors = form.validate();

    assert_that!(errors.is_empty(), eq(true));
}

#[test]
fn given_bad_email_when_validate_sign_in_then_email_invalid() {
    // Given
    let form = SignInForm::new("bad", "x");

    // When
    let errors = form.validate();

    // Then
    assert_that!(errors.get(FormField::Email), some(eq("Email is invalid")));
    assert_that!(errors.get(FormField::Password), none());
    assert_that!(errors.len(), eq(1));
}

#[test]
fn given_blank_email_when_validate_sign_in_then_email_required() {
    let form = SignInForm::new("   ", "secret");

    let errors = form.validate();

    assert_that!(errors.get(FormField::Email), some(eq("Email is required")));
}

#[test]
fn given_empty_password_when_validate_sign_in_then_password_required() {
    let form = SignInForm::new("a@b.com", "");

    let errors = form.validate();

    assert_that!(
        errors.get(FormField::Password),
        some(eq("Password is required"))
    );
}

#[test]
fn given_short_password_when_validate_sign_in_then_accepted() {
    let form = SignInForm::new("a@b.com", "abc");

    let errors = form.validate();

    assert_that!(errors.is_empty(), eq(true));
}

#[test]
fn given_malformed_emails_when_validate_then_each_rejected() {
    let malformed = [
        "plainaddress",
        "missing-at.example.com",
        "user@nodot",
        "user@",
        "@example.com",
        "a@.com",
    ];

    for email in malformed {
        let errors = SignInForm::new(email, "secret").validate();
        assert_that!(
            errors.get(FormField::Email),
            some(eq("Email is invalid")),
            "email {email:?} should be rejected"
        );
    }
}

#[test]
fn given_email_with_surrounding_text_when_validate_then_accepted() {
    // The pattern is not anchored
    let errors = SignInForm::new("contact: a@b.com", "secret").validate();

    assert_that!(errors.get(FormField::Email), none());
}

// =========================================================================
// Sign-up form
// =========================================================================

#[test]
fn given_complete_form_without_phone_when_validate_sign_up_then_no_errors() {
    let form = SignUpForm::new("Jane Doe", "a@b.com", "secret1", "");

    let errors = form.validate();

    assert_that!(errors.is_empty(), eq(true));
}

#[test]
fn given_short_passwords_when_validate_sign_up_then_password_too_short() {
    for password in ["a", "ab", "abc", "abcd", "abcde"] {
        let errors = SignUpForm::new("Jane", "a@b.com", password, "").validate();
        assert_that!(
            errors.get(FormField::Password),
            some(eq("Password must be at least 6 characters"))
        );

        let sign_in = SignInForm::new("a@b.com", password).validate();
        assert_that!(sign_in.get(FormField::Password), none());
    }
}

#[test]
fn given_six_char_password_when_validate_sign_up_then_accepted() {
    let errors = SignUpForm::new("Jane", "a@b.com", "abcdef", "").validate();

    assert_that!(errors.get(FormField::Password), none());
}

#[test]
fn given_astral_plane_characters_when_validate_sign_up_then_counted_as_utf16_units() {
    // Each emoji is two UTF-16 code units.
    let accepted = SignUpForm::new("Jane", "a@b.com", "\u{1F600}\u{1F600}\u{1F600}", "").validate();
    let rejected = SignUpForm::new("Jane", "a@b.com", "\u{1F600}\u{1F600}a", "").validate();

    assert_that!(accepted.get(FormField::Password), none());
    assert_that!(
        rejected.get(FormField::Password),
        some(eq("Password must be at least 6 characters"))
    );
}

#[test]
fn given_empty_password_when_validate_sign_up_then_required_not_length() {
    let errors = SignUpForm::new("Jane", "a@b.com", "", "").validate();

    assert_that!(
        errors.get(FormField::Password),
        some(eq("Password is required"))
    );
}

#[test]
fn given_whitespace_name_when_validate_sign_up_then_name_required() {
    let errors = SignUpForm::new("   ", "a@b.com", "secret1", "").validate();

    assert_that!(errors.get(FormField::Name), some(eq("Name is required")));
}

#[test]
fn given_formatted_phone_numbers_when_validate_sign_up_then_accepted() {
    for phone in ["+91 98765 43210", "(555) 123-4567", "5551234567", "+1-800-555-0199"] {
        let errors = SignUpForm::new("Jane", "a@b.com", "secret1", phone).validate();
        assert_that!(
            errors.get(FormField::PhoneNumber),
            none(),
            "phone {phone:?} should be accepted"
        );
    }
}

#[test]
fn given_phone_with_letters_when_validate_sign_up_then_phone_invalid() {
    for phone in ["555-CALL-NOW", "++123", "12+34", "phone"] {
        let errors = SignUpForm::new("Jane", "a@b.com", "secret1", phone).validate();
        assert_that!(
            errors.get(FormField::PhoneNumber),
            some(eq("Phone number is invalid")),
            "phone {phone:?} should be rejected"
        );
    }
}

#[test]
fn given_everything_wrong_when_validate_sign_up_then_all_fields_reported() {
    let errors = SignUpForm::new("", "nope", "123", "abc").validate();

    let fields: Vec<FormField> = errors.iter().map(|(field, _)| *field).collect();
    assert_that!(
        fields,
        elements_are![
            eq(&FormField::Name),
            eq(&FormField::Email),
            eq(&FormField::PhoneNumber),
            eq(&FormField::Password)
        ]
    );
}

#[test]
fn given_reported_field_when_cleared_then_form_errors_empty() {
    let mut errors = SignInForm::new("bad", "x").validate();

    errors.clear(FormField::Email);

    assert_that!(errors.is_empty(), eq(true));
}
