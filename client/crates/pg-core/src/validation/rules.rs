use crate::{FormErrors, FormField};

use std::sync::LazyLock;

use regex::Regex;

pub(crate) const MIN_SIGN_UP_PASSWORD_LENGTH: usize = 6;

pub(crate) const EMAIL_REQUIRED: &str = "Email is required";
pub(crate) const EMAIL_INVALID: &str = "Email is invalid";
pub(crate) const PASSWORD_REQUIRED: &str = "Password is required";
pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub(crate) const NAME_REQUIRED: &str = "Name is required";
pub(crate) const PHONE_INVALID: &str = "Phone number is invalid";

// Unanchored: anything containing `x@y.z` passes.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s()\-]+$").expect("phone pattern compiles"));

pub(crate) fn check_email(email: &str, errors: &mut FormErrors) {
    if email.trim().is_empty() {
        errors.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }
}

pub(crate) fn check_password_present(password: &str, errors: &mut FormErrors) -> bool {
    if password.is_empty() {
        errors.insert(FormField::Password, PASSWORD_REQUIRED);
        return false;
    }
    true
}

/// Length is counted in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts twice.
pub(crate) fn check_password_length(password: &str, errors: &mut FormErrors) {
    if password.encode_utf16().count() < MIN_SIGN_UP_PASSWORD_LENGTH {
        errors.insert(FormField::Password, PASSWORD_TOO_SHORT);
    }
}

pub(crate) fn check_name(name: &str, errors: &mut FormErrors) {
    if name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }
}

/// Phone is optional; only a non-empty value is checked.
pub(crate) fn check_phone(phone_number: &str, errors: &mut FormErrors) {
    if !phone_number.is_empty() && !PHONE_PATTERN.is_match(phone_number) {
        errors.insert(FormField::PhoneNumber, PHONE_INVALID);
    }
}
