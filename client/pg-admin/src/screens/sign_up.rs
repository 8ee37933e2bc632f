use crate::screens::{ScreenOutcome, alert, render_errors};
use crate::{AppResult, Screen};

use pg_core::SignUpForm;
use pg_session::SessionStore;

use std::io::Write;

use log::debug;

pub const ALERT_TITLE: &str = "Sign Up Error";
pub const SUCCESS_MESSAGE: &str =
    "Account created successfully! Please check your email to verify your account.";
const FALLBACK_MESSAGE: &str = "An error occurred during sign up";

/// Validate and create the account. Success always leads to the sign-in
/// screen, whether or not the backend issued a session.
pub async fn submit(
    store: &SessionStore,
    form: &SignUpForm,
    out: &mut dyn Write,
) -> AppResult<ScreenOutcome> {
    let errors = form.validate();
    if !errors.is_empty() {
        render_errors(out, &errors)?;
        return Ok(ScreenOutcome::Stay);
    }

    match store
        .sign_up(&form.email, &form.password, &form.name, &form.phone_number)
        .await
    {
        Ok(outcome) => {
            debug!("Sign-up finished: {outcome:?}");
            writeln!(out, "Success: {SUCCESS_MESSAGE}")?;
            Ok(ScreenOutcome::Navigate(Screen::SignIn))
        }
        Err(e) => {
            alert(out, ALERT_TITLE, &e.user_message(), FALLBACK_MESSAGE)?;
            Ok(ScreenOutcome::Stay)
        }
    }
}
