use crate::screens::{ScreenOutcome, alert, render_errors};
use crate::{AppResult, Screen};

use pg_core::SignInForm;
use pg_session::SessionStore;

use std::io::Write;
use std::time::Duration;

use log::warn;
use tokio::time::timeout;

pub const ALERT_TITLE: &str = "Sign In Error";
const FALLBACK_MESSAGE: &str = "Invalid email or password";

/// How long to wait for the profile after the backend accepted the password.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Validate, sign in, then wait for the auth change to reach the store.
pub async fn submit(
    store: &SessionStore,
    form: &SignInForm,
    out: &mut dyn Write,
) -> AppResult<ScreenOutcome> {
    let errors = form.validate();
    if !errors.is_empty() {
        render_errors(out, &errors)?;
        return Ok(ScreenOutcome::Stay);
    }

    let session = match store.sign_in(&form.email, &form.password).await {
        Ok(session) => session,
        Err(e) => {
            alert(out, ALERT_TITLE, &e.user_message(), FALLBACK_MESSAGE)?;
            return Ok(ScreenOutcome::Stay);
        }
    };

    let user_id = session.user.id;
    let settled = timeout(
        SETTLE_TIMEOUT,
        store.wait_for(|snapshot| snapshot.is_settled_for(user_id)),
    )
    .await;

    match settled {
        Ok(snapshot) => Ok(ScreenOutcome::Navigate(Screen::select(&snapshot))),
        Err(_) => {
            warn!("Signed in, but the profile did not load within {SETTLE_TIMEOUT:?}");
            Ok(ScreenOutcome::Navigate(Screen::Home))
        }
    }
}
