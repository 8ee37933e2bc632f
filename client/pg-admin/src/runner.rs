use crate::screens::{self, ScreenOutcome};
use crate::{AppResult, Commands, Screen};

use pg_core::{SignInForm, SignUpForm};
use pg_session::SessionStore;

use std::io::Write;

use log::info;

const SIGN_IN_HINT: &str = "pg-admin sign-in --email <email> --password <password>";

/// Execute one command against an initialized store.
///
/// Returns `false` when the user should see a failure exit code: validation
/// errors, alerts, or no signed-in user for `home`.
pub async fn run(command: Commands, store: &SessionStore, out: &mut dyn Write) -> AppResult<bool> {
    store.initialize().await;
    info!("Auth state after startup: {}", store.state());

    match command {
        Commands::SignIn { email, password } => {
            let form = SignInForm::new(&email, &password);
            let outcome = screens::sign_in::submit(store, &form, out).await?;
            navigate(store, outcome, out)
        }
        Commands::SignUp {
            name,
            email,
            password,
            phone,
        } => {
            let form = SignUpForm::new(&name, &email, &password, &phone);
            let outcome = screens::sign_up::submit(store, &form, out).await?;
            navigate(store, outcome, out)
        }
        Commands::Home => match Screen::select(&store.snapshot()) {
            Screen::Home => navigate(store, ScreenOutcome::Navigate(Screen::Home), out),
            _ => {
                writeln!(out, "Not signed in. Sign in with: {SIGN_IN_HINT}")?;
                Ok(false)
            }
        },
        Commands::SignOut => match store.sign_out().await {
            Ok(()) => {
                writeln!(out, "Signed out.")?;
                Ok(true)
            }
            Err(e) => {
                writeln!(out, "Sign Out Error: {}", e.user_message())?;
                Ok(false)
            }
        },
    }
}

fn navigate(store: &SessionStore, outcome: ScreenOutcome, out: &mut dyn Write) -> AppResult<bool> {
    let screen = match outcome {
        ScreenOutcome::Stay => return Ok(false),
        ScreenOutcome::Navigate(screen) => screen,
    };

    info!("Navigating to {screen}");
    match screen {
        Screen::Home => {
            screens::home::render(&store.snapshot(), out)?;
            Ok(true)
        }
        Screen::SignIn => {
            writeln!(out, "Sign in with: {SIGN_IN_HINT}")?;
            Ok(true)
        }
        Screen::Loading => {
            writeln!(out, "Still loading, try again shortly.")?;
            Ok(false)
        }
    }
}
