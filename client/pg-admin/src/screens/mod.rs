pub mod home;
pub mod sign_in;
pub mod sign_up;

use crate::Screen;

use pg_core::FormErrors;

use std::io::{self, Write};

/// What a screen asks the navigator to do after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// Validation failed or an alert was shown; the user stays put.
    Stay,
    Navigate(Screen),
}

/// Modal alert rendered as a single `<title>: <message>` line.
pub(crate) fn alert(out: &mut dyn Write, title: &str, message: &str, fallback: &str) -> io::Result<()> {
    let message = if message.trim().is_empty() {
        fallback
    } else {
        message
    };
    writeln!(out, "{title}: {message}")
}

pub(crate) fn render_errors(out: &mut dyn Write, errors: &FormErrors) -> io::Result<()> {
    for (field, message) in errors {
        writeln!(out, "  {field}: {message}")?;
    }
    Ok(())
}
