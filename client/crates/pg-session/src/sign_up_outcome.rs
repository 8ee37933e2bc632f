/// Result of a successful sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Email confirmation is off; the new user is signed in.
    SessionIssued,
    /// The backend sent a confirmation email; no session yet.
    ConfirmationRequired,
}
