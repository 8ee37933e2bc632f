use crate::FormErrors;
use crate::validation::rules;

/// Field values of the sign-in screen.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Password is only required here; length is enforced at sign-up.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        rules::check_email(&self.email, &mut errors);
        rules::check_password_present(&self.password, &mut errors);
        errors
    }
}
