use crate::FormErrors;
use crate::validation::rules;

/// Field values of the sign-up screen.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

impl SignUpForm {
    pub fn new(name: &str, email: &str, password: &str, phone_number: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone_number: phone_number.to_string(),
        }
    }

    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        rules::check_name(&self.name, &mut errors);
        rules::check_email(&self.email, &mut errors);
        if rules::check_password_present(&self.password, &mut errors) {
            rules::check_password_length(&self.password, &mut errors);
        }
        rules::check_phone(&self.phone_number, &mut errors);
        errors
    }
}
