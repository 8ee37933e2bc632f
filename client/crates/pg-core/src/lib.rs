pub mod models;
pub mod validation;

pub use models::new_user_profile::NewUserProfile;
pub use models::session::Session;
pub use models::user::{User, UserMetadata};
pub use models::user_profile::UserProfile;
pub use validation::form_errors::FormErrors;
pub use validation::form_field::FormField;
pub use validation::sign_in_form::SignInForm;
pub use validation::sign_up_form::SignUpForm;

#[cfg(test)]
mod tests;
