pub mod form_errors;
pub mod form_field;
pub(crate) mod rules;
pub mod sign_in_form;
pub mod sign_up_form;
