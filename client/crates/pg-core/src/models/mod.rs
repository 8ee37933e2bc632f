pub mod new_user_profile;
pub mod session;
pub mod user;
pub mod user_profile;
