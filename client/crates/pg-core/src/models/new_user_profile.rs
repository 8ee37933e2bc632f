use serde::Serialize;
use uuid::Uuid;

/// Insert payload for `user_profiles`. The phone number is sent verbatim,
/// empty string included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone_number: String,
}

impl NewUserProfile {
    pub fn new(id: Uuid, email: &str, name: &str, phone_number: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
            name: name.to_string(),
            phone_number: phone_number.to_string(),
        }
    }
}
