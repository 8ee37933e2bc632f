use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated principal as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Auxiliary data attached to the auth record at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl UserMetadata {
    pub fn new(name: &str, phone_number: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            phone_number: Some(phone_number.to_string()),
        }
    }
}
