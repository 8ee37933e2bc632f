use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `user_profiles` table, keyed by the auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}
