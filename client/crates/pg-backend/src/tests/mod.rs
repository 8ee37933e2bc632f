mod auth_event_bus;

use pg_core::{Session, User, UserMetadata};

use uuid::Uuid;

pub(crate) fn sample_session(expires_at: Option<i64>) -> Session {
    Session {
        access_token: String::from("access-token"),
        refresh_token: String::from("refresh-token"),
        token_type: String::from("bearer"),
        expires_in: 3600,
        expires_at,
        user: User {
            id: Uuid::new_v4(),
            email: Some(String::from("owner@pg.example.com")),
            user_metadata: UserMetadata::new("Jane Doe", ""),
        },
    }
}
