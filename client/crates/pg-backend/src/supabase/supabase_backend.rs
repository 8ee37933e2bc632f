use crate::supabase::ApiErrorBody;
use crate::{
    AuthChangeEvent, AuthEvent, AuthEventBus, AuthSubscription, BackendClient, BackendError,
    BackendResult, FileSessionStorage, MemorySessionStorage, SessionStorage, SignUpRequest,
    SignUpResponse,
};

use pg_config::{BackendConfig, Config, SessionConfig};
use pg_core::{NewUserProfile, Session, User, UserProfile};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;

const PROFILE_TABLE: &str = "user_profiles";
const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// HTTP client for the hosted auth + REST service.
///
/// Holds the current session, persists it through [`SessionStorage`] and
/// publishes every change on its [`AuthEventBus`].
pub struct SupabaseBackend {
    base_url: String,
    anon_key: String,
    http: ReqwestClient,
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
    events: AuthEventBus,
    auto_refresh: bool,
    refresh_margin: TimeDelta,
}

impl SupabaseBackend {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `backend` - Service URL, anon key and request timeout
    /// * `session` - Refresh behavior
    /// * `storage` - Where sessions are persisted between runs
    pub fn new(
        backend: &BackendConfig,
        session: &SessionConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> BackendResult<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(backend.request_timeout_secs))
            .build()?;

        let refresh_margin = i64::try_from(session.refresh_margin_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::zero());

        Ok(Self {
            base_url: backend.base_url().to_string(),
            anon_key: backend.anon_key.clone(),
            http,
            storage,
            current: RwLock::new(None),
            events: AuthEventBus::new(),
            auto_refresh: session.auto_refresh,
            refresh_margin,
        })
    }

    /// Build from the full app config, choosing file or in-memory storage.
    pub fn from_config(config: &Config) -> BackendResult<Self> {
        let storage: Arc<dyn SessionStorage> = if config.session.persist {
            Arc::new(FileSessionStorage::new(config.session_path()))
        } else {
            Arc::new(MemorySessionStorage::new())
        };

        Self::new(&config.backend, &config.session, storage)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session currently held in memory (no storage lookup, no refresh).
    pub async fn current_session(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Exchange the refresh token for a new session.
    ///
    /// A refresh token rejected by the server ends the session locally.
    pub async fn refresh_session(&self) -> BackendResult<Session> {
        let refresh_token = self
            .current
            .read()
            .await
            .as_ref()
            .map(|session| session.refresh_token.clone())
            .ok_or_else(|| BackendError::no_session())?;

        let url = self.auth_url("/token?grant_type=refresh_token");
        let req = self
            .request(Method::POST, &url, &self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }));

        match self.send_json::<Session>(req).await {
            Ok(session) => {
                let session = session.with_issue_time(Utc::now());
                info!("Refreshed session for user {}", session.user.id);
                self.adopt_session(session.clone(), AuthChangeEvent::TokenRefreshed)
                    .await;
                Ok(session)
            }
            Err(e) => {
                if e.is_auth_rejection() {
                    warn!("Refresh token rejected, ending session: {e}");
                    self.drop_session().await;
                }
                Err(e)
            }
        }
    }

    /// Refresh the current session if it expires within the margin.
    /// Returns whether a refresh happened.
    pub async fn refresh_if_expiring(&self) -> BackendResult<bool> {
        self.refresh_if_expiring_at(Utc::now()).await
    }

    pub(crate) async fn refresh_if_expiring_at(&self, now: DateTime<Utc>) -> BackendResult<bool> {
        let expiring = self
            .current
            .read()
            .await
            .as_ref()
            .is_some_and(|session| session.is_expired(now, self.refresh_margin));

        if !expiring {
            return Ok(false);
        }

        self.refresh_session().await?;
        Ok(true)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Build a request carrying the anon key and a bearer token
    fn request(&self, method: Method, url: &str, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    /// Access token of the current session, or the anon key when signed out.
    async fn bearer(&self) -> String {
        self.current
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    /// Execute request and turn non-success responses into API errors
    async fn send(&self, req: RequestBuilder) -> BackendResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiErrorBody::parse(&body).into_error(status.as_u16()));
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> BackendResult<T> {
        let body = self.send(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn adopt_session(&self, session: Session, kind: AuthChangeEvent) {
        if let Err(e) = self.storage.save(&session) {
            warn!("Failed to persist session: {e}");
        }
        *self.current.write().await = Some(session.clone());
        self.events.emit(AuthEvent::new(kind, Some(session)));
    }

    async fn drop_session(&self) {
        self.current.write().await.take();
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear persisted session: {e}");
        }
        self.events.emit(AuthEvent::signed_out());
    }
}

/// Sign-up answers with a session when email confirmation is off, and with
/// the bare user (or `{user, session: null}`) when it is on.
pub(crate) fn parse_sign_up(body: &str, issued_at: DateTime<Utc>) -> BackendResult<SignUpResponse> {
    let value: Value = serde_json::from_str(body)?;

    let session_value = if value.get("access_token").is_some() {
        Some(value.clone())
    } else {
        value.get("session").filter(|s| s.is_object()).cloned()
    };

    if let Some(session_value) = session_value {
        let session = serde_json::from_value::<Session>(session_value)?.with_issue_time(issued_at);
        return Ok(SignUpResponse {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user_value = match value.get("user") {
        Some(user) if user.is_object() => user.clone(),
        _ => value,
    };
    let user: User = serde_json::from_value(user_value)?;

    Ok(SignUpResponse {
        user,
        session: None,
    })
}

#[async_trait]
impl BackendClient for SupabaseBackend {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        let current = self.current.read().await.clone();
        let session = match current {
            Some(session) => session,
            None => match self.storage.load()? {
                Some(session) => {
                    *self.current.write().await = Some(session.clone());
                    session
                }
                None => return Ok(None),
            },
        };

        if self.auto_refresh && session.is_expired(Utc::now(), self.refresh_margin) {
            info!("Session for user {} is expiring, refreshing", session.user.id);
            return match self.refresh_session().await {
                Ok(session) => Ok(Some(session)),
                Err(e) if e.is_auth_rejection() => Ok(None),
                Err(e) => Err(e),
            };
        }

        Ok(Some(session))
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.events.subscribe()
    }

    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<SignUpResponse> {
        let url = self.auth_url("/signup");
        let req = self
            .request(Method::POST, &url, &self.anon_key)
            .json(request);

        let body = self.send(req).await?;
        let response = parse_sign_up(&body, Utc::now())?;

        match &response.session {
            Some(session) => {
                info!("Signed up user {} with an active session", response.user.id);
                self.adopt_session(session.clone(), AuthChangeEvent::SignedIn)
                    .await;
            }
            None => info!(
                "Signed up user {}, email confirmation pending",
                response.user.id
            ),
        }

        Ok(response)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        let url = self.auth_url("/token?grant_type=password");
        let req = self
            .request(Method::POST, &url, &self.anon_key)
            .json(&json!({ "email": email, "password": password }));

        let session = self
            .send_json::<Session>(req)
            .await?
            .with_issue_time(Utc::now());

        info!("Signed in user {}", session.user.id);
        self.adopt_session(session.clone(), AuthChangeEvent::SignedIn)
            .await;
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let access_token = self
            .current
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.clone());

        let result = match access_token {
            Some(token) => {
                let req = self.request(Method::POST, &self.auth_url("/logout"), &token);
                self.send(req).await.map(|_| ())
            }
            None => Ok(()),
        };

        // Local sign-out happens even when the server call fails
        self.drop_session().await;

        match result {
            Err(BackendError::Api { status, .. }) if matches!(status, 401 | 403 | 404) => {
                debug!("Server-side session already gone (status {status})");
                Ok(())
            }
            other => other,
        }
    }

    async fn fetch_profile(&self, user_id: Uuid) -> BackendResult<UserProfile> {
        let url = format!("{}?id=eq.{}&select=*", self.rest_url(PROFILE_TABLE), user_id);
        let bearer = self.bearer().await;
        let req = self
            .request(Method::GET, &url, &bearer)
            .header(ACCEPT, SINGLE_OBJECT_MEDIA_TYPE);

        self.send_json(req).await
    }

    async fn insert_profile(&self, profile: &NewUserProfile) -> BackendResult<()> {
        let bearer = self.bearer().await;
        let req = self
            .request(Method::POST, &self.rest_url(PROFILE_TABLE), &bearer)
            .header("Prefer", "return=minimal")
            .json(&[profile]);

        self.send(req).await?;
        debug!("Inserted profile row for user {}", profile.id);
        Ok(())
    }
}
