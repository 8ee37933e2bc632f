use crate::BackendError;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error payload of either the auth server or the REST layer.
///
/// Auth: `{"code":400,"error_code":"invalid_credentials","msg":"..."}` or the
/// older `{"error":"invalid_grant","error_description":"..."}`.
/// REST: `{"code":"PGRST116","message":"...","details":"...","hint":null}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ApiErrorBody {
    /// Unparseable bodies yield an empty payload; status text fills the gaps.
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub(crate) fn code(&self, status: u16) -> String {
        self.error_code
            .clone()
            .or_else(|| match &self.code {
                Some(Value::String(code)) => Some(code.clone()),
                _ => None,
            })
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| format!("HTTP_{status}"))
    }

    pub(crate) fn message(&self, status: u16) -> String {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| {
                StatusCode::from_u16(status)
                    .ok()
                    .and_then(|status| status.canonical_reason())
                    .map(String::from)
                    .unwrap_or_else(|| format!("Request failed with status {status}"))
            })
    }

    #[track_caller]
    pub(crate) fn into_error(self, status: u16) -> BackendError {
        BackendError::api(status, self.code(status), self.message(status))
    }
}
