//! Control-plane API client.
//!
//! Thin blocking client over the platform's JSON API. Rejections are
//! classified here into data the orchestrators match on, so the
//! decision logic never inspects raw response shapes:
//!
//!   promote → PromoteOutcome::{Promoted, RejectedWithErrors,
//!             ActivationRequired}; transport failure is the Err arm.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEPLOY_KEY_HEADER: &str = "x-deploy-key";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The application record, fetched fresh per invocation and treated
/// as read-only input.
#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub public: bool,
    /// Current production version; absent for apps never promoted.
    #[serde(default)]
    pub latest_version: Option<String>,
}

/// Migration targeting: a percent bucket or one named user, never
/// both. A null percent is sent as-is for the platform to reject.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RolloutBody {
    Percent { percent: Option<i64> },
    User { user: String },
}

#[derive(Debug, Serialize)]
pub struct MigrateBody {
    #[serde(flatten)]
    pub rollout: RolloutBody,
    /// Base64 of the packaged working directory, when the operator
    /// asked for refreshed migration code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_file: Option<String>,
}

#[derive(Debug, Serialize)]
struct PromoteBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    changelog: Option<&'a str>,
}

/// How a promotion request ended, short of transport failure.
#[derive(Debug, Clone)]
pub enum PromoteOutcome {
    Promoted,
    /// Structured rejection: one reason per entry, order preserved.
    RejectedWithErrors(Vec<String>),
    /// The app has not passed its activation review yet; `url` is
    /// where the operator requests public activation.
    ActivationRequired { url: String },
}

#[derive(Debug, Deserialize)]
struct RejectionPayload {
    #[serde(default)]
    errors: Option<Vec<Value>>,
    #[serde(default, rename = "activationInfo")]
    activation_info: Option<ActivationInfo>,
}

#[derive(Debug, Deserialize)]
struct ActivationInfo {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ReviewRun {
    #[serde(default)]
    failed: Vec<ReviewFailure>,
}

#[derive(Debug, Deserialize)]
struct ReviewFailure {
    message: String,
}

/// Reason entries arrive either as plain strings or as objects with
/// a `message` field; render both.
fn reason_strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Object(o) => match o.get("message").and_then(Value::as_str) {
                Some(m) => m.to_string(),
                None => v.to_string(),
            },
            other => other.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct ApiClient {
    http: reqwest::blocking::Client,
    base: String,
    deploy_key: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, deploy_key: impl Into<String>) -> ApiClient {
        ApiClient {
            http: reqwest::blocking::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            deploy_key: deploy_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Verify the deploy key against the platform before doing
    /// anything destructive.
    pub fn check(&self) -> Result<()> {
        let resp = self
            .http
            .get(self.url("/check"))
            .header(DEPLOY_KEY_HEADER, &self.deploy_key)
            .send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(RelayError::BadCredentials);
        }
        Err(api_error(status.as_u16(), resp.text().unwrap_or_default()))
    }

    /// Fetch the linked application record.
    pub fn app(&self, id: u64) -> Result<App> {
        let resp = self
            .http
            .get(self.url(&format!("/apps/{id}")))
            .header(DEPLOY_KEY_HEADER, &self.deploy_key)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), resp.text().unwrap_or_default()));
        }
        Ok(resp.json()?)
    }

    /// `PUT /apps/{id}/versions/{version}/promote/production`.
    ///
    /// Rejections carrying a recognized payload come back as data;
    /// anything else is a generic `Api` error.
    pub fn promote_version(
        &self,
        app_id: u64,
        version: &str,
        changelog: Option<&str>,
    ) -> Result<PromoteOutcome> {
        let resp = self
            .http
            .put(self.url(&format!("/apps/{app_id}/versions/{version}/promote/production")))
            .header(DEPLOY_KEY_HEADER, &self.deploy_key)
            .json(&PromoteBody { changelog })
            .send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(PromoteOutcome::Promoted);
        }
        let text = resp.text().unwrap_or_default();
        if let Ok(payload) = serde_json::from_str::<RejectionPayload>(&text) {
            if let Some(info) = payload.activation_info {
                return Ok(PromoteOutcome::ActivationRequired { url: info.url });
            }
            if let Some(errors) = payload.errors {
                return Ok(PromoteOutcome::RejectedWithErrors(reason_strings(&errors)));
            }
        }
        Err(api_error(status.as_u16(), text))
    }

    /// `POST /apps/{id}/versions/{from}/migrate-to/{to}`.
    pub fn migrate_version(
        &self,
        app_id: u64,
        from_version: &str,
        to_version: &str,
        body: &MigrateBody,
    ) -> Result<()> {
        let resp = self
            .http
            .post(self.url(&format!(
                "/apps/{app_id}/versions/{from_version}/migrate-to/{to_version}"
            )))
            .header(DEPLOY_KEY_HEADER, &self.deploy_key)
            .json(body)
            .send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let text = resp.text().unwrap_or_default();
        if let Ok(payload) = serde_json::from_str::<RejectionPayload>(&text) {
            if let Some(errors) = payload.errors {
                return Err(RelayError::MigrationRejected(reason_strings(&errors)));
            }
        }
        Err(api_error(status.as_u16(), text))
    }

    /// `POST /apps/{id}/versions/{version}/app-review-run`.
    ///
    /// Returns the failure reasons, in platform order; empty means
    /// the review passed.
    pub fn app_review_run(&self, app_id: u64, version: &str) -> Result<Vec<String>> {
        let resp = self
            .http
            .post(self.url(&format!("/apps/{app_id}/versions/{version}/app-review-run")))
            .header(DEPLOY_KEY_HEADER, &self.deploy_key)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), resp.text().unwrap_or_default()));
        }
        let run: ReviewRun = resp.json()?;
        Ok(run.failed.into_iter().map(|f| f.message).collect())
    }
}

fn api_error(status: u16, body: String) -> RelayError {
    let message = if body.trim().is_empty() {
        "no response body".to_string()
    } else {
        body.trim().to_string()
    };
    RelayError::Api { status, message }
}
