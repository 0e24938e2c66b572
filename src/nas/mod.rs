pub mod api;

use crate::config::NasConfig;
use crate::error::{Error, Result};
use api::{ApiResponse, LoginData};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that accepts magnet links as download tasks
#[async_trait]
pub trait TaskSubmitter: Send + Sync {
    async fn submit(&self, magnet: &str) -> Result<()>;
}

/// Client for the Download Station web API of a Synology NAS
pub struct DownloadStation {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

/// A logged-in API session. Consumed by [`Session::logout`].
pub struct Session<'a> {
    station: &'a DownloadStation,
    sid: String,
}

impl DownloadStation {
    pub fn new(config: &NasConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_url(&self) -> String {
        format!("{}{}", self.base_url, api::AUTH_PATH)
    }

    fn task_url(&self) -> String {
        format!("{}{}", self.base_url, api::TASK_PATH)
    }

    pub async fn login(&self) -> Result<Session<'_>> {
        debug!("Logging in to {} as {}", self.base_url, self.username);

        let response = self
            .client
            .get(self.auth_url())
            .query(&[
                ("api", api::AUTH_API),
                ("version", api::AUTH_VERSION),
                ("method", "login"),
                ("account", self.username.as_str()),
                ("passwd", self.password.as_str()),
                ("session", api::SESSION_NAME),
                ("format", "sid"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::NasAuth(format!("HTTP {}", response.status())));
        }

        let body: ApiResponse<LoginData> = decode(response).await?;
        if !body.success {
            let reason = body
                .error_code()
                .map(api::auth_error_message)
                .unwrap_or_else(|| "NAS rejected the credentials".to_string());
            return Err(Error::NasAuth(reason));
        }

        let sid = body
            .data
            .map(|data| data.sid)
            .filter(|sid| !sid.is_empty())
            .ok_or_else(|| Error::NasResponse("login succeeded without a session id".into()))?;

        debug!("Obtained Download Station session");
        Ok(Session { station: self, sid })
    }
}

impl Session<'_> {
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// Queue `uri` (magnet or URL) as a new download task
    pub async fn create_task(&self, uri: &str) -> Result<()> {
        let response = self
            .station
            .client
            .post(self.station.task_url())
            .form(&[
                ("api", api::TASK_API),
                ("version", api::TASK_VERSION),
                ("method", "create"),
                ("uri", uri),
                ("_sid", self.sid.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::NasSubmission(format!("HTTP {}", response.status())));
        }

        let body: ApiResponse<IgnoredAny> = decode(response).await?;
        if !body.success {
            let reason = body
                .error_code()
                .map(api::task_error_message)
                .unwrap_or_else(|| "request was not accepted".to_string());
            return Err(Error::NasSubmission(reason));
        }

        debug!("Download task created");
        Ok(())
    }

    /// End the session. Best effort: problems are logged, never returned.
    pub async fn logout(self) {
        let result = self
            .station
            .client
            .get(self.station.auth_url())
            .query(&[
                ("api", api::AUTH_API),
                ("version", api::AUTH_VERSION),
                ("method", "logout"),
                ("session", api::SESSION_NAME),
                ("_sid", self.sid.as_str()),
            ])
            .timeout(LOGOUT_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<ApiResponse<IgnoredAny>>().await {
                    Ok(body) if body.success => debug!("Logged out of Download Station"),
                    Ok(body) => warn!("NAS logout was not acknowledged: {:?}", body.error_code()),
                    Err(e) => warn!("NAS logout returned an unreadable body: {}", e),
                }
            }
            Ok(response) => warn!("NAS logout failed with status {}", response.status()),
            Err(e) => warn!("NAS logout failed: {}", e),
        }
    }
}

#[async_trait]
impl TaskSubmitter for DownloadStation {
    /// Login, create the task, then always attempt a logout
    async fn submit(&self, magnet: &str) -> Result<()> {
        let session = self.login().await?;
        let result = session.create_task(magnet).await;
        session.logout().await;
        result
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| Error::NasResponse(e.to_string()))
}
