use crate::models::{
    CreateHabitEntryRequest, CreateHabitRequest, Habit, HabitEntry, HabitStats,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    /// Resolves the backend base URL.
    ///
    /// Priority: `window.ENV.API_URL` override, then the fixed `/api` prefix
    /// for non-localhost origins (production is reverse-proxied), then the
    /// local development backend.
    pub fn new() -> Self {
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }

            if let Ok(hostname) = window.location().hostname() {
                if hostname != "localhost" && hostname != "127.0.0.1" && !hostname.is_empty() {
                    return Self {
                        api_url: "/api".to_string(),
                    };
                }
            }
        }

        Self {
            api_url: "http://localhost:8000".to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin client over the habit backend's REST surface.
///
/// Stateless apart from the resolved base URL; the backend holds all data.
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// Like `request`, but discards the response body (DELETE returns
    /// 204/empty; some deployments answer with a message object instead).
    async fn request_empty(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> ApiResult<()> {
        let _ = self.send(method, path, None::<&()>).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn get_habits(&self) -> ApiResult<Vec<Habit>> {
        self.request(reqwest::Method::GET, "/habits/", None::<&()>)
            .await
    }

    pub async fn create_habit(&self, req: &CreateHabitRequest) -> ApiResult<Habit> {
        self.request(reqwest::Method::POST, "/habits/", Some(req))
            .await
    }

    pub async fn update_habit(&self, id: i64, req: &CreateHabitRequest) -> ApiResult<Habit> {
        self.request(reqwest::Method::PUT, &format!("/habits/{id}"), Some(req))
            .await
    }

    pub async fn delete_habit(&self, id: i64) -> ApiResult<()> {
        self.request_empty(reqwest::Method::DELETE, &format!("/habits/{id}"))
            .await
    }

    pub async fn get_habit_stats(&self, id: i64) -> ApiResult<HabitStats> {
        self.request(
            reqwest::Method::GET,
            &format!("/habits/{id}/stats"),
            None::<&()>,
        )
        .await
    }

    pub async fn get_habit_entries(&self, habit_id: i64) -> ApiResult<Vec<HabitEntry>> {
        self.request(
            reqwest::Method::GET,
            &format!("/habits/{habit_id}/entries"),
            None::<&()>,
        )
        .await
    }

    pub async fn create_habit_entry(
        &self,
        req: &CreateHabitEntryRequest,
    ) -> ApiResult<HabitEntry> {
        self.request(reqwest::Method::POST, "/habit-entries/", Some(req))
            .await
    }

    pub async fn update_habit_entry(
        &self,
        id: i64,
        req: &CreateHabitEntryRequest,
    ) -> ApiResult<HabitEntry> {
        self.request(
            reqwest::Method::PUT,
            &format!("/habit-entries/{id}"),
            Some(req),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_client_new_keeps_base_url() {
        let client = ApiClient::new("http://localhost:8000".to_string());
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn api_error_http_formats_status_and_body() {
        let e = ApiError::http(
            reqwest::StatusCode::BAD_REQUEST,
            "Entry for this date already exists".to_string(),
            "Request failed",
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert!(e.to_string().contains("400"));
        assert!(e.to_string().contains("already exists"));
    }

    #[test]
    fn api_error_parse_wraps_cause() {
        let e = ApiError::parse("missing field `id`");
        assert_eq!(e.kind, ApiErrorKind::Parse);
        assert_eq!(e.to_string(), "missing field `id`");
    }
}
