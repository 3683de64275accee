//! Thin HTTP client for the hub API.

use reqwest::StatusCode;
use tb_core::{ErrorBody, TicketDetail, TicketPage, TicketStats};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("hub answered {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Filters for `GET /api/tickets`. Unset fields are not sent.
#[derive(Debug, Default, Clone)]
pub struct ListFilters {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        let text = [
            ("search", &self.search),
            ("status", &self.status),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ];
        for (key, value) in text {
            if let Some(value) = value {
                params.push((key, value.clone()));
            }
        }
        params
    }
}

pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

impl HubClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn tickets(&self, filters: &ListFilters) -> Result<TicketPage, ClientError> {
        let url = format!("{}/api/tickets", self.base_url);
        let resp = self.http.get(&url).query(&filters.to_query()).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `Ok(None)` when the hub reports the ticket as not found.
    pub async fn ticket(&self, id: i64) -> Result<Option<TicketDetail>, ClientError> {
        let url = format!("{}/api/tickets/{}", self.base_url, id);
        let resp = self.http.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(resp).await?.json().await?))
    }

    pub async fn stats(&self) -> Result<TicketStats, ClientError> {
        let url = format!("{}/api/stats", self.base_url);
        let resp = self.http.get(&url).send().await?;
        Ok(check(resp).await?.json().await?)
    }
}

/// Turn non-2xx answers into [`ClientError::Api`] using the `{ error }` body.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };
    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_filters_are_not_sent() {
        assert!(ListFilters::default().to_query().is_empty());
    }

    #[test]
    fn test_filters_use_wire_names() {
        let filters = ListFilters {
            page: Some(2),
            limit: Some(10),
            search: Some("vpn".into()),
            status: None,
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("search", "vpn".to_string()),
                ("startDate", "2024-01-01".to_string()),
                ("endDate", "2024-01-31".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = HubClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.base_url, "http://127.0.0.1:3000");
    }
}
