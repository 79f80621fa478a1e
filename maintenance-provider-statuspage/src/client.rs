//! HTTP client for the Statuspage REST API.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use maintenance_core::{MaintenanceError, MaintenanceResult};

use crate::types::{CreateIncidentRequest, StatuspageIncident};

const API_BASE_URL: &str = "https://api.statuspage.io/v1";

/// Authenticated client for one Statuspage page.
#[derive(Debug, Clone)]
pub struct StatuspageClient {
    http: reqwest::Client,
    base_url: String,
    page_id: String,
    access_token: String,
}

impl StatuspageClient {
    pub fn new(page_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_base_url(API_BASE_URL, page_id, access_token)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        page_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_id: page_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    fn incidents_url(&self) -> String {
        format!("{}/pages/{}/incidents", self.base_url, self.page_id)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("OAuth {}", self.access_token))
            .header(CONTENT_TYPE, "application/json")
    }

    /// POST /pages/:page/incidents
    pub async fn create_incident(&self, request: &CreateIncidentRequest) -> MaintenanceResult<()> {
        let resp = self
            .request(reqwest::Method::POST, self.incidents_url())
            .json(request)
            .send()
            .await
            .map_err(|e| MaintenanceError::RemoteWrite(format!("Failed to create incident: {e}")))?;

        expect_status(resp, StatusCode::CREATED, MaintenanceError::RemoteWrite).await?;
        Ok(())
    }

    /// DELETE /pages/:page/incidents/:id
    pub async fn delete_incident(&self, incident_id: &str) -> MaintenanceResult<()> {
        let resp = self
            .request(
                reqwest::Method::DELETE,
                format!("{}/{}", self.incidents_url(), incident_id),
            )
            .send()
            .await
            .map_err(|e| {
                MaintenanceError::RemoteWrite(format!("Failed to delete incident {incident_id}: {e}"))
            })?;

        expect_status(resp, StatusCode::OK, MaintenanceError::RemoteWrite).await?;
        Ok(())
    }

    /// GET /pages/:page/incidents/scheduled
    pub async fn scheduled_incidents(
        &self,
        page: u32,
        per_page: u32,
    ) -> MaintenanceResult<Vec<StatuspageIncident>> {
        let resp = self
            .request(
                reqwest::Method::GET,
                format!("{}/scheduled", self.incidents_url()),
            )
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|e| MaintenanceError::RemoteRead(format!("Failed to list incidents: {e}")))?;

        let body = expect_status(resp, StatusCode::OK, MaintenanceError::RemoteRead).await?;

        serde_json::from_str(&body)
            .map_err(|e| MaintenanceError::RemoteRead(format!("Invalid incident list: {e}")))
    }
}

/// Read the body and fail unless the response has exactly `expected` status.
/// The error carries the response body, which is where Statuspage explains
/// what went wrong.
async fn expect_status(
    resp: reqwest::Response,
    expected: StatusCode,
    error: fn(String) -> MaintenanceError,
) -> MaintenanceResult<String> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| error(format!("Failed to read response: {e}")))?;

    if status != expected {
        return Err(error(format!("status {}: {}", status.as_u16(), body)));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use maintenance_core::{ComponentSet, MaintenanceIncidentSpec, ScheduleType};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn spec() -> MaintenanceIncidentSpec {
        MaintenanceIncidentSpec {
            title: "API maintenance".to_string(),
            body: String::new(),
            components: ComponentSet::new(["c1"]),
            start: Utc.with_ymd_and_hms(2020, 1, 1, 14, 50, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2020, 1, 1, 15, 10, 0).unwrap(),
            schedule_type: ScheduleType::Recurring,
            schedule_key: None,
        }
    }

    #[tokio::test]
    async fn lists_scheduled_incidents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages/page1/incidents/scheduled"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "200"))
            .and(header("Authorization", "OAuth secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "i1",
                "name": "Database maintenance",
                "page_id": "page1",
                "components": [{"id": "c1"}],
                "scheduled_for": "2020-01-01T14:50:00Z",
                "scheduled_until": "2020-01-01T15:10:00Z",
                "metadata": {}
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = StatuspageClient::with_base_url(server.uri(), "page1", "secret");
        let incidents = client.scheduled_incidents(1, 200).await.unwrap();

        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].id, "i1");
    }

    #[tokio::test]
    async fn creates_incident() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages/page1/incidents"))
            .and(header("Content-Type", "application/json"))
            .and(body_partial_json(json!({"incident": {
                "name": "API maintenance",
                "component_ids": ["c1"]
            }})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "new1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = StatuspageClient::with_base_url(server.uri(), "page1", "secret");
        let request = CreateIncidentRequest::maintenance(&spec(), Utc::now());

        client.create_incident(&request).await.unwrap();
    }

    #[tokio::test]
    async fn unexpected_status_carries_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages/page1/incidents"))
            .respond_with(
                ResponseTemplate::new(420).set_body_string(r#"{"error":"Too many requests, enhance your calm"}"#),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pages/page1/incidents/scheduled"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = StatuspageClient::with_base_url(server.uri(), "page1", "secret");

        match client
            .create_incident(&CreateIncidentRequest::maintenance(&spec(), Utc::now()))
            .await
        {
            Err(MaintenanceError::RemoteWrite(msg)) => assert!(msg.contains("enhance your calm"), "{msg}"),
            other => panic!("expected RemoteWrite, got {:?}", other),
        }
        assert!(matches!(
            client.scheduled_incidents(1, 200).await,
            Err(MaintenanceError::RemoteRead(msg)) if msg.contains("unauthorized")
        ));
    }

    #[tokio::test]
    async fn delete_expects_ok() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/pages/page1/incidents/i1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "i1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/pages/page1/incidents/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = StatuspageClient::with_base_url(server.uri(), "page1", "secret");

        client.delete_incident("i1").await.unwrap();
        assert!(matches!(
            client.delete_incident("gone").await,
            Err(MaintenanceError::RemoteWrite(_))
        ));
    }
}
