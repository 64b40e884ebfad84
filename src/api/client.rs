use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use super::PipelineApi;
use super::error::ApiError;
use crate::pipeline::{EntityRecord, PendingItemsRequest, PipelineKind, TransitionRequest};

pub struct HttpPipelineApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPipelineApi {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: PipelineKind) -> String {
        format!("{}/{}", self.base_url, kind.path_segment())
    }

    fn entity_url(&self, kind: PipelineKind, id: &str, suffix: &str) -> String {
        format!("{}/{}/{}", self.collection_url(kind), id, suffix)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn patch<T: Serialize>(&self, url: String, body: &T) -> Result<(), ApiError> {
        tracing::debug!(%url, "PATCH");
        let response = self.authorize(self.client.patch(&url)).json(body).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

impl PipelineApi for HttpPipelineApi {
    async fn fetch_entities(&self, kind: PipelineKind) -> Result<Vec<EntityRecord>, ApiError> {
        let url = self.collection_url(kind);
        tracing::debug!(%url, "GET");
        let response = self.authorize(self.client.get(&url)).send().await?;
        let records = check_status(response).await?.json::<Vec<EntityRecord>>().await?;
        Ok(records)
    }

    async fn persist_transition(
        &self,
        kind: PipelineKind,
        req: &TransitionRequest,
    ) -> Result<(), ApiError> {
        self.patch(self.entity_url(kind, &req.entity_id, "status"), req).await
    }

    async fn persist_pending_items(
        &self,
        kind: PipelineKind,
        req: &PendingItemsRequest,
    ) -> Result<(), ApiError> {
        self.patch(self.entity_url(kind, &req.entity_id, "pending-items"), req)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer, token: Option<&str>) -> HttpPipelineApi {
        HttpPipelineApi::new(
            format!("{}/api/", server.uri()),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_entities_parses_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/alocacao"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "aloc-1",
                    "status": "lead",
                    "assigned_to": "ana",
                    "pending_items": [],
                    "days_in_status": 3
                },
                { "id": "aloc-2", "status": "allocated" }
            ])))
            .mount(&server)
            .await;

        let records = api(&server, None)
            .fetch_entities(PipelineKind::Alocacao)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].assigned_to.as_deref(), Some("ana"));
        assert_eq!(records[0].days_in_status, 3);
        assert!(records[1].pending_items.is_empty());
        assert_eq!(records[1].assigned_to, None);
    }

    #[tokio::test]
    async fn persist_transition_sends_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/cedentes/ced-9/status"))
            .and(header("authorization", "Bearer s3cret"))
            .and(body_json(serde_json::json!({
                "entityId": "ced-9",
                "newStatus": "due_diligence",
                "statusEnteredAt": "2026-10-16T12:00:00Z"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let req = TransitionRequest {
            entity_id: "ced-9".into(),
            new_status: "due_diligence".into(),
            status_entered_at: DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        api(&server, Some("s3cret"))
            .persist_transition(PipelineKind::Cedentes, &req)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn persist_pending_items_hits_entity_route() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/monitoramento/mon-2/pending-items"))
            .and(body_json(serde_json::json!({
                "entityId": "mon-2",
                "pendingItems": ["a"]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let req = PendingItemsRequest {
            entity_id: "mon-2".into(),
            pending_items: vec!["a".into()],
        };
        api(&server, None)
            .persist_pending_items(PipelineKind::Monitoramento, &req)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prospeccao"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = api(&server, None)
            .fetch_entities(PipelineKind::Prospeccao)
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[test]
    fn empty_token_is_ignored() {
        let api = HttpPipelineApi::new("http://localhost/api/", Some(String::new()), Duration::from_secs(1))
            .unwrap();
        assert!(api.token.is_none());
        assert_eq!(api.base_url(), "http://localhost/api");
    }
}
