//! Report downloads

mod types;

pub use types::*;

use clumio_rust_filter::FilterTypes;

use crate::error::Result;
use crate::fetch::Fetch;
use crate::pagination::Paginator;
use crate::types::ListResponse;

const PATH: &str = "/reports/downloads";
const MEDIA_TYPE: &str = "application/api.clumio.report-downloads=v1+json";

/// Client for the report download endpoints
#[derive(Debug, Clone)]
pub struct ReportDownloadsController {
    fetch: Fetch,
}

impl ReportDownloadsController {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self { fetch }
    }

    pub async fn list_report_downloads(
        &self,
        limit: Option<u32>,
        start: Option<&str>,
        filter: Option<&ReportDownloadsFilter>,
    ) -> Result<ListResponse<ReportDownload>> {
        self.list_with_query(
            limit,
            start.map(str::to_string),
            filter.map(|f| f.query_str()),
        )
        .await
    }

    pub fn list_report_downloads_pages(
        &self,
        limit: Option<u32>,
        filter: Option<&ReportDownloadsFilter>,
    ) -> Paginator<ListResponse<ReportDownload>> {
        let controller = self.clone();
        let filter = filter.map(|f| f.query_str());
        Paginator::new(None, move |start| {
            let controller = controller.clone();
            let filter = filter.clone();
            async move { controller.list_with_query(limit, start, filter).await }
        })
    }

    async fn list_with_query(
        &self,
        limit: Option<u32>,
        start: Option<String>,
        filter: Option<String>,
    ) -> Result<ListResponse<ReportDownload>> {
        self.fetch
            .get(PATH)
            .accept(MEDIA_TYPE)
            .query_opt("limit", limit)
            .query_opt("start", start)
            .query_opt("filter", filter)
            .execute()
            .await
    }

    /// Start generating a report. Poll the returned task for completion.
    pub async fn create_report_download(
        &self,
        body: &ReportDownloadRequest,
    ) -> Result<ReportDownloadTask> {
        self.fetch
            .post(PATH)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClumioError;
    use crate::fetch::test_fetch;
    use clumio_rust_filter::{Constraint, Operator};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_compliance_report() {
        let mock_server = MockServer::start().await;
        let filter = ComplianceReportFilter {
            timestamp: Some(Constraint::op(Operator::Gt, "2024-01-01T00:00:00Z")),
            asset_type: Some(Constraint::in_list(["aws_ebs_volume"])),
            ..Default::default()
        };

        Mock::given(method("POST"))
            .and(path("/reports/downloads"))
            .and(body_json(json!({
                "type": "compliance",
                "file_name": "january",
                "filter": r#"{"timestamp":{"$gt":"2024-01-01T00:00:00Z"},"asset_type":{"$in":["aws_ebs_volume"]}}"#
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "task_id": "task-7" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = ReportDownloadsController::new(test_fetch(&mock_server.uri()));
        let request = ReportDownloadRequest::new("compliance")
            .with_file_name("january")
            .with_filter(&filter);

        let task = controller.create_report_download(&request).await.unwrap();
        assert_eq!(task.task_id, "task-7");
    }

    #[tokio::test]
    async fn test_list_report_downloads() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reports/downloads"))
            .and(query_param("filter", r#"{"task_id":{"$eq":"task-7"}}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "items": [{
                    "id": "12",
                    "type": "compliance",
                    "status": "completed",
                    "task_id": "task-7",
                    "download_link": "https://reports.example.com/12.csv",
                    "_links": { "_self": { "href": "/reports/downloads/12", "type": "get" } }
                }]},
                "_links": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = ReportDownloadsController::new(test_fetch(&mock_server.uri()));
        let filter = ReportDownloadsFilter {
            task_id: Some(Constraint::eq("task-7")),
            ..Default::default()
        };

        let page = controller
            .list_report_downloads(Some(5), None, Some(&filter))
            .await
            .unwrap();
        assert_eq!(
            page.items()[0].download_link.as_deref(),
            Some("https://reports.example.com/12.csv")
        );
        assert!(page.items()[0].links.self_link.is_some());
    }

    #[tokio::test]
    async fn test_unexpected_body_is_a_deserialization_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reports/downloads"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": 3 })))
            .mount(&mock_server)
            .await;

        let controller = ReportDownloadsController::new(test_fetch(&mock_server.uri()));
        let err = controller
            .create_report_download(&ReportDownloadRequest::new("activity"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClumioError::Deserialization(_)));
    }
}
