//! AWS connection groups

mod types;

pub use types::*;

use clumio_rust_filter::FilterTypes;

use crate::error::Result;
use crate::fetch::{resource_path, Fetch};
use crate::pagination::Paginator;
use crate::types::ListResponse;

const PATH: &str = "/connections/aws/connection-groups";
const MEDIA_TYPE: &str = "application/api.clumio.aws-connection-groups=v1+json";

/// Client for the AWS connection group endpoints
#[derive(Debug, Clone)]
pub struct AwsConnectionGroupsController {
    fetch: Fetch,
}

impl AwsConnectionGroupsController {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self { fetch }
    }

    pub async fn list_connection_groups(
        &self,
        limit: Option<u32>,
        start: Option<&str>,
        filter: Option<&AwsConnectionGroupsFilter>,
    ) -> Result<ListResponse<AwsConnectionGroup>> {
        self.list_with_query(
            limit,
            start.map(str::to_string),
            filter.map(|f| f.query_str()),
        )
        .await
    }

    pub fn list_connection_groups_pages(
        &self,
        limit: Option<u32>,
        filter: Option<&AwsConnectionGroupsFilter>,
    ) -> Paginator<ListResponse<AwsConnectionGroup>> {
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
    ) -> Result<ListResponse<AwsConnectionGroup>> {
        self.fetch
            .get(PATH)
            .accept(MEDIA_TYPE)
            .query_opt("limit", limit)
            .query_opt("start", start)
            .query_opt("filter", filter)
            .execute()
            .await
    }

    pub async fn read_connection_group(&self, group_id: &str) -> Result<AwsConnectionGroup> {
        self.fetch
            .get(&resource_path(PATH, group_id)?)
            .accept(MEDIA_TYPE)
            .execute()
            .await
    }

    pub async fn create_connection_group(
        &self,
        body: &AwsConnectionGroupRequest,
    ) -> Result<AwsConnectionGroup> {
        self.fetch
            .post(PATH)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    pub async fn update_connection_group(
        &self,
        group_id: &str,
        body: &AwsConnectionGroupRequest,
    ) -> Result<AwsConnectionGroup> {
        self.fetch
            .put(&resource_path(PATH, group_id)?)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    pub async fn delete_connection_group(&self, group_id: &str) -> Result<()> {
        self.fetch
            .delete(&resource_path(PATH, group_id)?)
            .accept(MEDIA_TYPE)
            .execute_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClumioError;
    use crate::fetch::test_fetch;
    use clumio_rust_filter::Constraint;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_connection_group() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connections/aws/connection-groups"))
            .and(body_json(json!({
                "name": "prod",
                "account_native_ids": ["111111111111"],
                "aws_regions": ["us-west-2", "us-east-1"],
                "asset_types_enabled": ["EBS", "RDS"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cg-1",
                "name": "prod",
                "account_native_ids": ["111111111111"],
                "aws_regions": ["us-west-2", "us-east-1"],
                "asset_types_enabled": ["EBS", "RDS"],
                "deployment_url": "https://console.aws.amazon.com/cloudformation/home#/stacks/quickcreate",
                "some_new_field": { "ignored": true }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = AwsConnectionGroupsController::new(test_fetch(&mock_server.uri()));
        let request =
            AwsConnectionGroupRequest::new("prod", ["111111111111"], ["us-west-2", "us-east-1"])
                .with_asset_types(["EBS", "RDS"]);

        let group = controller.create_connection_group(&request).await.unwrap();
        assert_eq!(group.id, "cg-1");
        assert_eq!(group.aws_regions.len(), 2);
        assert!(group.deployment_url.is_some());
    }

    #[tokio::test]
    async fn test_list_by_account() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/connections/aws/connection-groups"))
            .and(query_param("start", "2"))
            .and(query_param(
                "filter",
                r#"{"account_native_id":{"$in":["111111111111", "222222222222"]}}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "items": [] },
                "_links": {},
                "current_count": 0,
                "start": "2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = AwsConnectionGroupsController::new(test_fetch(&mock_server.uri()));
        let filter = AwsConnectionGroupsFilter {
            account_native_id: Some(Constraint::in_list(["111111111111", "222222222222"])),
            ..Default::default()
        };

        let page = controller
            .list_connection_groups(None, Some("2"), Some(&filter))
            .await
            .unwrap();
        assert!(page.items().is_empty());
        assert_eq!(page.start.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_delete_conflict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/connections/aws/connection-groups/cg-1"))
            .respond_with(ResponseTemplate::new(409).set_body_string("group is in use"))
            .mount(&mock_server)
            .await;

        let controller = AwsConnectionGroupsController::new(test_fetch(&mock_server.uri()));
        let err = controller.delete_connection_group("cg-1").await.unwrap_err();

        match err {
            ClumioError::UnparsedApiError { message, status } => {
                assert_eq!(status.as_u16(), 409);
                assert_eq!(message, "group is in use");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
