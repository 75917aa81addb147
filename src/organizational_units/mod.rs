//! Organizational units: the tenancy tree resources are grouped under

mod types;

pub use types::*;

use clumio_rust_filter::FilterTypes;

use crate::error::Result;
use crate::fetch::{resource_path, Fetch};
use crate::pagination::Paginator;
use crate::types::ListResponse;

const PATH: &str = "/organizational-units";
const MEDIA_TYPE: &str = "application/api.clumio.organizational-units=v2+json";

/// Client for the organizational units endpoints
#[derive(Debug, Clone)]
pub struct OrganizationalUnitsController {
    fetch: Fetch,
}

impl OrganizationalUnitsController {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self { fetch }
    }

    /// List organizational units, one page at a time
    pub async fn list_organizational_units(
        &self,
        limit: Option<u32>,
        start: Option<&str>,
        filter: Option<&OrganizationalUnitsFilter>,
    ) -> Result<ListResponse<OrganizationalUnit>> {
        self.list_with_query(
            limit,
            start.map(str::to_string),
            filter.map(|f| f.query_str()),
        )
        .await
    }

    /// Every page of [`list_organizational_units`](Self::list_organizational_units)
    pub fn list_organizational_units_pages(
        &self,
        limit: Option<u32>,
        filter: Option<&OrganizationalUnitsFilter>,
    ) -> Paginator<ListResponse<OrganizationalUnit>> {
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
    ) -> Result<ListResponse<OrganizationalUnit>> {
        self.fetch
            .get(PATH)
            .accept(MEDIA_TYPE)
            .query_opt("limit", limit)
            .query_opt("start", start)
            .query_opt("filter", filter)
            .execute()
            .await
    }

    /// Read one organizational unit
    pub async fn read_organizational_unit(&self, id: &str) -> Result<OrganizationalUnit> {
        self.fetch
            .get(&resource_path(PATH, id)?)
            .accept(MEDIA_TYPE)
            .execute()
            .await
    }

    /// Create an organizational unit
    pub async fn create_organizational_unit(
        &self,
        body: &OrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit> {
        self.fetch
            .post(PATH)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    /// Rename, describe or change the users of an organizational unit
    pub async fn update_organizational_unit(
        &self,
        id: &str,
        body: &OrganizationalUnitUpdateRequest,
    ) -> Result<OrganizationalUnit> {
        self.fetch
            .patch(&resource_path(PATH, id)?)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    /// Delete an organizational unit
    pub async fn delete_organizational_unit(&self, id: &str) -> Result<()> {
        self.fetch
            .delete(&resource_path(PATH, id)?)
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
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_with_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizational-units"))
            .and(header("Accept", MEDIA_TYPE))
            .and(query_param("limit", "10"))
            .and(query_param(
                "filter",
                r#"{"name":{"$contains":"eng"},"parent_id":{"$eq":"00000000-0000-0000-0000-000000000000"}}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "items": [
                    {
                        "id": "ou-1",
                        "name": "engineering",
                        "parent_id": "00000000-0000-0000-0000-000000000000",
                        "children_count": 2,
                        "configured_datasource_types": ["aws"],
                        "_links": {
                            "_self": { "href": "/organizational-units/ou-1", "templated": false, "type": "get" },
                            "update-organizational-unit": { "href": "/organizational-units/ou-1", "templated": false, "type": "patch" }
                        }
                    }
                ]},
                "_links": {},
                "current_count": 1,
                "limit": 10,
                "start": "1",
                "total_count": 1
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = OrganizationalUnitsController::new(test_fetch(&mock_server.uri()));
        let filter = OrganizationalUnitsFilter {
            name: Some(Constraint::contains("eng")),
            parent_id: Some(Constraint::eq("00000000-0000-0000-0000-000000000000")),
            ..Default::default()
        };

        let page = controller
            .list_organizational_units(Some(10), None, Some(&filter))
            .await
            .unwrap();

        assert_eq!(page.items().len(), 1);
        let ou = &page.items()[0];
        assert_eq!(ou.name.as_deref(), Some("engineering"));
        assert_eq!(ou.configured_datasource_types, vec!["aws".to_string()]);
        assert_eq!(
            ou.links
                .update_organizational_unit
                .as_ref()
                .and_then(|l| l.link_type.as_deref()),
            Some("patch")
        );
        assert!(ou.links.delete_organizational_unit.is_none());
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/organizational-units"))
            .and(body_json(json!({ "name": "finance", "parent_id": "ou-root" })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "id": "ou-2",
                "name": "finance",
                "parent_id": "ou-root",
                "task_id": "task-9"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/organizational-units/ou-2"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = OrganizationalUnitsController::new(test_fetch(&mock_server.uri()));

        let created = controller
            .create_organizational_unit(
                &OrganizationalUnitRequest::new("finance").with_parent_id("ou-root"),
            )
            .await
            .unwrap();
        assert_eq!(created.id, "ou-2");
        assert_eq!(created.task_id.as_deref(), Some("task-9"));

        controller.delete_organizational_unit("ou-2").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/organizational-units/ou-1"))
            .and(body_json(json!({ "description": "renamed", "add_users": ["u-1"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "ou-1",
                "description": "renamed",
                "user_count": 1
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = OrganizationalUnitsController::new(test_fetch(&mock_server.uri()));
        let body = OrganizationalUnitUpdateRequest {
            description: Some("renamed".to_string()),
            add_users: vec!["u-1".to_string()],
            ..Default::default()
        };

        let updated = controller.update_organizational_unit("ou-1", &body).await.unwrap();
        assert_eq!(updated.user_count, Some(1));
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizational-units/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{ "error_code": 1001, "error_message": "Organizational unit not found" }]
            })))
            .mount(&mock_server)
            .await;

        let controller = OrganizationalUnitsController::new(test_fetch(&mock_server.uri()));
        let err = controller
            .read_organizational_unit("missing")
            .await
            .unwrap_err();

        match err {
            ClumioError::ApiError { details, status } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(
                    details.errors[0].error_message.as_deref(),
                    Some("Organizational unit not found")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let controller = OrganizationalUnitsController::new(test_fetch("http://127.0.0.1:9"));
        let err = controller.read_organizational_unit("").await.unwrap_err();
        assert!(matches!(err, ClumioError::InvalidParameters(_)));
    }
}
