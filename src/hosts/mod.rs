//! Microsoft SQL Server hosts. The API only exposes them read-only.

mod types;

pub use types::*;

use clumio_rust_filter::FilterTypes;

use crate::error::Result;
use crate::fetch::{resource_path, Fetch};
use crate::pagination::Paginator;
use crate::types::ListResponse;

const PATH: &str = "/datasources/mssql/hosts";
const MEDIA_TYPE: &str = "application/api.clumio.mssql-hosts=v1+json";

/// Client for the MSSQL host endpoints
#[derive(Debug, Clone)]
pub struct HostsController {
    fetch: Fetch,
}

impl HostsController {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self { fetch }
    }

    /// List hosts.
    ///
    /// `embed` names a related resource to inline into each item, e.g.
    /// `read-policy-definition`.
    pub async fn list_hosts(
        &self,
        limit: Option<u32>,
        start: Option<&str>,
        filter: Option<&HostsFilter>,
        embed: Option<&str>,
    ) -> Result<ListResponse<MssqlHost>> {
        self.list_with_query(
            limit,
            start.map(str::to_string),
            filter.map(|f| f.query_str()),
            embed.map(str::to_string),
        )
        .await
    }

    pub fn list_hosts_pages(
        &self,
        limit: Option<u32>,
        filter: Option<&HostsFilter>,
        embed: Option<&str>,
    ) -> Paginator<ListResponse<MssqlHost>> {
        let controller = self.clone();
        let filter = filter.map(|f| f.query_str());
        let embed = embed.map(str::to_string);
        Paginator::new(None, move |start| {
            let controller = controller.clone();
            let filter = filter.clone();
            let embed = embed.clone();
            async move { controller.list_with_query(limit, start, filter, embed).await }
        })
    }

    async fn list_with_query(
        &self,
        limit: Option<u32>,
        start: Option<String>,
        filter: Option<String>,
        embed: Option<String>,
    ) -> Result<ListResponse<MssqlHost>> {
        self.fetch
            .get(PATH)
            .accept(MEDIA_TYPE)
            .query_opt("limit", limit)
            .query_opt("start", start)
            .query_opt("filter", filter)
            .query_opt("embed", embed)
            .execute()
            .await
    }

    pub async fn read_host(&self, host_id: &str, embed: Option<&str>) -> Result<MssqlHost> {
        self.fetch
            .get(&resource_path(PATH, host_id)?)
            .accept(MEDIA_TYPE)
            .query_opt("embed", embed)
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_fetch;
    use clumio_rust_filter::Constraint;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_nested_protection_filter() {
        let filter = HostsFilter {
            endpoint: Some(Constraint::contains("sql")),
            protection_info: Some(ProtectionInfoFilter {
                policy_id: Some(Constraint::eq("abc")),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            filter.query_str(),
            r#"{"endpoint":{"$contains":"sql"},"protection_info.policy_id":{"$eq":"abc"}}"#
        );

        let unset_nested = HostsFilter {
            protection_info: Some(ProtectionInfoFilter::default()),
            ..Default::default()
        };
        assert_eq!(unset_nested.query_str(), "{}");
    }

    #[tokio::test]
    async fn test_list_hosts_with_embed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/datasources/mssql/hosts"))
            .and(query_param("embed", "read-policy-definition"))
            .and(query_param("filter", r#"{"status":{"$eq":"active"}}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "items": [
                    {
                        "id": "host-1",
                        "endpoint": "sql01.corp.local",
                        "status": "active",
                        "instance_count": 2,
                        "is_part_of_fci": false,
                        "protection_info": {
                            "policy_id": "policy-1",
                            "inheriting_entity_type": "mssql_host"
                        },
                        "_embedded": { "read-policy-definition": { "id": "policy-1" } }
                    }
                ]},
                "_links": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = HostsController::new(test_fetch(&mock_server.uri()));
        let filter = HostsFilter {
            status: Some(Constraint::eq("active")),
            ..Default::default()
        };

        let page = controller
            .list_hosts(None, None, Some(&filter), Some("read-policy-definition"))
            .await
            .unwrap();
        let host = &page.items()[0];
        assert_eq!(host.instance_count, Some(2));
        assert_eq!(
            host.protection_info.as_ref().and_then(|p| p.policy_id.as_deref()),
            Some("policy-1")
        );
        assert_eq!(
            host.embedded.as_ref().unwrap()["read-policy-definition"]["id"],
            "policy-1"
        );
    }

    #[tokio::test]
    async fn test_read_host_escapes_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/datasources/mssql/hosts/host%2F1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "host/1" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller = HostsController::new(test_fetch(&mock_server.uri()));
        let host = controller.read_host("host/1", None).await.unwrap();
        assert_eq!(host.id, "host/1");
    }
}
