//! Policy rules

mod types;

pub use types::*;

use clumio_rust_filter::FilterTypes;
use serde::Deserialize;

use crate::error::Result;
use crate::fetch::{resource_path, Fetch};
use crate::pagination::Paginator;
use crate::types::ListResponse;

const PATH: &str = "/policies/rules";
const MEDIA_TYPE: &str = "application/api.clumio.policy-rules=v1+json";

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    task_id: Option<String>,
}

/// Client for the policy rules endpoints
#[derive(Debug, Clone)]
pub struct PolicyRulesController {
    fetch: Fetch,
}

impl PolicyRulesController {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self { fetch }
    }

    pub async fn list_policy_rules(
        &self,
        limit: Option<u32>,
        start: Option<&str>,
        filter: Option<&PolicyRulesFilter>,
    ) -> Result<ListResponse<PolicyRule>> {
        self.list_with_query(
            limit,
            start.map(str::to_string),
            filter.map(|f| f.query_str()),
        )
        .await
    }

    pub fn list_policy_rules_pages(
        &self,
        limit: Option<u32>,
        filter: Option<&PolicyRulesFilter>,
    ) -> Paginator<ListResponse<PolicyRule>> {
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
    ) -> Result<ListResponse<PolicyRule>> {
        self.fetch
            .get(PATH)
            .accept(MEDIA_TYPE)
            .query_opt("limit", limit)
            .query_opt("start", start)
            .query_opt("filter", filter)
            .execute()
            .await
    }

    pub async fn read_policy_rule(&self, rule_id: &str) -> Result<PolicyRule> {
        self.fetch
            .get(&resource_path(PATH, rule_id)?)
            .accept(MEDIA_TYPE)
            .execute()
            .await
    }

    /// Create a rule. The rule is applied by the returned task.
    pub async fn create_policy_rule(&self, body: &PolicyRuleRequest) -> Result<PolicyRuleTask> {
        self.fetch
            .post(PATH)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    /// Replace a rule
    pub async fn update_policy_rule(
        &self,
        rule_id: &str,
        body: &PolicyRuleRequest,
    ) -> Result<PolicyRuleTask> {
        self.fetch
            .put(&resource_path(PATH, rule_id)?)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    /// Delete a rule, returning the id of the task doing it
    pub async fn delete_policy_rule(&self, rule_id: &str) -> Result<Option<String>> {
        let response: DeleteResponse = self
            .fetch
            .delete(&resource_path(PATH, rule_id)?)
            .accept(MEDIA_TYPE)
            .execute()
            .await?;
        Ok(response.task_id)
    }
}
