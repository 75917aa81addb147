use clumio_rust_filter::{Constraint, FilterSpec, FilterTypes};
use serde::{Deserialize, Serialize};

use crate::types::HateoasLink;

/// Where a rule is placed relative to the others
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePriority {
    /// The rule is evaluated right before this one. `None` puts it last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_rule_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPolicyAction {
    pub policy_id: String,
}

/// What happens to assets matching a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    pub assign_policy: AssignPolicyAction,
}

impl RuleAction {
    pub fn assign_policy(policy_id: &str) -> Self {
        Self {
            assign_policy: AssignPolicyAction {
                policy_id: policy_id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRuleLinks {
    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<HateoasLink>,

    #[serde(
        rename = "update-policy-rule",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_policy_rule: Option<HateoasLink>,

    #[serde(
        rename = "delete-policy-rule",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delete_policy_rule: Option<HateoasLink>,

    #[serde(
        rename = "read-policy-definition",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub read_policy_definition: Option<HateoasLink>,
}

/// A rule assigning a policy to every asset matching its condition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyRule {
    pub id: String,

    pub name: Option<String>,

    /// Condition in filter syntax
    pub condition: Option<String>,

    pub action: Option<RuleAction>,

    pub priority: Option<RulePriority>,

    pub organizational_unit_id: Option<String>,

    #[serde(rename = "_links", default)]
    pub links: PolicyRuleLinks,
}

/// Response of create and update, which apply asynchronously
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyRuleTask {
    pub rule: Option<PolicyRule>,

    pub task_id: Option<String>,
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRuleRequest {
    pub name: String,

    pub condition: String,

    pub action: RuleAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<RulePriority>,
}

impl PolicyRuleRequest {
    /// A rule assigning `policy_id` to the assets matched by `condition`
    pub fn new<C: FilterTypes>(name: &str, condition: &C, policy_id: &str) -> Self {
        Self {
            name: name.to_string(),
            condition: condition.query_str(),
            action: RuleAction::assign_policy(policy_id),
            priority: None,
        }
    }

    /// Evaluate the rule right before `rule_id`
    pub fn before(mut self, rule_id: &str) -> Self {
        self.priority = Some(RulePriority {
            before_rule_id: Some(rule_id.to_string()),
        });
        self
    }
}

/// Asset selector of a policy rule.
///
/// `aws_tag` is compared with an operator whose operand is a
/// [`Tag`](clumio_rust_filter::Tag), e.g.
/// `Constraint::eq(Tag::new("env", "prod"))`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCondition {
    pub entity_type: Option<Constraint>,
    pub aws_account_native_id: Option<Constraint>,
    pub aws_region: Option<Constraint>,
    pub aws_tag: Option<Constraint>,
}

impl FilterTypes for RuleCondition {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("entity_type", self.entity_type.clone())
            .set("aws_account_native_id", self.aws_account_native_id.clone())
            .set("aws_region", self.aws_region.clone())
            .set("aws_tag", self.aws_tag.clone())
    }
}

/// Fields accepted by the `filter` parameter of the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyRulesFilter {
    pub name: Option<Constraint>,
    pub policy_id: Option<Constraint>,
    pub organizational_unit_id: Option<Constraint>,
}

impl FilterTypes for PolicyRulesFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("name", self.name.clone())
            .set("policy_id", self.policy_id.clone())
            .set("organizational_unit_id", self.organizational_unit_id.clone())
    }
}
