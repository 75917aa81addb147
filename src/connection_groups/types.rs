use clumio_rust_filter::{Constraint, FilterSpec, FilterTypes};
use serde::{Deserialize, Serialize};

use crate::types::HateoasLink;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConnectionGroupLinks {
    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<HateoasLink>,

    #[serde(
        rename = "update-aws-connection-group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_aws_connection_group: Option<HateoasLink>,

    #[serde(
        rename = "delete-aws-connection-group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delete_aws_connection_group: Option<HateoasLink>,
}

/// A set of AWS accounts and regions connected together
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AwsConnectionGroup {
    pub id: String,

    pub name: Option<String>,

    pub description: Option<String>,

    pub organizational_unit_id: Option<String>,

    #[serde(default)]
    pub account_native_ids: Vec<String>,

    #[serde(default)]
    pub aws_regions: Vec<String>,

    #[serde(default)]
    pub asset_types_enabled: Vec<String>,

    /// Quick-create link for the CloudFormation stack of the group
    pub deployment_url: Option<String>,

    pub created_timestamp: Option<String>,

    #[serde(rename = "_links", default)]
    pub links: AwsConnectionGroupLinks,
}

/// Body of create and update requests.
///
/// On update, empty lists and `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AwsConnectionGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_unit_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub account_native_ids: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aws_regions: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub asset_types_enabled: Vec<String>,
}

impl AwsConnectionGroupRequest {
    pub fn new<A, R>(name: &str, account_native_ids: A, aws_regions: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            name: Some(name.to_string()),
            account_native_ids: account_native_ids.into_iter().map(Into::into).collect(),
            aws_regions: aws_regions.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_asset_types<I>(mut self, asset_types: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.asset_types_enabled = asset_types.into_iter().map(Into::into).collect();
        self
    }
}

/// Fields accepted by the `filter` parameter of the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AwsConnectionGroupsFilter {
    pub name: Option<Constraint>,
    pub account_native_id: Option<Constraint>,
    pub aws_region: Option<Constraint>,
    pub organizational_unit_id: Option<Constraint>,
}

impl FilterTypes for AwsConnectionGroupsFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("name", self.name.clone())
            .set("account_native_id", self.account_native_id.clone())
            .set("aws_region", self.aws_region.clone())
            .set("organizational_unit_id", self.organizational_unit_id.clone())
    }
}
