use clumio_rust_filter::{Constraint, FilterSpec, FilterTypes};
use serde::Deserialize;
use serde_json::Value;

use crate::types::HateoasLink;

/// Policy protecting an asset, and where it was inherited from
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProtectionInfo {
    pub policy_id: Option<String>,
    pub inheriting_entity_id: Option<String>,
    pub inheriting_entity_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MssqlHostLinks {
    #[serde(rename = "_self", default)]
    pub self_link: Option<HateoasLink>,

    #[serde(rename = "read-policy-definition", default)]
    pub read_policy_definition: Option<HateoasLink>,

    #[serde(rename = "protect-entities", default)]
    pub protect_entities: Option<HateoasLink>,

    #[serde(rename = "unprotect-entities", default)]
    pub unprotect_entities: Option<HateoasLink>,
}

/// A Microsoft SQL Server host
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MssqlHost {
    pub id: String,

    pub endpoint: Option<String>,

    pub status: Option<String>,

    pub group_id: Option<String>,

    pub organizational_unit_id: Option<String>,

    pub instance_count: Option<i64>,

    pub is_part_of_fci: Option<bool>,

    pub has_associated_availability_group: Option<bool>,

    pub protection_info: Option<ProtectionInfo>,

    pub protection_status: Option<String>,

    /// Resources requested through the `embed` parameter
    #[serde(rename = "_embedded")]
    pub embedded: Option<Value>,

    #[serde(rename = "_links", default)]
    pub links: MssqlHostLinks,
}

/// Filter on the protection of an asset, rendered as `protection_info.*`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtectionInfoFilter {
    pub policy_id: Option<Constraint>,
    pub inheriting_entity_type: Option<Constraint>,
}

impl FilterTypes for ProtectionInfoFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("policy_id", self.policy_id.clone())
            .set("inheriting_entity_type", self.inheriting_entity_type.clone())
    }
}

/// Fields accepted by the `filter` parameter of the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostsFilter {
    pub endpoint: Option<Constraint>,
    pub status: Option<Constraint>,
    pub group_id: Option<Constraint>,
    pub protection_status: Option<Constraint>,
    pub protection_info: Option<ProtectionInfoFilter>,
}

impl FilterTypes for HostsFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("endpoint", self.endpoint.clone())
            .set("status", self.status.clone())
            .set("group_id", self.group_id.clone())
            .set("protection_status", self.protection_status.clone())
            .set_nested("protection_info", self.protection_info.as_ref())
    }
}
