//! Types for the organizational units controller

use clumio_rust_filter::{Constraint, FilterSpec, FilterTypes};
use serde::{Deserialize, Serialize};

use crate::types::HateoasLink;

/// Links embedded in an organizational unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationalUnitLinks {
    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<HateoasLink>,

    #[serde(
        rename = "update-organizational-unit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_organizational_unit: Option<HateoasLink>,

    #[serde(
        rename = "delete-organizational-unit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delete_organizational_unit: Option<HateoasLink>,

    #[serde(
        rename = "read-organizational-unit-parent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub read_parent: Option<HateoasLink>,
}

/// An organizational unit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrganizationalUnit {
    pub id: String,

    pub name: Option<String>,

    pub description: Option<String>,

    pub parent_id: Option<String>,

    pub children_count: Option<i64>,

    #[serde(default)]
    pub configured_datasource_types: Vec<String>,

    #[serde(default)]
    pub descendant_ids: Vec<String>,

    pub user_count: Option<i64>,

    /// Set when the change is applied asynchronously
    pub task_id: Option<String>,

    #[serde(rename = "_links", default)]
    pub links: OrganizationalUnitLinks,
}

/// Body of a create request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizationalUnitRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl OrganizationalUnitRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, value: &str) -> Self {
        self.description = Some(value.to_string());
        self
    }

    pub fn with_parent_id(mut self, value: &str) -> Self {
        self.parent_id = Some(value.to_string());
        self
    }
}

/// Body of a patch request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizationalUnitUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_users: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_users: Vec<String>,
}

/// Fields accepted by the `filter` parameter of the list endpoint.
///
/// - `name`: `$contains`
/// - `parent_id`: `$eq`
/// - `id`: `$in`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationalUnitsFilter {
    pub name: Option<Constraint>,
    pub parent_id: Option<Constraint>,
    pub id: Option<Constraint>,
}

impl FilterTypes for OrganizationalUnitsFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("name", self.name.clone())
            .set("parent_id", self.parent_id.clone())
            .set("id", self.id.clone())
    }
}
