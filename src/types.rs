//! Response envelopes and HATEOAS links shared by every resource

use serde::{Deserialize, Deserializer, Serialize};

/// A hyperlink embedded in a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HateoasLink {
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// The `_self` link every resource carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HateoasSelfLink {
    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<HateoasLink>,
}

/// Navigation links of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    #[serde(rename = "_first", default, skip_serializing_if = "Option::is_none")]
    pub first: Option<HateoasLink>,

    #[serde(rename = "_last", default, skip_serializing_if = "Option::is_none")]
    pub last: Option<HateoasLink>,

    #[serde(rename = "_next", default, skip_serializing_if = "Option::is_none")]
    pub next: Option<HateoasLink>,

    #[serde(rename = "_prev", default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<HateoasLink>,

    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<HateoasLink>,
}

/// Embedded items of a list response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Embedded<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Embedded<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(rename = "_embedded", default)]
    pub embedded: Embedded<T>,

    #[serde(rename = "_links", default)]
    pub links: PaginationLinks,

    pub current_count: Option<i64>,

    pub filter_applied: Option<String>,

    pub limit: Option<i64>,

    /// Position of this page. The API sends either a number or a string.
    #[serde(default, deserialize_with = "string_or_number")]
    pub start: Option<String>,

    pub total_count: Option<i64>,

    pub total_pages_count: Option<i64>,
}

impl<T> ListResponse<T> {
    /// The items on this page
    pub fn items(&self) -> &[T] {
        &self.embedded.items
    }

    /// Consume the page and return its items
    pub fn into_items(self) -> Vec<T> {
        self.embedded.items
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}
