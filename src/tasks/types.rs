use clumio_rust_filter::{Constraint, FilterSpec, FilterTypes};
use serde::{Deserialize, Serialize};

use crate::types::HateoasLink;

/// Status a running task is moved to when cancelled
pub const STATUS_ABORTED: &str = "aborted";

/// An entity a task acts on
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskEntity {
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub entity_type: Option<String>,

    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskLinks {
    #[serde(rename = "_self", default)]
    pub self_link: Option<HateoasLink>,

    #[serde(rename = "update-task", default)]
    pub update_task: Option<HateoasLink>,
}

/// A long running operation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: String,

    #[serde(rename = "type")]
    pub task_type: Option<String>,

    pub status: Option<String>,

    pub category: Option<String>,

    pub organizational_unit_id: Option<String>,

    pub primary_entity: Option<TaskEntity>,

    pub parent_entity: Option<TaskEntity>,

    pub progress_percentage: Option<f64>,

    pub created_timestamp: Option<String>,

    pub start_timestamp: Option<String>,

    pub end_timestamp: Option<String>,

    #[serde(rename = "_links", default)]
    pub links: TaskLinks,
}

impl Task {
    /// Whether the task reached a final status
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some("completed" | "failed" | "aborted" | "completed_with_errors")
        )
    }
}

/// Body of a task update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdateRequest {
    pub status: String,
}

impl TaskUpdateRequest {
    pub fn abort() -> Self {
        Self {
            status: STATUS_ABORTED.to_string(),
        }
    }
}

/// Filter on the entity a task acts on, rendered as `primary_entity.*`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEntityFilter {
    pub entity_type: Option<Constraint>,
    pub id: Option<Constraint>,
    pub value: Option<Constraint>,
}

impl FilterTypes for TaskEntityFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("type", self.entity_type.clone())
            .set("id", self.id.clone())
            .set("value", self.value.clone())
    }
}

/// Fields accepted by the `filter` parameter of the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksFilter {
    pub status: Option<Constraint>,
    pub task_type: Option<Constraint>,
    pub category: Option<Constraint>,
    pub start_timestamp: Option<Constraint>,
    pub primary_entity: Option<TaskEntityFilter>,
    pub parent_entity: Option<TaskEntityFilter>,
}

impl FilterTypes for TasksFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("status", self.status.clone())
            .set("type", self.task_type.clone())
            .set("category", self.category.clone())
            .set("start_timestamp", self.start_timestamp.clone())
            .set_nested("primary_entity", self.primary_entity.as_ref())
            .set_nested("parent_entity", self.parent_entity.as_ref())
    }
}
