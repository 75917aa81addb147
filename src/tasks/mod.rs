//! Tasks

mod types;

pub use types::*;

use clumio_rust_filter::FilterTypes;

use crate::error::Result;
use crate::fetch::{resource_path, Fetch};
use crate::pagination::Paginator;
use crate::types::ListResponse;

const PATH: &str = "/tasks";
const MEDIA_TYPE: &str = "application/api.clumio.tasks=v1+json";

/// Client for the task endpoints
#[derive(Debug, Clone)]
pub struct TasksController {
    fetch: Fetch,
}

impl TasksController {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self { fetch }
    }

    pub async fn list_tasks(
        &self,
        limit: Option<u32>,
        start: Option<&str>,
        filter: Option<&TasksFilter>,
    ) -> Result<ListResponse<Task>> {
        self.list_with_query(
            limit,
            start.map(str::to_string),
            filter.map(|f| f.query_str()),
        )
        .await
    }

    pub fn list_tasks_pages(
        &self,
        limit: Option<u32>,
        filter: Option<&TasksFilter>,
    ) -> Paginator<ListResponse<Task>> {
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
    ) -> Result<ListResponse<Task>> {
        self.fetch
            .get(PATH)
            .accept(MEDIA_TYPE)
            .query_opt("limit", limit)
            .query_opt("start", start)
            .query_opt("filter", filter)
            .execute()
            .await
    }

    pub async fn read_task(&self, task_id: &str) -> Result<Task> {
        self.fetch
            .get(&resource_path(PATH, task_id)?)
            .accept(MEDIA_TYPE)
            .execute()
            .await
    }

    pub async fn update_task(&self, task_id: &str, body: &TaskUpdateRequest) -> Result<Task> {
        self.fetch
            .patch(&resource_path(PATH, task_id)?)
            .accept(MEDIA_TYPE)
            .json(body)?
            .execute()
            .await
    }

    /// Abort a queued or running task
    pub async fn cancel_task(&self, task_id: &str) -> Result<Task> {
        log::debug!("cancelling task {}", task_id);
        self.update_task(task_id, &TaskUpdateRequest::abort()).await
    }
}
