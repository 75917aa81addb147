use clumio_rust_filter::{Constraint, FilterSpec, FilterTypes};
use serde::{Deserialize, Serialize};

use crate::types::HateoasSelfLink;

/// A generated report file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportDownload {
    pub id: String,

    pub file_name: Option<String>,

    #[serde(rename = "type")]
    pub report_type: Option<String>,

    pub status: Option<String>,

    pub task_id: Option<String>,

    /// Filter the report was generated with
    pub filters: Option<String>,

    pub download_link: Option<String>,

    pub start_timestamp: Option<String>,

    pub end_timestamp: Option<String>,

    pub expiration_timestamp: Option<String>,

    #[serde(rename = "_links", default)]
    pub links: HateoasSelfLink,
}

/// Body of a report generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDownloadRequest {
    #[serde(rename = "type")]
    pub report_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Selection of the report content, in filter syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ReportDownloadRequest {
    pub fn new(report_type: &str) -> Self {
        Self {
            report_type: report_type.to_string(),
            file_name: None,
            filter: None,
        }
    }

    pub fn with_file_name(mut self, value: &str) -> Self {
        self.file_name = Some(value.to_string());
        self
    }

    pub fn with_filter<F: FilterTypes>(mut self, filter: &F) -> Self {
        self.filter = Some(filter.query_str());
        self
    }
}

/// Response of a report generation request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportDownloadTask {
    pub task_id: String,
}

/// Content selection of a compliance report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceReportFilter {
    pub timestamp: Option<Constraint>,
    pub asset_type: Option<Constraint>,
    pub data_source: Option<Constraint>,
    pub organizational_unit: Option<Constraint>,
    pub compliance_status: Option<Constraint>,
}

impl FilterTypes for ComplianceReportFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("timestamp", self.timestamp.clone())
            .set("asset_type", self.asset_type.clone())
            .set("data_source", self.data_source.clone())
            .set("organizational_unit", self.organizational_unit.clone())
            .set("compliance_status", self.compliance_status.clone())
    }
}

/// Fields accepted by the `filter` parameter of the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDownloadsFilter {
    pub report_type: Option<Constraint>,
    pub task_id: Option<Constraint>,
    pub start_timestamp: Option<Constraint>,
}

impl FilterTypes for ReportDownloadsFilter {
    fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .set("report_type", self.report_type.clone())
            .set("task_id", self.task_id.clone())
            .set("start_timestamp", self.start_timestamp.clone())
    }
}
