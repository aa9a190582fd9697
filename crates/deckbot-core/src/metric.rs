//! Metric records
//!
//! A metric detail carries one or more chart blocks; each block lists the
//! company and its peers with their data points for every reported period.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/companies/{id}/metrics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// One data point of a company series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: f64,
    /// Display label, e.g. `2018` or `LTM Q3 2019`
    pub label: String,
    /// Period code: `ltm` or `y`
    #[serde(default)]
    pub period: String,
    /// Named groups the point belongs to, e.g. `Last 3 years`
    #[serde(default)]
    pub groups: Vec<String>,
}

impl DataPoint {
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// Series of data points for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySeries {
    pub name: String,
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

/// One chart of a metric: the company alongside its peers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartBlock {
    #[serde(default)]
    pub companies: Vec<CompanySeries>,
}

/// Metric detail as returned by `GET /api/companies/{id}/metrics/{metric_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub chart: Vec<ChartBlock>,
}

impl MetricDetail {
    /// Series of the first chart block, the one decks are built from
    pub fn primary_series(&self) -> &[CompanySeries] {
        self.chart
            .first()
            .map(|block| block.companies.as_slice())
            .unwrap_or_default()
    }

    /// Description with line breaks flattened to spaces
    pub fn flat_description(&self) -> String {
        self.description
            .as_deref()
            .unwrap_or_default()
            .replace('\n', " ")
    }
}
