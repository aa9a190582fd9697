//! The data-access seam used by deck orchestration

use crate::client::DatabookClient;
use crate::error::Result;
use async_trait::async_trait;
use deckbot_core::{Company, CompanyRef, MetricDetail, MetricRef};

/// Source of the records a factpack is built from
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// List every available company
    async fn list_companies(&self) -> Result<Vec<CompanyRef>>;

    /// Fetch a company overview
    async fn company_overview(&self, company_id: &str) -> Result<Company>;

    /// List the metrics offered for a company
    async fn company_metrics(&self, company_id: &str) -> Result<Vec<MetricRef>>;

    /// Fetch one metric with its chart data
    async fn metric_detail(&self, company_id: &str, metric_id: &str) -> Result<MetricDetail>;

    /// Download an external asset
    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl CompanySource for DatabookClient {
    async fn list_companies(&self) -> Result<Vec<CompanyRef>> {
        DatabookClient::list_companies(self).await
    }

    async fn company_overview(&self, company_id: &str) -> Result<Company> {
        DatabookClient::company_overview(self, company_id).await
    }

    async fn company_metrics(&self, company_id: &str) -> Result<Vec<MetricRef>> {
        DatabookClient::company_metrics(self, company_id).await
    }

    async fn metric_detail(&self, company_id: &str, metric_id: &str) -> Result<MetricDetail> {
        DatabookClient::metric_detail(self, company_id, metric_id).await
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        DatabookClient::fetch_asset(self, url).await
    }
}
