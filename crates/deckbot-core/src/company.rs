//! Company records
//!
//! Field names follow the Databook wire format (camelCase, Mongo `_id`).
//! Overview fields other than the name are optional because the API omits
//! them for thinly covered companies.

use serde::{Deserialize, Serialize};

/// Entry of the company list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl CompanyRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A fiscal quarter reference, e.g. Q3 2019
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterRef {
    pub quarter: u8,
    pub year: i32,
}

/// Most recent reported revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestRevenue {
    pub quarter: u8,
    pub year: i32,
    /// Revenue in billions of US dollars
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
}

impl LatestRevenue {
    pub fn period(&self) -> QuarterRef {
        QuarterRef {
            quarter: self.quarter,
            year: self.year,
        }
    }
}

/// Company overview as returned by `GET /api/companies/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub latest_revenue: Option<LatestRevenue>,
    pub latest_revenue_growth: Option<QuarterRef>,
    /// Headcount in millions
    pub employees: Option<f64>,
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub company_type: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub current_quarter: Option<serde_json::Value>,
    /// ISO 8601 timestamp of the current quarter's end
    pub quarter_end: Option<String>,
    /// Month number (1-12) of the fiscal year end
    pub fiscal_year_end: Option<u32>,
}

impl Company {
    /// Headcount as a whole number of employees
    ///
    /// `employees` is in millions and is rounded, not truncated: 0.137 is
    /// 137,000 even though `0.137 * 1e6` is slightly below it in binary.
    pub fn employee_count(&self) -> Option<u64> {
        self.employees
            .filter(|e| e.is_finite() && *e >= 0.0)
            .map(|e| (e * 1_000_000.0).round() as u64)
    }

    /// Date part (`YYYY-MM-DD`) of the quarter end timestamp
    pub fn quarter_end_date(&self) -> Option<&str> {
        self.quarter_end
            .as_deref()
            .map(|s| s.get(..10).unwrap_or(s))
    }

    /// Current quarter rendered as text regardless of its JSON type
    pub fn current_quarter_text(&self) -> Option<String> {
        match self.current_quarter.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
