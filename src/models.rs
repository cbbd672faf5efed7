use serde::{Deserialize, Serialize};

use crate::report::StylePreset;

// ---------- API (wire) types: owned & serde-friendly ----------

#[derive(Serialize, Deserialize, Clone)]
pub struct AllocateRequest {
    /// Rows are agents, columns are resources
    pub valuations: Vec<Vec<f64>>,
    /// Backend name; the server default applies when absent
    #[serde(default)]
    pub solver: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Table,
}

#[derive(Deserialize, Default)]
pub struct AllocateQuery {
    #[serde(default)]
    pub format: ResponseFormat,
    #[serde(default)]
    pub style: StylePreset,
}

// ---------- API response types (decoupled from the domain) ----------

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ApiAllocation {
    pub allocation: Vec<Vec<f64>>,
    pub utilities: Vec<f64>,
    pub min_utility: f64,
    pub solver: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ApiError {
    pub error: String,
    pub kind: String,
}
