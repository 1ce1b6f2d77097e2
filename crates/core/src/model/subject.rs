use serde::Serialize;
use serde_json::Value;

use crate::model::ids::SubjectId;

/// Subject card as shown in the subject list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub id: SubjectId,
    pub name: String,
    pub color: String,
    pub icon: String,
    /// Always within `0..=100`.
    pub progress_percent: u8,
    pub progress_text: String,
    pub description: String,
    /// Server record the summary was built from; handed on to the detail view.
    #[serde(skip)]
    pub raw: Value,
}

/// Header of the subject detail view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubjectHeader {
    pub id: SubjectId,
    pub name: String,
    pub grade: String,
    pub color: String,
    pub icon: String,
    pub progress_percent: u8,
    pub total_units_text: String,
}
