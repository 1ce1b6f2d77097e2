use serde::Serialize;

use crate::model::ids::ChapterId;

/// Chapter row of a subject, with lesson counts and derived progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterSummary {
    pub id: ChapterId,
    pub title: String,
    pub description: String,
    pub completed_lessons: u32,
    pub total_lessons: u32,
    pub progress_percent: u8,
}

impl ChapterSummary {
    /// `"completed/total"` when the total is known, otherwise `"percent%"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        if self.total_lessons > 0 {
            format!("{}/{}", self.completed_lessons, self.total_lessons)
        } else {
            format!("{}%", self.progress_percent)
        }
    }
}
