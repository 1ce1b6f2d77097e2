use serde::Serialize;

use crate::model::ids::LessonId;
use crate::model::progress::fraction_percent;

/// Learner's state for a single lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonStatus {
    Completed,
    InProgress,
    Locked,
}

impl LessonStatus {
    /// Parses a server status; unknown values are treated as locked.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "completed" => Self::Completed,
            "in-progress" => Self::InProgress,
            _ => Self::Locked,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Locked => "locked",
        }
    }

    /// Progress assumed when the server does not report one.
    #[must_use]
    pub fn default_progress(self) -> f64 {
        match self {
            Self::Completed => 1.0,
            Self::InProgress => 0.5,
            Self::Locked => 0.0,
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// Lesson row inside an expanded chapter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    /// Free text such as `"25 phút"`.
    pub duration: String,
    pub status: LessonStatus,
    /// Within `0.0..=1.0`.
    pub progress: f64,
}

impl LessonSummary {
    /// Whole-number percentage of `progress`.
    #[must_use]
    pub fn percent(&self) -> u8 {
        fraction_percent(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_locked() {
        assert_eq!(LessonStatus::parse_lenient("archived"), LessonStatus::Locked);
        assert_eq!(
            LessonStatus::parse_lenient("in-progress"),
            LessonStatus::InProgress
        );
    }

    #[test]
    fn default_progress_per_status() {
        assert!((LessonStatus::Completed.default_progress() - 1.0).abs() < f64::EPSILON);
        assert!((LessonStatus::InProgress.default_progress() - 0.5).abs() < f64::EPSILON);
        assert!(LessonStatus::Locked.default_progress().abs() < f64::EPSILON);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&LessonStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn percent_rounds_progress() {
        let lesson = LessonSummary {
            id: LessonId::new("l1"),
            title: "Giá trị tuyệt đối".into(),
            duration: "20 phút".into(),
            status: LessonStatus::InProgress,
            progress: 0.6,
        };
        assert_eq!(lesson.percent(), 60);
    }
}
