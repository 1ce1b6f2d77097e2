//! Heterogeneous server records into canonical summaries.
//!
//! Every function here is total: missing or malformed fields fall back to a
//! defined default, so the only failures in a listing flow come from the
//! transport one layer up.

mod auth;
pub mod fields;
mod header;

pub use auth::extract_auth_session;
pub use header::{
    DEFAULT_SUBJECT_NAME, DEFAULT_TOTAL_UNITS_TEXT, HEADER_ID_KEYS, resolve_subject_header,
};

use serde_json::Value;

use crate::model::progress::{clamp_fraction, clamp_percent, count_from, ratio_percent_f64};
use crate::model::{
    ChapterId, ChapterSummary, ClassId, ClassRef, LessonId, LessonStatus, LessonSummary,
    SubjectId, SubjectSummary,
};
use crate::style::style_for;
use fields::{first_number, first_text, record_id};

pub(crate) const NAME_KEYS: &[&str] = &["name", "title"];
const SUBJECT_DESCRIPTION_KEYS: &[&str] = &["description", "subtitle"];
const CHAPTER_DESCRIPTION_KEYS: &[&str] = &["description", "summary"];
const SUBJECT_COMPLETED_KEYS: &[&str] = &[
    "completedLessons",
    "completed",
    "completedUnits",
    "completedChapters",
];
const SUBJECT_TOTAL_KEYS: &[&str] = &[
    "totalLessons",
    "total",
    "totalUnits",
    "totalChapters",
    "lessonCount",
];
const CHAPTER_COMPLETED_KEYS: &[&str] = &["completedLessons", "completed", "completedUnits"];
const CHAPTER_TOTAL_KEYS: &[&str] = &["totalLessons", "total", "totalUnits", "lessonCount"];
pub(crate) const PERCENT_KEYS: &[&str] = &["progressPercent", "progress", "percentage"];
const DURATION_KEYS: &[&str] = &["duration", "time", "readingTime", "estimatedTime"];

/// Shown when a lesson has no duration of any kind.
pub const MISSING_DURATION: &str = "—";

fn ordinal_label(generic: &str, index: usize) -> String {
    format!("{generic} {}", index.saturating_add(1))
}

/// Raw completed/total pair; the percent is derived before counts are truncated.
struct Counts {
    completed: f64,
    total: f64,
}

impl Counts {
    fn read(record: &Value, completed_keys: &[&str], total_keys: &[&str]) -> Self {
        Self {
            completed: first_number(record, completed_keys).unwrap_or(0.0),
            total: first_number(record, total_keys).unwrap_or(0.0),
        }
    }

    fn percent(&self) -> u8 {
        ratio_percent_f64(self.completed, self.total)
    }

    fn whole(&self) -> (u32, u32) {
        (count_from(self.completed), count_from(self.total))
    }
}

#[must_use]
pub fn normalize_class(record: &Value, index: usize) -> ClassRef {
    let id = record_id(record).unwrap_or_else(|| format!("class-{index}"));
    let name = first_text(record, NAME_KEYS).unwrap_or_else(|| ordinal_label("Lớp", index));
    ClassRef::new(ClassId::new(id), name)
}

#[must_use]
pub fn normalize_subject(record: &Value, index: usize) -> SubjectSummary {
    let id = record_id(record).unwrap_or_else(|| format!("subject-{index}"));
    let name = first_text(record, NAME_KEYS).unwrap_or_else(|| ordinal_label("Môn học", index));
    let style = style_for(index);
    let color = first_text(record, &["color"]).unwrap_or_else(|| style.color.to_owned());
    let icon = first_text(record, &["icon"]).unwrap_or_else(|| style.icon.to_owned());

    let counts = Counts::read(record, SUBJECT_COMPLETED_KEYS, SUBJECT_TOTAL_KEYS);
    let (completed, total) = counts.whole();
    let progress_percent = first_number(record, PERCENT_KEYS)
        .map_or_else(|| counts.percent(), clamp_percent);
    let progress_text = first_text(record, &["progressText"]).unwrap_or_else(|| {
        if total > 0 {
            format!("{completed}/{total} Hoàn thành")
        } else {
            format!("{progress_percent}% Hoàn thành")
        }
    });
    let description = first_text(record, SUBJECT_DESCRIPTION_KEYS).unwrap_or_default();

    SubjectSummary {
        id: SubjectId::new(id),
        name,
        color,
        icon,
        progress_percent,
        progress_text,
        description,
        raw: record.clone(),
    }
}

#[must_use]
pub fn normalize_chapter(record: &Value, index: usize) -> ChapterSummary {
    let id = record_id(record).unwrap_or_else(|| format!("chapter-{index}"));
    let title = first_text(record, NAME_KEYS).unwrap_or_else(|| ordinal_label("Chương", index));
    let description = first_text(record, CHAPTER_DESCRIPTION_KEYS).unwrap_or_default();
    let counts = Counts::read(record, CHAPTER_COMPLETED_KEYS, CHAPTER_TOTAL_KEYS);
    let (completed_lessons, total_lessons) = counts.whole();

    ChapterSummary {
        id: ChapterId::new(id),
        title,
        description,
        completed_lessons,
        total_lessons,
        progress_percent: counts.percent(),
    }
}

#[must_use]
pub fn normalize_lesson(record: &Value, chapter_id: &ChapterId, index: usize) -> LessonSummary {
    let id = record_id(record).unwrap_or_else(|| format!("lesson-{chapter_id}-{index}"));
    let title = first_text(record, NAME_KEYS).unwrap_or_else(|| ordinal_label("Bài", index));
    let duration =
        first_text(record, DURATION_KEYS).unwrap_or_else(|| MISSING_DURATION.to_owned());
    let status = first_text(record, &["status"])
        .map_or(LessonStatus::Locked, |raw| LessonStatus::parse_lenient(&raw));
    let progress = first_number(record, &["progress"])
        .map_or_else(|| status.default_progress(), clamp_fraction);

    LessonSummary {
        id: LessonId::new(id),
        title,
        duration,
        status,
        progress,
    }
}

#[must_use]
pub fn normalize_classes(records: &[Value]) -> Vec<ClassRef> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_class(record, index))
        .collect()
}

#[must_use]
pub fn normalize_subjects(records: &[Value]) -> Vec<SubjectSummary> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_subject(record, index))
        .collect()
}

#[must_use]
pub fn normalize_chapters(records: &[Value]) -> Vec<ChapterSummary> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_chapter(record, index))
        .collect()
}

#[must_use]
pub fn normalize_lessons(records: &[Value], chapter_id: &ChapterId) -> Vec<LessonSummary> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_lesson(record, chapter_id, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chapter_scenario_three_of_four() {
        let chapter = normalize_chapter(&json!({ "completedLessons": 3, "totalLessons": 4 }), 0);
        assert_eq!(chapter.completed_lessons, 3);
        assert_eq!(chapter.total_lessons, 4);
        assert_eq!(chapter.progress_percent, 75);
    }

    #[test]
    fn chapter_with_zero_total_has_zero_percent() {
        for completed in [0, 1, 50] {
            let chapter = normalize_chapter(&json!({ "completed": completed, "total": 0 }), 2);
            assert_eq!(chapter.progress_percent, 0);
        }
    }

    #[test]
    fn chapter_defaults() {
        let chapter = normalize_chapter(&json!({}), 1);
        assert_eq!(chapter.id, ChapterId::new("chapter-1"));
        assert_eq!(chapter.title, "Chương 2");
        assert_eq!(chapter.description, "");
        assert_eq!(chapter.progress_label(), "0%");
    }

    #[test]
    fn chapter_synonym_fields() {
        let chapter = normalize_chapter(
            &json!({
                "_id": "ch-9",
                "title": "Hình học",
                "summary": "Tam giác",
                "completedUnits": 2,
                "lessonCount": 8
            }),
            0,
        );
        assert_eq!(chapter.id, ChapterId::new("ch-9"));
        assert_eq!(chapter.title, "Hình học");
        assert_eq!(chapter.description, "Tam giác");
        assert_eq!(chapter.progress_percent, 25);
    }

    #[test]
    fn chapter_ignores_subject_only_fields() {
        let chapter = normalize_chapter(
            &json!({
                "completedChapters": 2,
                "totalChapters": 4,
                "subtitle": "Không dùng"
            }),
            0,
        );
        assert_eq!(chapter.completed_lessons, 0);
        assert_eq!(chapter.total_lessons, 0);
        assert_eq!(chapter.progress_percent, 0);
        assert_eq!(chapter.description, "");
    }

    #[test]
    fn fractional_counts_keep_exact_ratio() {
        let chapter =
            normalize_chapter(&json!({ "completedLessons": 2.5, "totalLessons": 5 }), 0);
        assert_eq!(chapter.progress_percent, 50);
        assert_eq!(chapter.completed_lessons, 2);
        assert_eq!(chapter.total_lessons, 5);

        let subject = normalize_subject(&json!({ "completed": 2.5, "total": 5 }), 0);
        assert_eq!(subject.progress_percent, 50);
        assert_eq!(subject.progress_text, "2/5 Hoàn thành");
    }

    #[test]
    fn subject_description_skips_summary() {
        let subject = normalize_subject(&json!({ "summary": "Tóm tắt", "subtitle": "Phụ đề" }), 0);
        assert_eq!(subject.description, "Phụ đề");
        assert_eq!(normalize_subject(&json!({ "summary": "Tóm tắt" }), 0).description, "");
    }

    #[test]
    fn subject_percent_is_clamped_for_any_source() {
        for raw in [-40.0, -0.5, 0.0, 37.4, 100.0, 100.6, 250.0] {
            let subject = normalize_subject(&json!({ "progressPercent": raw }), 0);
            assert!(subject.progress_percent <= 100, "{raw}");
        }
        assert_eq!(normalize_subject(&json!({ "progress": -3 }), 0).progress_percent, 0);
        assert_eq!(normalize_subject(&json!({ "percentage": 180 }), 0).progress_percent, 100);

        let overfull = normalize_subject(&json!({ "completed": 9, "total": 3 }), 0);
        assert_eq!(overfull.progress_percent, 100);
    }

    #[test]
    fn subject_defaults_use_index_styling() {
        let first = normalize_subject(&json!({}), 0);
        let second = normalize_subject(&json!({}), 1);
        assert_eq!(first.id, SubjectId::new("subject-0"));
        assert_eq!(first.name, "Môn học 1");
        assert_eq!(first.color, "#2f6aff");
        assert_eq!(second.icon, "calculator-outline");
        assert_ne!(first.color, second.color);
        assert_eq!(first.progress_text, "0% Hoàn thành");
        assert_eq!(first.description, "");
    }

    #[test]
    fn subject_explicit_styling_and_text() {
        let subject = normalize_subject(
            &json!({
                "id": 7,
                "name": "Vật lý",
                "color": "#123456",
                "icon": "flask-outline",
                "completedChapters": 1,
                "totalChapters": 4,
                "subtitle": "Cơ học"
            }),
            3,
        );
        assert_eq!(subject.id, SubjectId::new("7"));
        assert_eq!(subject.color, "#123456");
        assert_eq!(subject.icon, "flask-outline");
        assert_eq!(subject.progress_percent, 25);
        assert_eq!(subject.progress_text, "1/4 Hoàn thành");
        assert_eq!(subject.description, "Cơ học");
        assert_eq!(subject.raw["name"], "Vật lý");

        let custom = normalize_subject(&json!({ "progressText": "Sắp xong" }), 0);
        assert_eq!(custom.progress_text, "Sắp xong");
    }

    #[test]
    fn lesson_in_progress_defaults_to_half() {
        let lesson = normalize_lesson(&json!({ "status": "in-progress" }), &ChapterId::new("c"), 0);
        assert_eq!(lesson.status, LessonStatus::InProgress);
        assert!((lesson.progress - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn lesson_defaults() {
        let lesson = normalize_lesson(&json!({}), &ChapterId::new("math-ch-1"), 2);
        assert_eq!(lesson.id, LessonId::new("lesson-math-ch-1-2"));
        assert_eq!(lesson.title, "Bài 3");
        assert_eq!(lesson.duration, MISSING_DURATION);
        assert_eq!(lesson.status, LessonStatus::Locked);
        assert!(lesson.progress.abs() < f64::EPSILON);
    }

    #[test]
    fn lesson_explicit_progress_wins_and_is_clamped() {
        let chapter = ChapterId::new("c");
        let lesson =
            normalize_lesson(&json!({ "status": "completed", "progress": 0.25 }), &chapter, 0);
        assert!((lesson.progress - 0.25).abs() < f64::EPSILON);

        let lesson = normalize_lesson(&json!({ "status": "locked", "progress": 3 }), &chapter, 0);
        assert!((lesson.progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lesson_duration_synonyms() {
        let chapter = ChapterId::new("c");
        let lesson = normalize_lesson(&json!({ "readingTime": "12 phút" }), &chapter, 0);
        assert_eq!(lesson.duration, "12 phút");
        let lesson = normalize_lesson(&json!({ "estimatedTime": 15 }), &chapter, 0);
        assert_eq!(lesson.duration, "15");
    }

    #[test]
    fn class_defaults_and_ids() {
        let classes = normalize_classes(&[json!({ "_id": "10A", "name": "Lớp 10A" }), json!({})]);
        assert_eq!(classes[0], ClassRef::new(ClassId::new("10A"), "Lớp 10A"));
        assert_eq!(classes[1], ClassRef::new(ClassId::new("class-1"), "Lớp 2"));
    }

    #[test]
    fn list_helpers_keep_positions() {
        let chapter = ChapterId::new("c");
        let lessons = normalize_lessons(&[json!({ "id": "a" }), json!({})], &chapter);
        assert_eq!(lessons[0].id, LessonId::new("a"));
        assert_eq!(lessons[1].id, LessonId::new("lesson-c-1"));

        let chapters = normalize_chapters(&[json!(null), json!({ "name": "Một" })]);
        assert_eq!(chapters[0].title, "Chương 1");
        assert_eq!(chapters[1].title, "Một");

        let subjects = normalize_subjects(&[json!({}), json!({}), json!({})]);
        assert_eq!(subjects[2].id, SubjectId::new("subject-2"));
    }
}
