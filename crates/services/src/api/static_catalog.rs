use async_trait::async_trait;
use serde_json::{Value, json};

use hoctap_core::catalog::{self, CatalogChapter, CatalogLesson, CatalogSubject};
use hoctap_core::model::{ChapterId, ClassId, SubjectId};

use super::{CatalogGateway, require_id};
use crate::error::ApiError;

/// Serves the bundled catalog in the same record shapes the backend uses.
///
/// Classes are the distinct grades of the bundled subjects. Unknown ids
/// yield empty lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn find_chapter(id: &str) -> Option<&'static CatalogChapter> {
        catalog::subjects()
            .iter()
            .find_map(|subject| subject.chapter(id))
    }
}

fn grades() -> Vec<&'static str> {
    let mut grades: Vec<&'static str> = Vec::new();
    for subject in catalog::subjects() {
        if !grades.contains(&subject.grade) {
            grades.push(subject.grade);
        }
    }
    grades
}

fn subject_record(subject: &CatalogSubject) -> Value {
    let completed: u32 = subject.chapters.iter().map(|c| c.completed).sum();
    let total: u32 = subject.chapters.iter().map(|c| c.total).sum();
    json!({
        "_id": subject.id,
        "name": subject.name,
        "grade": subject.grade,
        "color": subject.color,
        "icon": subject.icon,
        "progress": subject.progress,
        "progressPercent": subject.progress_percent(),
        "completedLessons": completed,
        "totalLessons": total,
        "description": subject.total_units_text,
        "totalUnitsText": subject.total_units_text,
    })
}

fn chapter_record(chapter: &CatalogChapter) -> Value {
    json!({
        "_id": chapter.id,
        "title": chapter.title,
        "description": chapter.description,
        "completedLessons": chapter.completed,
        "totalLessons": chapter.total,
    })
}

fn lesson_record(lesson: &CatalogLesson) -> Value {
    let mut record = json!({
        "_id": lesson.id,
        "title": lesson.title,
        "duration": lesson.duration,
        "status": lesson.status.as_str(),
    });
    if let (Some(progress), Value::Object(map)) = (lesson.progress, &mut record) {
        map.insert("progress".into(), json!(progress));
    }
    record
}

#[async_trait]
impl CatalogGateway for StaticCatalog {
    async fn fetch_classes(&self) -> Result<Vec<Value>, ApiError> {
        Ok(grades()
            .into_iter()
            .map(|grade| json!({ "_id": grade, "name": grade }))
            .collect())
    }

    async fn fetch_subjects_by_class(&self, class_id: &ClassId) -> Result<Vec<Value>, ApiError> {
        let grade = require_id(class_id.as_str(), "classId")?;
        Ok(catalog::subjects()
            .iter()
            .filter(|subject| subject.grade == grade)
            .map(subject_record)
            .collect())
    }

    async fn fetch_chapters_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<Value>, ApiError> {
        let id = require_id(subject_id.as_str(), "subjectId")?;
        Ok(catalog::subject_by_id(id)
            .map(|subject| subject.chapters.iter().map(chapter_record).collect())
            .unwrap_or_default())
    }

    async fn fetch_lessons_by_chapter(
        &self,
        chapter_id: &ChapterId,
    ) -> Result<Vec<Value>, ApiError> {
        let id = require_id(chapter_id.as_str(), "chapterId")?;
        Ok(Self::find_chapter(id)
            .map(|chapter| chapter.lessons.iter().map(lesson_record).collect())
            .unwrap_or_default())
    }
}
