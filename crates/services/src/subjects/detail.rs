use std::sync::Arc;

use tracing::{debug, warn};

use hoctap_core::model::{ChapterId, ChapterSummary, LessonSummary, SubjectHeader};
use hoctap_core::normalize::{normalize_chapters, normalize_lessons};

use super::disclosure::{ChapterDisclosure, ChapterPhase, LessonRequest, LessonSlot};
use crate::api::CatalogGateway;

/// Shown when the chapter list fails without a usable reason.
pub const CHAPTERS_FALLBACK_MESSAGE: &str = "Không thể tải danh sách chương.";
/// Shown when a chapter's lessons fail without a usable reason.
pub const LESSONS_FALLBACK_MESSAGE: &str = "Không thể tải bài học.";

/// Loading state of the chapter list itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChapterListState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Subject detail view: header, chapter list and lazily loaded lessons.
///
/// Every async operation takes `&mut self`, so at most one fetch is in
/// flight per view.
pub struct SubjectDetail {
    header: SubjectHeader,
    gateway: Arc<dyn CatalogGateway>,
    chapters: ChapterListState,
    disclosure: ChapterDisclosure,
}

impl SubjectDetail {
    #[must_use]
    pub fn new(header: SubjectHeader, gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            header,
            gateway,
            chapters: ChapterListState::Idle,
            disclosure: ChapterDisclosure::new(),
        }
    }

    #[must_use]
    pub fn header(&self) -> &SubjectHeader {
        &self.header
    }

    #[must_use]
    pub fn chapter_state(&self) -> &ChapterListState {
        &self.chapters
    }

    #[must_use]
    pub fn chapters(&self) -> &[ChapterSummary] {
        self.disclosure.chapters()
    }

    #[must_use]
    pub fn disclosure(&self) -> &ChapterDisclosure {
        &self.disclosure
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&ChapterId> {
        self.disclosure.expanded()
    }

    #[must_use]
    pub fn phase(&self, chapter_id: &ChapterId) -> ChapterPhase {
        self.disclosure.phase(chapter_id)
    }

    #[must_use]
    pub fn lesson_slot(&self, chapter_id: &ChapterId) -> &LessonSlot {
        self.disclosure.slot(chapter_id)
    }

    #[must_use]
    pub fn lessons(&self, chapter_id: &ChapterId) -> &[LessonSummary] {
        self.disclosure.lessons(chapter_id)
    }

    /// Fetch the chapter list, pre-expand the first chapter and fetch its
    /// lessons. On failure the list is emptied and the reason is kept in
    /// `chapter_state`.
    pub async fn load_chapters(&mut self) {
        self.chapters = ChapterListState::Loading;
        let subject_id = self.header.id.clone();

        match self.gateway.fetch_chapters_by_subject(&subject_id).await {
            Ok(records) => {
                let chapters = normalize_chapters(&records);
                debug!(subject = %subject_id, count = chapters.len(), "chapters loaded");
                self.chapters = ChapterListState::Loaded;
                if let Some(request) = self.disclosure.set_chapters(chapters) {
                    self.fetch_lessons(request).await;
                }
            }
            Err(err) => {
                warn!(subject = %subject_id, error = %err, "chapter list failed");
                self.disclosure.clear_chapters();
                self.chapters =
                    ChapterListState::Failed(err.user_message(CHAPTERS_FALLBACK_MESSAGE));
            }
        }
    }

    /// Pull-to-refresh: refetch the chapter list. Lessons already cached
    /// for a chapter are kept.
    pub async fn reload_chapters(&mut self) {
        self.load_chapters().await;
    }

    /// Expand or collapse a chapter, fetching its lessons when needed.
    pub async fn toggle_chapter(&mut self, chapter_id: &ChapterId) {
        if let Some(request) = self.disclosure.toggle(chapter_id) {
            self.fetch_lessons(request).await;
        }
    }

    async fn fetch_lessons(&mut self, request: LessonRequest) {
        let chapter_id = request.chapter_id;
        self.disclosure.begin_lessons(&chapter_id);

        let result = match self.gateway.fetch_lessons_by_chapter(&chapter_id).await {
            Ok(records) => Ok(normalize_lessons(&records, &chapter_id)),
            Err(err) => {
                warn!(chapter = %chapter_id, error = %err, "lesson list failed");
                Err(err.user_message(LESSONS_FALLBACK_MESSAGE))
            }
        };
        self.disclosure.finish_lessons(&chapter_id, result);
    }
}
