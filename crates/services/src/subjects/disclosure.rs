//! Progressive disclosure of chapters and their lessons.
//!
//! At most one chapter is expanded at a time. Lessons are fetched lazily the
//! first time a chapter is expanded and cached per chapter; a failed fetch
//! is retried only when the learner expands the chapter again.

use std::collections::HashMap;

use hoctap_core::model::{ChapterId, ChapterSummary, LessonSummary};

/// Cached lessons of one chapter.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LessonSlot {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<LessonSummary>),
    Failed(String),
}

impl LessonSlot {
    /// Whether expanding the chapter should start a fetch.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Self::NotLoaded | Self::Failed(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonSummary] {
        match self {
            Self::Loaded(lessons) => lessons,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What a chapter row shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChapterPhase {
    Collapsed,
    LoadingLessons,
    Loaded,
    LoadError,
}

/// A lesson fetch the caller must perform and report back through
/// `ChapterDisclosure::finish_lessons`.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRequest {
    pub chapter_id: ChapterId,
}

static NOT_LOADED: LessonSlot = LessonSlot::NotLoaded;

#[derive(Clone, Debug, Default)]
pub struct ChapterDisclosure {
    chapters: Vec<ChapterSummary>,
    expanded: Option<ChapterId>,
    lessons: HashMap<ChapterId, LessonSlot>,
}

impl ChapterDisclosure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chapter list and pre-expand the first chapter.
    ///
    /// Cached lessons survive a reload, so the returned request is `None`
    /// when the first chapter is already loaded or loading.
    pub fn set_chapters(&mut self, chapters: Vec<ChapterSummary>) -> Option<LessonRequest> {
        self.expanded = chapters.first().map(|chapter| chapter.id.clone());
        self.chapters = chapters;
        let first = self.expanded.clone()?;
        self.slot(&first)
            .needs_fetch()
            .then_some(LessonRequest { chapter_id: first })
    }

    /// Drop the chapter list; nothing stays expanded.
    pub fn clear_chapters(&mut self) {
        self.chapters.clear();
        self.expanded = None;
    }

    /// Collapse `chapter_id` if it is expanded, otherwise make it the only
    /// expanded chapter. Unknown ids are ignored.
    pub fn toggle(&mut self, chapter_id: &ChapterId) -> Option<LessonRequest> {
        if !self.chapters.iter().any(|chapter| &chapter.id == chapter_id) {
            return None;
        }
        if self.expanded.as_ref() == Some(chapter_id) {
            self.expanded = None;
            return None;
        }
        self.expanded = Some(chapter_id.clone());
        self.slot(chapter_id)
            .needs_fetch()
            .then(|| LessonRequest {
                chapter_id: chapter_id.clone(),
            })
    }

    /// Mark a fetch as started; any previous error is cleared.
    pub fn begin_lessons(&mut self, chapter_id: &ChapterId) {
        self.lessons.insert(chapter_id.clone(), LessonSlot::Loading);
    }

    /// Store the outcome of a fetch for one chapter only.
    pub fn finish_lessons(
        &mut self,
        chapter_id: &ChapterId,
        result: Result<Vec<LessonSummary>, String>,
    ) {
        let slot = match result {
            Ok(lessons) => LessonSlot::Loaded(lessons),
            Err(message) => LessonSlot::Failed(message),
        };
        self.lessons.insert(chapter_id.clone(), slot);
    }

    #[must_use]
    pub fn chapters(&self) -> &[ChapterSummary] {
        &self.chapters
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&ChapterId> {
        self.expanded.as_ref()
    }

    #[must_use]
    pub fn is_expanded(&self, chapter_id: &ChapterId) -> bool {
        self.expanded.as_ref() == Some(chapter_id)
    }

    #[must_use]
    pub fn slot(&self, chapter_id: &ChapterId) -> &LessonSlot {
        self.lessons.get(chapter_id).unwrap_or(&NOT_LOADED)
    }

    #[must_use]
    pub fn lessons(&self, chapter_id: &ChapterId) -> &[LessonSummary] {
        self.slot(chapter_id).lessons()
    }

    #[must_use]
    pub fn phase(&self, chapter_id: &ChapterId) -> ChapterPhase {
        if !self.is_expanded(chapter_id) {
            return ChapterPhase::Collapsed;
        }
        match self.slot(chapter_id) {
            LessonSlot::Loaded(_) => ChapterPhase::Loaded,
            LessonSlot::Failed(_) => ChapterPhase::LoadError,
            LessonSlot::NotLoaded | LessonSlot::Loading => ChapterPhase::LoadingLessons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoctap_core::model::{LessonId, LessonStatus};

    fn chapter(id: &str) -> ChapterSummary {
        ChapterSummary {
            id: ChapterId::new(id),
            title: id.to_owned(),
            description: String::new(),
            completed_lessons: 0,
            total_lessons: 0,
            progress_percent: 0,
        }
    }

    fn lesson(id: &str) -> LessonSummary {
        LessonSummary {
            id: LessonId::new(id),
            title: id.to_owned(),
            duration: "10 phút".into(),
            status: LessonStatus::Locked,
            progress: 0.0,
        }
    }

    fn loaded(ids: &[&str]) -> ChapterDisclosure {
        let mut disclosure = ChapterDisclosure::new();
        let _ = disclosure.set_chapters(ids.iter().copied().map(chapter).collect());
        disclosure
    }

    #[test]
    fn first_chapter_is_pre_expanded_and_requested() {
        let mut disclosure = ChapterDisclosure::new();
        let request = disclosure.set_chapters(vec![chapter("a"), chapter("b")]);
        assert_eq!(
            request,
            Some(LessonRequest {
                chapter_id: ChapterId::new("a")
            })
        );
        assert_eq!(disclosure.expanded(), Some(&ChapterId::new("a")));
        assert_eq!(
            disclosure.phase(&ChapterId::new("a")),
            ChapterPhase::LoadingLessons
        );
        assert_eq!(disclosure.phase(&ChapterId::new("b")), ChapterPhase::Collapsed);
    }

    #[test]
    fn empty_list_expands_nothing() {
        let mut disclosure = ChapterDisclosure::new();
        assert_eq!(disclosure.set_chapters(Vec::new()), None);
        assert_eq!(disclosure.expanded(), None);
    }

    #[test]
    fn toggle_expanded_chapter_collapses_it() {
        let mut disclosure = loaded(&["a", "b"]);
        let a = ChapterId::new("a");
        assert_eq!(disclosure.toggle(&a), None);
        assert_eq!(disclosure.expanded(), None);
        assert_eq!(disclosure.phase(&a), ChapterPhase::Collapsed);
    }

    #[test]
    fn expanding_another_chapter_is_exclusive() {
        let mut disclosure = loaded(&["a", "b"]);
        let (a, b) = (ChapterId::new("a"), ChapterId::new("b"));
        disclosure.begin_lessons(&a);
        disclosure.finish_lessons(&a, Ok(vec![lesson("l1")]));

        let request = disclosure.toggle(&b);
        assert_eq!(request, Some(LessonRequest { chapter_id: b.clone() }));
        assert!(disclosure.is_expanded(&b));
        assert!(!disclosure.is_expanded(&a));
        assert_eq!(disclosure.lessons(&a).len(), 1);
    }

    #[test]
    fn loaded_and_loading_chapters_never_refetch() {
        let mut disclosure = loaded(&["a", "b"]);
        let (a, b) = (ChapterId::new("a"), ChapterId::new("b"));
        disclosure.begin_lessons(&a);
        disclosure.finish_lessons(&a, Ok(vec![lesson("l1")]));
        let _ = disclosure.toggle(&b);
        disclosure.begin_lessons(&b);

        assert_eq!(disclosure.toggle(&a), None);
        assert_eq!(disclosure.phase(&a), ChapterPhase::Loaded);
        assert_eq!(disclosure.toggle(&b), None);
        assert!(disclosure.slot(&b).is_loading());
    }

    #[test]
    fn failure_is_per_chapter_and_retried_on_expand() {
        let mut disclosure = loaded(&["a", "b"]);
        let (a, b) = (ChapterId::new("a"), ChapterId::new("b"));
        disclosure.begin_lessons(&a);
        disclosure.finish_lessons(&a, Ok(vec![lesson("l1")]));
        let _ = disclosure.toggle(&b);
        disclosure.begin_lessons(&b);
        disclosure.finish_lessons(&b, Err("timeout".into()));

        assert_eq!(disclosure.phase(&b), ChapterPhase::LoadError);
        assert_eq!(disclosure.slot(&b).error(), Some("timeout"));
        assert_eq!(disclosure.lessons(&a).len(), 1);

        let _ = disclosure.toggle(&b);
        assert_eq!(
            disclosure.toggle(&b),
            Some(LessonRequest { chapter_id: b.clone() })
        );
        disclosure.begin_lessons(&b);
        assert_eq!(disclosure.slot(&b).error(), None);
    }

    #[test]
    fn unknown_chapter_is_ignored() {
        let mut disclosure = loaded(&["a"]);
        assert_eq!(disclosure.toggle(&ChapterId::new("zzz")), None);
        assert_eq!(disclosure.expanded(), Some(&ChapterId::new("a")));
    }

    #[test]
    fn reload_keeps_cached_lessons() {
        let mut disclosure = loaded(&["a", "b"]);
        let a = ChapterId::new("a");
        disclosure.begin_lessons(&a);
        disclosure.finish_lessons(&a, Ok(vec![lesson("l1")]));

        let request = disclosure.set_chapters(vec![chapter("a"), chapter("b")]);
        assert_eq!(request, None);
        assert_eq!(disclosure.phase(&a), ChapterPhase::Loaded);
    }
}
