mod detail;
mod disclosure;

pub use detail::{
    CHAPTERS_FALLBACK_MESSAGE, ChapterListState, LESSONS_FALLBACK_MESSAGE, SubjectDetail,
};
pub use disclosure::{ChapterDisclosure, ChapterPhase, LessonRequest, LessonSlot};
