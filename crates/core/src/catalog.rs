//! Hand-authored subject tree used when live data is unavailable or partial.

use crate::model::{
    ChapterId, ChapterSummary, LessonId, LessonStatus, LessonSummary, SubjectId, SubjectSummary,
    progress::{clamp_percent, ratio_percent},
};
use crate::model::LessonStatus::{Completed, Locked};

#[derive(Debug, PartialEq)]
pub struct CatalogLesson {
    pub id: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub status: LessonStatus,
    pub progress: Option<f64>,
}

#[derive(Debug, PartialEq)]
pub struct CatalogChapter {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub completed: u32,
    pub total: u32,
    pub lessons: &'static [CatalogLesson],
}

#[derive(Debug, PartialEq)]
pub struct CatalogSubject {
    pub id: &'static str,
    pub name: &'static str,
    pub grade: &'static str,
    pub total_units_text: &'static str,
    /// Fraction in `0.0..=1.0`.
    pub progress: f64,
    pub icon: &'static str,
    pub color: &'static str,
    pub chapters: &'static [CatalogChapter],
}

const fn lesson(
    id: &'static str,
    title: &'static str,
    duration: &'static str,
    status: LessonStatus,
) -> CatalogLesson {
    CatalogLesson {
        id,
        title,
        duration,
        status,
        progress: None,
    }
}

const fn lesson_at(
    id: &'static str,
    title: &'static str,
    duration: &'static str,
    progress: f64,
) -> CatalogLesson {
    CatalogLesson {
        id,
        title,
        duration,
        status: LessonStatus::InProgress,
        progress: Some(progress),
    }
}

static SUBJECTS: [CatalogSubject; 2] = [
    CatalogSubject {
        id: "math",
        name: "Toán học",
        grade: "Lớp 10",
        total_units_text: "2 chương • Năm học 2024-2025",
        progress: 0.5,
        icon: "calculator-outline",
        color: "#2f6aff",
        chapters: &[
            CatalogChapter {
                id: "math-ch-1",
                title: "Chương 1: Số thực",
                description: "Tìm hiểu về tập hợp số thực, các phép toán cơ bản",
                completed: 3,
                total: 4,
                lessons: &[
                    lesson("math-lesson-1", "Khái niệm số thực", "25 phút", Completed),
                    lesson("math-lesson-2", "Các phép toán với số thực", "30 phút", Completed),
                    lesson_at("math-lesson-3", "Giá trị tuyệt đối", "20 phút", 0.6),
                    lesson("math-lesson-4", "Bài tập tổng hợp", "35 phút", Locked),
                ],
            },
            CatalogChapter {
                id: "math-ch-2",
                title: "Chương 2: Hàm số bậc nhất",
                description: "Khái niệm hàm số, tính chất và đồ thị hàm số bậc nhất",
                completed: 1,
                total: 5,
                lessons: &[
                    lesson("math-lesson-5", "Định nghĩa hàm số bậc nhất", "22 phút", Locked),
                    lesson("math-lesson-6", "Đồ thị hàm số bậc nhất", "28 phút", Locked),
                    lesson("math-lesson-7", "Hệ số góc và tung độ gốc", "24 phút", Locked),
                    lesson("math-lesson-8", "Ứng dụng thực tế", "26 phút", Locked),
                    lesson("math-lesson-9", "Bài tập luyện tập", "32 phút", Locked),
                ],
            },
        ],
    },
    CatalogSubject {
        id: "literature",
        name: "Ngữ văn",
        grade: "Lớp 10",
        total_units_text: "3 chương • Năm học 2024-2025",
        progress: 0.3,
        icon: "book-outline",
        color: "#00c274",
        chapters: &[
            CatalogChapter {
                id: "lit-ch-1",
                title: "Chương 1: Truyện dân gian",
                description: "Khám phá các thể loại truyền thuyết, cổ tích, truyện cười",
                completed: 2,
                total: 5,
                lessons: &[
                    lesson("lit-lesson-1", "Đặc điểm truyện dân gian", "18 phút", Completed),
                    lesson("lit-lesson-2", "Truyền thuyết và ý nghĩa", "24 phút", Completed),
                    lesson_at("lit-lesson-3", "Cổ tích: cấu trúc và nhân vật", "26 phút", 0.4),
                    lesson("lit-lesson-4", "Truyện cười", "20 phút", Locked),
                    lesson("lit-lesson-5", "Ôn tập chương", "30 phút", Locked),
                ],
            },
            CatalogChapter {
                id: "lit-ch-2",
                title: "Chương 2: Thơ ca trung đại",
                description: "Những tác phẩm thơ ca tiêu biểu thời trung đại",
                completed: 1,
                total: 4,
                lessons: &[
                    lesson("lit-lesson-6", "Giới thiệu thơ ca trung đại", "22 phút", Locked),
                    lesson("lit-lesson-7", "Thơ Nôm và thơ chữ Hán", "24 phút", Locked),
                    lesson("lit-lesson-8", "Phân tích tác phẩm tiêu biểu", "28 phút", Locked),
                    lesson("lit-lesson-9", "Ôn tập chương", "26 phút", Locked),
                ],
            },
            CatalogChapter {
                id: "lit-ch-3",
                title: "Chương 3: Tập làm văn",
                description: "Phương pháp làm bài nghị luận và biểu cảm",
                completed: 0,
                total: 4,
                lessons: &[
                    lesson("lit-lesson-10", "Bố cục bài văn nghị luận", "18 phút", Locked),
                    lesson("lit-lesson-11", "Lập dàn ý và triển khai luận điểm", "24 phút", Locked),
                    lesson("lit-lesson-12", "Bài văn biểu cảm", "22 phút", Locked),
                    lesson("lit-lesson-13", "Luyện tập tổng hợp", "30 phút", Locked),
                ],
            },
        ],
    },
];

#[must_use]
pub fn subjects() -> &'static [CatalogSubject] {
    &SUBJECTS
}

#[must_use]
pub fn subject_by_id(id: &str) -> Option<&'static CatalogSubject> {
    SUBJECTS.iter().find(|subject| subject.id == id)
}

/// First catalog subject; the last-resort source for display defaults.
#[must_use]
pub fn default_subject() -> &'static CatalogSubject {
    &SUBJECTS[0]
}

impl CatalogSubject {
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        clamp_percent(self.progress * 100.0)
    }

    #[must_use]
    pub fn to_summary(&self) -> SubjectSummary {
        let progress_percent = self.progress_percent();
        SubjectSummary {
            id: SubjectId::new(self.id),
            name: self.name.to_owned(),
            color: self.color.to_owned(),
            icon: self.icon.to_owned(),
            progress_percent,
            progress_text: format!("{progress_percent}% Hoàn thành"),
            description: self.total_units_text.to_owned(),
            raw: serde_json::json!({ "id": self.id }),
        }
    }

    #[must_use]
    pub fn chapter_summaries(&self) -> Vec<ChapterSummary> {
        self.chapters.iter().map(CatalogChapter::to_summary).collect()
    }

    #[must_use]
    pub fn chapter(&self, id: &str) -> Option<&'static CatalogChapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }
}

impl CatalogChapter {
    #[must_use]
    pub fn to_summary(&self) -> ChapterSummary {
        ChapterSummary {
            id: ChapterId::new(self.id),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            completed_lessons: self.completed,
            total_lessons: self.total,
            progress_percent: ratio_percent(self.completed, self.total),
        }
    }

    #[must_use]
    pub fn lesson_summaries(&self) -> Vec<LessonSummary> {
        self.lessons.iter().map(CatalogLesson::to_summary).collect()
    }
}

impl CatalogLesson {
    #[must_use]
    pub fn to_summary(&self) -> LessonSummary {
        LessonSummary {
            id: LessonId::new(self.id),
            title: self.title.to_owned(),
            duration: self.duration.to_owned(),
            status: self.status,
            progress: self
                .progress
                .unwrap_or_else(|| self.status.default_progress()),
        }
    }
}

/// A started lesson surfaced on the home screen, tagged with its subject.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinueLesson {
    pub subject_id: SubjectId,
    pub subject_name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub lesson: LessonSummary,
}

impl ContinueLesson {
    /// Completed lessons read as 100 regardless of their stored progress.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.lesson.status == LessonStatus::Completed {
            100
        } else {
            self.lesson.percent()
        }
    }
}

/// Unlocked lessons across the catalog, in-progress first, then completed.
#[must_use]
pub fn continue_lessons(limit: usize) -> Vec<ContinueLesson> {
    let mut lessons: Vec<ContinueLesson> = SUBJECTS
        .iter()
        .flat_map(|subject| {
            subject.chapters.iter().flat_map(move |chapter| {
                chapter
                    .lessons
                    .iter()
                    .filter(|lesson| !lesson.status.is_locked())
                    .map(move |lesson| ContinueLesson {
                        subject_id: SubjectId::new(subject.id),
                        subject_name: subject.name,
                        icon: subject.icon,
                        color: subject.color,
                        lesson: lesson.to_summary(),
                    })
            })
        })
        .collect();

    // sort_by_key is stable, so catalog order survives within a status.
    lessons.sort_by_key(|item| match item.lesson.status {
        LessonStatus::InProgress => 0,
        LessonStatus::Completed => 1,
        LessonStatus::Locked => 2,
    });
    lessons.truncate(limit);
    lessons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_shape() {
        assert_eq!(subjects().len(), 2);
        let math = subject_by_id("math").unwrap();
        assert_eq!(math.chapters.len(), 2);
        assert_eq!(
            math.chapters.iter().map(|c| c.lessons.len()).sum::<usize>(),
            9
        );
        let lit = subject_by_id("literature").unwrap();
        assert_eq!(lit.chapters.len(), 3);
        assert_eq!(
            lit.chapters.iter().map(|c| c.lessons.len()).sum::<usize>(),
            13
        );
        assert!(subject_by_id("physics").is_none());
    }

    #[test]
    fn default_subject_is_math() {
        assert_eq!(default_subject().id, "math");
        assert_eq!(default_subject().progress_percent(), 50);
    }

    #[test]
    fn chapter_summary_derives_percent() {
        let chapter = subject_by_id("math").unwrap().chapter("math-ch-1").unwrap();
        let summary = chapter.to_summary();
        assert_eq!(summary.progress_percent, 75);
        assert_eq!(summary.progress_label(), "3/4");
    }

    #[test]
    fn lesson_summary_uses_explicit_or_default_progress() {
        let chapter = subject_by_id("math").unwrap().chapter("math-ch-1").unwrap();
        let lessons = chapter.lesson_summaries();
        assert!((lessons[0].progress - 1.0).abs() < f64::EPSILON);
        assert!((lessons[2].progress - 0.6).abs() < f64::EPSILON);
        assert!(lessons[3].progress.abs() < f64::EPSILON);
    }

    #[test]
    fn continue_lessons_puts_in_progress_first() {
        let items = continue_lessons(2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].lesson.id, LessonId::new("math-lesson-3"));
        assert_eq!(items[1].lesson.id, LessonId::new("lit-lesson-3"));
        assert_eq!(items[0].percent(), 60);

        let all = continue_lessons(usize::MAX);
        assert!(all.iter().all(|item| !item.lesson.status.is_locked()));
        assert_eq!(all.len(), 6);
        assert_eq!(all[2].lesson.id, LessonId::new("math-lesson-1"));
        assert_eq!(all[2].percent(), 100);
    }
}
