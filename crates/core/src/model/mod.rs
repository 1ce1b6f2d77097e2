mod auth;
mod chapter;
mod class;
mod ids;
mod lesson;
pub mod progress;
mod subject;

pub use ids::{ChapterId, ClassId, LessonId, ParseIdError, SubjectId};

pub use auth::{
    AuthSession, Credentials, CredentialsError, LoginDraft, MIN_PASSWORD_LEN, RegisterDraft,
    Registration, UserProfile,
};
pub use chapter::ChapterSummary;
pub use class::{CLASS_PLACEHOLDER_NAME, ClassRef};
pub use lesson::{LessonStatus, LessonSummary};
pub use subject::{SubjectHeader, SubjectSummary};
