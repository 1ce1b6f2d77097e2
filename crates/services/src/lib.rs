#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod session;
pub mod subjects;
pub mod token_store;

pub use api::{ApiClient, AuthGateway, CatalogGateway, StaticCatalog};
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use catalog_service::{CatalogService, EMPTY_SUBJECTS_MESSAGE};
pub use config::{ApiConfig, AppConfig, CatalogConfig};
pub use error::{
    ApiError, AppServicesError, AuthServiceError, CatalogError, ConfigError, TokenStoreError,
};
pub use session::SessionContext;
pub use subjects::{
    ChapterDisclosure, ChapterListState, ChapterPhase, LessonRequest, LessonSlot, SubjectDetail,
};
pub use token_store::{ACCESS_TOKEN_KEY, TokenStore};
