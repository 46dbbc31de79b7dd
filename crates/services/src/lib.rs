#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank_service;
mod documents;
pub mod error;
pub mod history_service;
pub mod identity_service;
pub mod question_source;
pub mod quiz;
pub mod randomizer;
pub mod theme_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use bank_service::QuestionBankService;
pub use error::{
    AppServicesError, BankError, HistoryServiceError, IdentityError, QuizError, ThemeError,
};
pub use history_service::HistoryService;
pub use identity_service::IdentityService;
pub use question_source::{BundledQuestionSource, QuestionSource};
pub use quiz::{Countdown, LiveQuiz, LiveStart, QuizService, QuizStep, TickControl};
pub use theme_service::ThemeService;
