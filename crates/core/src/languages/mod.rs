//! Languages module - the locales product translations are written in.

mod language_model;
mod language_service;
mod language_traits;

pub use language_model::Language;
pub use language_service::LanguageService;
pub use language_traits::{LanguageRepositoryTrait, LanguageServiceTrait};
