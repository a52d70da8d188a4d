use super::Language;
use crate::Result;

pub trait LanguageRepositoryTrait: Send + Sync {
    fn get_languages(&self) -> Result<Vec<Language>>;
}

pub trait LanguageServiceTrait: Send + Sync {
    fn get_languages(&self) -> Result<Vec<Language>>;
    fn get_language(&self, code: &str) -> Result<Option<Language>>;
    fn get_default_language(&self) -> Result<Language>;
    /// Code of the requested language when it is known, otherwise the default.
    fn resolve_language(&self, requested: Option<&str>) -> Result<String>;
}
