use std::sync::Arc;

use super::{Language, LanguageRepositoryTrait, LanguageServiceTrait};
use crate::constants::FALLBACK_LANGUAGE;
use crate::Result;

pub struct LanguageService {
    repository: Arc<dyn LanguageRepositoryTrait>,
}

impl LanguageService {
    pub fn new(repository: Arc<dyn LanguageRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl LanguageServiceTrait for LanguageService {
    fn get_languages(&self) -> Result<Vec<Language>> {
        self.repository.get_languages()
    }

    fn get_language(&self, code: &str) -> Result<Option<Language>> {
        let code = code.trim();
        Ok(self
            .repository
            .get_languages()?
            .into_iter()
            .find(|l| l.code.eq_ignore_ascii_case(code)))
    }

    fn get_default_language(&self) -> Result<Language> {
        let languages = self.repository.get_languages()?;
        let default = languages
            .iter()
            .find(|l| l.is_default)
            .or_else(|| languages.first())
            .cloned();
        Ok(default.unwrap_or_else(|| Language {
            code: FALLBACK_LANGUAGE.to_string(),
            name: "English".to_string(),
            is_default: true,
        }))
    }

    fn resolve_language(&self, requested: Option<&str>) -> Result<String> {
        if let Some(code) = requested.filter(|c| !c.trim().is_empty()) {
            if let Some(language) = self.get_language(code)? {
                return Ok(language.code);
            }
        }
        Ok(self.get_default_language()?.code)
    }
}
