//! The two page languages the loan form ships in.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Spanish,
    #[default]
    English,
}

impl Language {
    /// Resolves the `<html lang>` tag; anything not tagged Spanish reads as English.
    pub fn from_lang_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) if tag.trim().to_ascii_lowercase().starts_with("es") => Language::Spanish,
            _ => Language::English,
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Language::Spanish => "Este campo es requerido",
            Language::English => "This field is required",
        }
    }

    pub fn no_results_message(self) -> &'static str {
        match self {
            Language::Spanish => "No hay resultados para exportar.",
            Language::English => "There are no results to export.",
        }
    }

    pub fn busy_message(self) -> &'static str {
        match self {
            Language::Spanish => "Calculando…",
            Language::English => "Calculating…",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_tags_select_spanish() {
        assert_eq!(Language::from_lang_tag(Some("es")), Language::Spanish);
        assert_eq!(Language::from_lang_tag(Some("es-MX")), Language::Spanish);
        assert_eq!(Language::from_lang_tag(Some("ES")), Language::Spanish);
    }

    #[test]
    fn everything_else_is_english() {
        assert_eq!(Language::from_lang_tag(Some("en-US")), Language::English);
        assert_eq!(Language::from_lang_tag(Some("")), Language::English);
        assert_eq!(Language::from_lang_tag(Some("pt")), Language::English);
        assert_eq!(Language::from_lang_tag(None), Language::English);
    }

    #[test]
    fn required_message_follows_language() {
        assert_eq!(
            Language::Spanish.required_message(),
            "Este campo es requerido"
        );
        assert_eq!(Language::English.required_message(), "This field is required");
    }
}
