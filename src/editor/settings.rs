use crate::common::fluent::{self, LocalizationError};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Preferred languages, most preferred first.
    pub languages: Vec<String>,
    pub show_grid: bool,
    pub snap_to_grid: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            languages: fluent::AVAILABLE_LANGUAGES.iter().map(|e| e.0.to_string()).collect(),
            show_grid: false,
            snap_to_grid: false,
        }
    }
}

impl EditorSettings {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    pub fn language_identifiers(&self) -> Result<Vec<LanguageIdentifier>, LocalizationError> {
        fluent::parse_languages(&self.languages)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_for_missing_keys() {
        let s = EditorSettings::from_toml("show_grid = true").unwrap();
        assert_eq!(
            s,
            EditorSettings { show_grid: true, ..Default::default() },
        );
        assert_eq!(s.languages, vec!["en-US", "cs-CZ"]);
    }

    #[test]
    fn test_language_identifiers() {
        let s = EditorSettings::from_toml(r#"languages = ["cs-CZ"]"#).unwrap();
        assert_eq!(s.language_identifiers().unwrap(), vec![unic_langid::langid!("cs-CZ")]);

        let s = EditorSettings::from_toml(r#"languages = ["!!"]"#).unwrap();
        assert!(s.language_identifiers().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(EditorSettings::from_toml("show_grid = 3").is_err());
    }

    #[test]
    fn test_to_toml() {
        let s = EditorSettings { snap_to_grid: true, ..Default::default() };
        assert_eq!(EditorSettings::from_toml(&s.to_toml().unwrap()).unwrap(), s);
    }
}
