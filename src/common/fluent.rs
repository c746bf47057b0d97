use fluent_bundle::{FluentBundle, FluentResource};
use unic_langid::{langid, LanguageIdentifier};

pub const AVAILABLE_LANGUAGES: &[(LanguageIdentifier, &str)] = &[
    (langid!("en-US"), include_str!("localization/en.ftl")),
    (langid!("cs-CZ"), include_str!("localization/cs.ftl")),
];

#[derive(Debug, thiserror::Error)]
pub enum LocalizationError {
    #[error("language {0} not supported")]
    UnsupportedLanguage(LanguageIdentifier),
    #[error("parsing language {language} failed: {details}")]
    InvalidResource {
        language: LanguageIdentifier,
        details: String,
    },
    #[error("invalid language identifier {0:?}")]
    InvalidIdentifier(String),
}

pub fn parse_languages(names: &[String]) -> Result<Vec<LanguageIdentifier>, LocalizationError> {
    names
        .iter()
        .map(|n| n.parse().map_err(|_| LocalizationError::InvalidIdentifier(n.clone())))
        .collect()
}

/// Builds a bundle where earlier languages override later ones.
pub fn create_fluent_bundle(
    desired_languages: &[LanguageIdentifier],
) -> Result<FluentBundle<FluentResource>, LocalizationError> {
    let mut bundle = FluentBundle::new(desired_languages.to_vec());
    bundle.set_use_isolating(false);

    for l in desired_languages.iter().rev() {
        let Some((_, s)) = AVAILABLE_LANGUAGES.iter().find(|e| e.0 == *l) else {
            return Err(LocalizationError::UnsupportedLanguage(l.clone()));
        };
        let resource = FluentResource::try_new((*s).to_owned()).map_err(|(_, errors)| {
            LocalizationError::InvalidResource {
                language: l.clone(),
                details: format!("{:?}", errors),
            }
        })?;
        bundle.add_resource_overriding(resource);
    }

    Ok(bundle)
}

pub fn translate(bundle: &FluentBundle<FluentResource>, msg_name: &str) -> Option<String> {
    let pattern = bundle.get_message(msg_name)?.value()?;
    let mut errors = vec![];
    let value = bundle.format_pattern(pattern, None, &mut errors);
    if !errors.is_empty() {
        log::warn!("formatting {} reported {:?}", msg_name, errors);
    }
    Some(value.into_owned())
}
