use crate::SettingSpec;
use std::collections::BTreeMap;

/// Flat user-supplied settings (name -> value). Unknown keys are ignored.
pub type UserSettings = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid value {value:?} for setting {setting}: does not match /{pattern}/")]
    InvalidValue {
        setting: String,
        value: String,
        pattern: String,
    },
    #[error("invalid pattern /{pattern}/ for setting {setting}")]
    InvalidPattern {
        setting: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("default {default:?} for setting {setting} does not match /{pattern}/")]
    InvalidDefault {
        setting: String,
        default: String,
        pattern: String,
    },
}

/// Effective setting values for one check invocation.
///
/// Every declared setting is present and satisfies its pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedSettings {
    values: BTreeMap<String, String>,
}

impl ResolvedSettings {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Effective value of a declared setting, falling back to its default.
    pub fn value<'a>(&'a self, spec: &'a SettingSpec) -> &'a str {
        self.get(spec.name).unwrap_or(spec.default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merge user settings over the declared schema.
///
/// An empty user value counts as not supplied. A supplied value must match the pattern in full.
pub fn resolve_settings(
    schema: &[SettingSpec],
    user: &UserSettings,
) -> Result<ResolvedSettings, ConfigurationError> {
    let mut values = BTreeMap::new();
    for spec in schema {
        let value = match user.get(spec.name).filter(|v| !v.is_empty()) {
            Some(v) => {
                let re = spec.compile()?;
                if !re.is_match(v) {
                    return Err(ConfigurationError::InvalidValue {
                        setting: spec.name.to_string(),
                        value: v.clone(),
                        pattern: spec.regex.to_string(),
                    });
                }
                v.clone()
            }
            None => spec.default.to_string(),
        };
        values.insert(spec.name.to_string(), value);
    }
    Ok(ResolvedSettings { values })
}

/// Whether the user supplied organization-specific values for any declared setting.
///
/// A supplied value equal to the declared default does not count.
pub fn is_custom(schema: &[SettingSpec], user: &UserSettings) -> bool {
    schema.iter().any(|spec| {
        user.get(spec.name)
            .is_some_and(|v| !v.is_empty() && v != spec.default)
    })
}
