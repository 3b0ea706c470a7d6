use crate::ConfigurationError;
use regex::Regex;

/// Declared, user-overridable setting of a check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingSpec {
    /// Key in the flat user settings map (e.g. `latestNodeJsVersion`).
    pub name: &'static str,
    /// Human-readable label.
    pub display_name: &'static str,
    pub default: &'static str,
    pub description: &'static str,
    /// Constraint a user-supplied value must match in full.
    pub regex: &'static str,
}

impl SettingSpec {
    /// Compile `regex` anchored at both ends.
    pub fn compile(&self) -> Result<Regex, ConfigurationError> {
        let anchored = format!("^(?:{})$", self.regex);
        Regex::new(&anchored).map_err(|source| ConfigurationError::InvalidPattern {
            setting: self.name.to_string(),
            pattern: self.regex.to_string(),
            source,
        })
    }

    /// Load-time validation: the pattern compiles and the default satisfies it.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let re = self.compile()?;
        if !re.is_match(self.default) {
            return Err(ConfigurationError::InvalidDefault {
                setting: self.name.to_string(),
                default: self.default.to_string(),
                pattern: self.regex.to_string(),
            });
        }
        Ok(())
    }
}
