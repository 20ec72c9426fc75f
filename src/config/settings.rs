use crate::error::{IntrospectionError, Result};
use crate::level::{Level, SeverityOrdering, StandardSeverity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Minimum severity that gets a trace attached
    pub level: Level,

    /// Maximum number of rendered frames, unlimited when `None`
    pub max_depth: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: StandardSeverity.lowest(),
            max_depth: None,
        }
    }
}

pub fn load_settings() -> Result<Settings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    load_settings_from(|key| std::env::var(key).ok())
}

/// Build settings from an arbitrary variable lookup
pub fn load_settings_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings> {
    let level = match lookup("INTROSPECTION_LEVEL").filter(|value| !value.trim().is_empty()) {
        Some(value) => StandardSeverity.normalize(&value)?,
        None => StandardSeverity.lowest(),
    };

    let max_depth = lookup("INTROSPECTION_MAX_DEPTH")
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value.trim().parse::<usize>().map_err(|_| {
                IntrospectionError::Config("Invalid INTROSPECTION_MAX_DEPTH".to_string())
            })
        })
        .transpose()?;

    Ok(Settings { level, max_depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = load_settings_from(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.level, Level::Debug);
    }

    #[test]
    fn test_reads_level_and_depth() {
        let settings = load_settings_from(lookup(&[
            ("INTROSPECTION_LEVEL", "warning"),
            ("INTROSPECTION_MAX_DEPTH", "16"),
        ]))
        .unwrap();

        assert_eq!(settings.level, Level::Warning);
        assert_eq!(settings.max_depth, Some(16));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let settings = load_settings_from(lookup(&[
            ("INTROSPECTION_LEVEL", "  "),
            ("INTROSPECTION_MAX_DEPTH", ""),
        ]))
        .unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let err = load_settings_from(lookup(&[("INTROSPECTION_LEVEL", "loud")])).unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidSeverity(_)));
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        let err =
            load_settings_from(lookup(&[("INTROSPECTION_MAX_DEPTH", "many")])).unwrap_err();
        assert!(matches!(err, IntrospectionError::Config(_)));
    }
}
