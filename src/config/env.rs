use crate::error::ScrapeError;

const DEFAULT_TABLE: &str = "courses";

/// Connection settings for the hosted database.
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    pub table: String,
}

impl SupabaseConfig {
    /// Reads `SUPABASE_URL`, `SUPABASE_KEY`, and optionally `SUPABASE_TABLE`, honoring a `.env` file.
    pub fn from_env() -> Result<Self, ScrapeError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScrapeError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ScrapeError::Config(format!("{} is not set", name)))
        };

        Ok(SupabaseConfig {
            url: required("SUPABASE_URL")?,
            key: required("SUPABASE_KEY")?,
            table: lookup("SUPABASE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn table_defaults_to_courses() {
        let config = SupabaseConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_KEY", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.table, "courses");
        assert_eq!(config.key, "secret");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = SupabaseConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://project.supabase.co")])).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(msg) if msg.contains("SUPABASE_KEY")));
    }
}
