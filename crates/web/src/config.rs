use anyhow::{Context, Result};

const DEFAULT_SESSION_TTL_HOURS: i64 = 168;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Lifetime of a login session
    pub session_ttl_hours: i64,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            session_ttl_hours: match lookup("SESSION_TTL_HOURS") {
                Some(raw) => raw
                    .parse()
                    .context("SESSION_TTL_HOURS must be a number of hours")?,
                None => DEFAULT_SESSION_TTL_HOURS,
            },
            db_max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .parse()
                    .context("DB_MAX_CONNECTIONS must be a positive number")?,
                None => DEFAULT_DB_MAX_CONNECTIONS,
            },
        })
    }

    /// Database URL without credentials, for logging
    pub fn database_host(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://rider:secret@db:5432/equestrian"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl_hours, 168);
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SESSION_TTL_HOURS", "12"));
        vars.push(("DB_MAX_CONNECTIONS", "4"));

        let config = load(&vars).unwrap();

        assert_eq!(config.session_ttl_hours, 12);
        assert_eq!(config.db_max_connections, 4);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(load(&REQUIRED[..2]).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let vars = [("HOST", "localhost"), ("PORT", "http"), REQUIRED[2]];
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_database_host_hides_credentials() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.database_host(), "db:5432/equestrian");
    }
}
