use crate::error::{OrmError, Result};

/// Connection settings for [`OrmClient`](crate::OrmClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub sslmode: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "postgres".to_string(),
            sslmode: "disable".to_string(),
        }
    }
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS` and `DB_NAME`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom key lookup.
    ///
    /// `DB_PORT` defaults to 5432 and `DB_PASS` to empty; the other keys are
    /// required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(OrmError::MissingConfig(key));

        let port: u16 = match lookup("DB_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| OrmError::InvalidConfig {
                    key: "DB_PORT",
                    value,
                })?,
            None => 5432,
        };

        Ok(Self {
            host: required("DB_HOST")?,
            port,
            user: required("DB_USER")?,
            password: lookup("DB_PASS").unwrap_or_default(),
            dbname: required("DB_NAME")?,
            ..Self::default()
        })
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = dbname.into();
        self
    }

    pub fn sslmode(mut self, sslmode: impl Into<String>) -> Self {
        self.sslmode = sslmode.into();
        self
    }

    /// The libpq key/value connection string.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            self.host, self.port, self.user, self.password, self.dbname, self.sslmode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASS", "s3cret"),
            ("DB_NAME", "library"),
        ]))
        .unwrap();

        assert_eq!(
            config.connection_string(),
            "host=db.internal port=6543 user=app password=s3cret dbname=library sslmode=disable"
        );
    }

    #[test]
    fn test_from_lookup_defaults_port() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_USER", "app"),
            ("DB_NAME", "library"),
        ]))
        .unwrap();
        assert_eq!(config.port, 5432);
        assert_eq!(config.password, "");
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let err = ConnectionConfig::from_lookup(lookup(&[("DB_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, OrmError::MissingConfig("DB_USER")));
    }

    #[test]
    fn test_from_lookup_invalid_port() {
        let err = ConnectionConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "five"),
            ("DB_USER", "app"),
            ("DB_NAME", "library"),
        ]))
        .unwrap_err();
        match err {
            OrmError::InvalidConfig { key, value } => {
                assert_eq!(key, "DB_PORT");
                assert_eq!(value, "five");
            }
            _ => panic!("Expected InvalidConfig error"),
        }
    }

    #[test]
    fn test_builder_setters() {
        let config = ConnectionConfig::new()
            .host("pg")
            .port(5433)
            .user("u")
            .password("p")
            .dbname("d")
            .sslmode("require");
        assert_eq!(
            config.connection_string(),
            "host=pg port=5433 user=u password=p dbname=d sslmode=require"
        );
    }
}
