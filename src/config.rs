// src/config.rs
use std::env;
use std::net::SocketAddr;

/// Comment type that marks a comment row as a note.
pub const NOTE_COMMENT_TYPE: &str = "propertyhive_note";
/// Placeholder author email written on every note.
pub const NOTE_AUTHOR_EMAIL: &str = "propertyhive@noreply.com";
/// Transient key holding the site-wide comment stats.
pub const COUNT_CACHE_KEY: &str = "ph_count_comments";
/// Record types whose admin screens display notes.
pub const DEFAULT_POST_TYPES_WITH_NOTES: [&str; 7] = [
    "property",
    "contact",
    "enquiry",
    "appraisal",
    "viewing",
    "offer",
    "sale",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct NotesConfig {
    pub note_comment_type: String,
    pub note_author_email: String,
    pub count_cache_key: String,
    /// Screen ids that keep notes visible in comment queries.
    pub post_types_with_notes: Vec<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            note_comment_type: NOTE_COMMENT_TYPE.to_string(),
            note_author_email: NOTE_AUTHOR_EMAIL.to_string(),
            count_cache_key: COUNT_CACHE_KEY.to_string(),
            post_types_with_notes: DEFAULT_POST_TYPES_WITH_NOTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Display name recorded as the author of notes written from the admin UI.
    pub operator_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_path: "property_notes.sqlite3".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            operator_name: "Administrator".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub notes: NotesConfig,
}

impl AppConfig {
    /// Reads `PROPERTY_NOTES_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(path) = lookup("PROPERTY_NOTES_DB").filter(|s| !s.trim().is_empty()) {
            cfg.server.database_path = path;
        }

        if let Some(addr) = lookup("PROPERTY_NOTES_ADDR") {
            cfg.server.bind_addr = addr.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "PROPERTY_NOTES_ADDR",
                reason: format!("{e}"),
            })?;
        }

        if let Some(workers) = lookup("PROPERTY_NOTES_WORKERS") {
            let n: usize = workers.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "PROPERTY_NOTES_WORKERS",
                reason: format!("{e}"),
            })?;
            if n == 0 {
                return Err(ConfigError::Invalid {
                    var: "PROPERTY_NOTES_WORKERS",
                    reason: "must be at least 1".to_string(),
                });
            }
            cfg.server.max_workers = n;
        }

        if let Some(name) = lookup("PROPERTY_NOTES_OPERATOR").filter(|s| !s.trim().is_empty()) {
            cfg.server.operator_name = name.trim().to_string();
        }

        if let Some(screens) = lookup("PROPERTY_NOTES_SCREENS") {
            for screen in screens.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !cfg.notes.post_types_with_notes.iter().any(|s| s == screen) {
                    cfg.notes.post_types_with_notes.push(screen.to_string());
                }
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.server.database_path, "property_notes.sqlite3");
        assert_eq!(cfg.server.max_workers, 8);
        assert_eq!(cfg.notes.note_comment_type, "propertyhive_note");
        assert_eq!(cfg.notes.count_cache_key, "ph_count_comments");
        assert_eq!(cfg.notes.post_types_with_notes.len(), 7);
    }

    #[test]
    fn extra_screens_are_appended_once() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(
            "PROPERTY_NOTES_SCREENS",
            "tenancy, property ,,landlord",
        )]))
        .unwrap();

        let screens = &cfg.notes.post_types_with_notes;
        assert_eq!(screens.len(), 9);
        assert!(screens.contains(&"tenancy".to_string()));
        assert!(screens.contains(&"landlord".to_string()));
        assert_eq!(screens.iter().filter(|s| *s == "property").count(), 1);
    }

    #[test]
    fn rejects_bad_worker_count_and_address() {
        let err = AppConfig::from_lookup(lookup_from(&[("PROPERTY_NOTES_WORKERS", "0")]));
        assert!(matches!(
            err,
            Err(ConfigError::Invalid { var: "PROPERTY_NOTES_WORKERS", .. })
        ));

        let err = AppConfig::from_lookup(lookup_from(&[("PROPERTY_NOTES_ADDR", "nowhere")]));
        assert!(matches!(
            err,
            Err(ConfigError::Invalid { var: "PROPERTY_NOTES_ADDR", .. })
        ));
    }
}
