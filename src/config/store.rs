//! Document store configuration

use serde::Deserialize;

use crate::domain::foundation::Collection;

use super::error::ValidationError;

/// Document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Database holding both collections
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Collection id of the habits collection
    #[serde(default = "default_habits_collection")]
    pub habits_collection_id: String,

    /// Collection id of the completions collection
    #[serde(default = "default_completions_collection")]
    pub completions_collection_id: String,
}

impl StoreConfig {
    pub fn collection_id(&self, collection: Collection) -> &str {
        match collection {
            Collection::Habits => &self.habits_collection_id,
            Collection::Completions => &self.completions_collection_id,
        }
    }

    /// Change-feed channel for a collection's documents.
    pub fn channel(&self, collection: Collection) -> String {
        format!(
            "databases.{}.collections.{}.documents",
            self.database_id,
            self.collection_id(collection)
        )
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.database_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORE__DATABASE_ID"));
        }
        if self.habits_collection_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORE__HABITS_COLLECTION_ID"));
        }
        if self.completions_collection_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "STORE__COMPLETIONS_COLLECTION_ID",
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_id: default_database_id(),
            habits_collection_id: default_habits_collection(),
            completions_collection_id: default_completions_collection(),
        }
    }
}

fn default_database_id() -> String {
    "habit-tracker".to_string()
}

fn default_habits_collection() -> String {
    Collection::Habits.as_str().to_string()
}

fn default_completions_collection() -> String {
    Collection::Completions.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.database_id, "habit-tracker");
        assert_eq!(config.collection_id(Collection::Habits), "habits");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_channel_uses_configured_ids() {
        let config = StoreConfig {
            database_id: "prod".to_string(),
            habits_collection_id: "64f0a1".to_string(),
            completions_collection_id: "64f0b2".to_string(),
        };
        assert_eq!(
            config.channel(Collection::Completions),
            "databases.prod.collections.64f0b2.documents"
        );
    }

    #[test]
    fn test_empty_database_id_rejected() {
        let config = StoreConfig {
            database_id: " ".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STORE__DATABASE_ID"))
        );
    }
}
