use super::store::{KeyValueStore, META_KEY};
use crate::domain::Filter;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// App metadata stored under the `meta` key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Filter selected when the app was last used
    #[serde(default)]
    pub filter: Filter,
}

/// Load app metadata; missing metadata yields the defaults
pub fn load_metadata<S: KeyValueStore>(store: &S) -> Result<AppMetadata> {
    match store.get(META_KEY)? {
        Some(content) => Ok(serde_json::from_str(&content)?),
        None => Ok(AppMetadata::default()),
    }
}

/// Save app metadata
pub fn save_metadata<S: KeyValueStore>(store: &mut S, metadata: &AppMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    store.set(META_KEY, &json)
}
