//! Repository trait for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};

/// Repository trait for managing engine settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings, defaults filled in.
    fn get_settings(&self) -> Result<Settings>;

    /// Update multiple settings at once.
    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;
}
