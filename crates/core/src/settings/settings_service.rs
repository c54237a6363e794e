use super::SettingsRepositoryTrait;
use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;

    fn get_default_interest_rate(&self) -> Result<Decimal>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        new_settings.validate()?;
        debug!("Updating settings: {:?}", new_settings);
        self.settings_repository
            .update_settings(new_settings)
            .await
    }

    fn get_default_interest_rate(&self) -> Result<Decimal> {
        Ok(self.get_settings()?.default_interest_rate)
    }
}
