//! Database model for engine settings.

use diesel::prelude::*;

/// One stored setting. Typed access goes through `Settings::from_pairs`.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}
