use diesel::prelude::*;
use entraide_primitives::error::ApiError;
use entraide_primitives::models::entities::app_setting::{AppSetting, NewAppSetting};
use entraide_primitives::schema::app_settings;
use uuid::Uuid;

pub struct SettingsRepository;

impl SettingsRepository {
    pub fn find_by_key(conn: &mut PgConnection, key: &str) -> Result<Option<AppSetting>, ApiError> {
        app_settings::table
            .find(key)
            .first::<AppSetting>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn insert(conn: &mut PgConnection, setting: NewAppSetting) -> Result<(), ApiError> {
        diesel::insert_into(app_settings::table)
            .values(&setting)
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn update(
        conn: &mut PgConnection,
        key: &str,
        value: &str,
        updated_by: Uuid,
    ) -> Result<(), ApiError> {
        diesel::update(app_settings::table.find(key))
            .set((
                app_settings::value.eq(value),
                app_settings::updated_by.eq(Some(updated_by)),
                app_settings::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }
}
