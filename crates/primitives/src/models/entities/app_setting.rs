use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::app_settings)]
#[diesel(primary_key(key))]
pub struct AppSetting {
    pub key: String,
    pub value: String,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::app_settings)]
pub struct NewAppSetting<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_by: Option<Uuid>,
}
