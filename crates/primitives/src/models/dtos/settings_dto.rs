use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct CommissionRateResponse {
    #[schema(example = 10)]
    pub rate: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingRequest {
    #[schema(example = "commission_rate")]
    #[validate(length(min = 1, max = 64))]
    pub key: String,

    #[schema(example = "12")]
    #[validate(length(min = 1, max = 256))]
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateSettingResponse {
    pub key: String,
    #[schema(example = "updated")]
    pub action: String,
}
