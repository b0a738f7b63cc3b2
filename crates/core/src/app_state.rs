use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use std::sync::Arc;

type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

use crate::clients::{PaymentsClient, VideoCallClient};
pub use entraide_primitives::models::app_state::app_config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub video: VideoCallClient,
    pub payments: PaymentsClient,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Arc<Self> {
        let video = VideoCallClient::new(&config.video_details);
        let payments = PaymentsClient::new(&config.payments_details);

        Arc::new(Self {
            db,
            config,
            video,
            payments,
        })
    }
}
