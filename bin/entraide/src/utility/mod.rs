pub mod clean_up_tasks;
pub mod db_pool;
pub mod logging;
pub mod server;
pub mod shutdown;
pub mod tasks;
