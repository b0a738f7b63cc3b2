pub mod payments;
pub mod video;

pub use payments::PaymentsClient;
pub use video::VideoCallClient;
