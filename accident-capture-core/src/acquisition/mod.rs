pub mod camera;
pub mod location;
pub mod result_channel;
