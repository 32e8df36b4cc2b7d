pub mod network;
pub mod timer;
