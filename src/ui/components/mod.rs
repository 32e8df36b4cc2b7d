pub mod health_bar;
pub mod key_counter;
pub mod profile_overlay;
