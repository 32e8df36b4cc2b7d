pub mod judgment;
pub mod user;
