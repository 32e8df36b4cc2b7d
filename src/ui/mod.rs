pub mod actors;
pub mod anim;
pub mod color;
pub mod components;
pub mod path;
pub mod widget;
