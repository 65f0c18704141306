pub mod fetch;
pub mod parse;
pub mod render;
pub mod show;
