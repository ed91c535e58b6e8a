pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod session;
pub mod source;
pub mod tool;
pub mod upload;
pub mod view;
pub mod viewport;
