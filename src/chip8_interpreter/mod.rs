pub mod app;
pub mod config;
pub mod cpu;
pub mod debug;
pub mod decode;
pub mod error;
pub mod input;
pub mod quirks;
pub mod render;
pub mod rom;
pub mod state;
pub mod timers;
