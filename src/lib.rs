pub mod api;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod input;
pub mod loader;
pub mod plan;
// cmd and reports belong to the binary (main.rs).
