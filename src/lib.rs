pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod github;
pub mod logging;
pub mod model;
pub mod raster;
pub mod render;
pub mod show;
pub mod source;
pub mod tui;
pub mod year;
