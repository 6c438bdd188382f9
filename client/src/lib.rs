mod app;
mod config;
mod dom;
mod render;
mod state;
mod upload;

pub use app::run;
