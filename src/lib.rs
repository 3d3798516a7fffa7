pub mod app;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod led;
pub mod overlay;
pub mod system;
pub mod utils;
pub mod vision;

pub use error::{Error, Result};

pub fn run() -> i32 {
    app::run()
}
