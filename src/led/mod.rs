mod client;
mod follow;

pub use client::{led_url, LedClient};
pub use follow::LedFollower;
