pub mod logger;
pub mod rect;

pub use rect::Rect;
