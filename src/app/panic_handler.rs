use log::error;
use std::panic;

/// Routes panics through the logger so they land in the log file in release builds.
pub fn setup_panic_handler() {
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = match panic_info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match panic_info.payload().downcast_ref::<String>() {
                Some(s) => &s[..],
                None => "Box<Any>",
            },
        };

        error!("program panic:\nlocation: {}\nerror: {}", location, message);
    }));
}
