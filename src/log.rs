//! Logging over `esp-println`
//!
//! With the `log` feature disabled the macro emits no output, but its
//! arguments are still type-checked.

macro_rules! log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        esp_println::println!($($arg)*);
        #[cfg(not(feature = "log"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use log;
