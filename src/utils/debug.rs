use once_cell::sync::Lazy;

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("COURIER_DEBUG").is_ok());

/// Warnings are on unless COURIER_QUIET is set
pub static QUIET_MODE: Lazy<bool> = Lazy::new(|| std::env::var("COURIER_QUIET").is_ok());

/// Conditional debug output macro
///
/// Only prints to stderr when `COURIER_DEBUG` is set. The flag is read once,
/// so hot paths like rate quoting don't hit the environment on every call.
///
/// # Examples
///
/// ```
/// use courier_rates::debug_println;
/// debug_println!("resolved {} via {}", "PONDICHERRY", "TAMILNADU");
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!($($arg)*);
        }
    };
}

/// Warning output macro, prefixed with `Warning:` and silenced by `COURIER_QUIET`
#[macro_export]
macro_rules! warn_println {
    ($($arg:tt)*) => {
        if !*$crate::utils::debug::QUIET_MODE {
            eprintln!("Warning: {}", format_args!($($arg)*));
        }
    };
}
