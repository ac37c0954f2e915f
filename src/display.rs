//! Notification level and stderr display helpers.
//!
//! A crate-level atomic so the library and the CLI share one verbosity
//! setting. 0 = silent, 1 = errors only, 2 = normal, 3 = detail,
//! 4+ = verbose (resolution-source notes).

use std::sync::atomic::{AtomicU32, Ordering};

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current notification level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the notification level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Write a line to stderr if the current notification level is >= `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}
