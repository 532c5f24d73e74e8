//! Logging macros
//!
//! Backed by `defmt` on target builds, by `log` on hosts, and compiled out
//! when neither feature is enabled.

#![allow(unused_imports, unused_macros)]

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, error, info, trace, warn};

#[cfg(all(feature = "log", not(feature = "defmt")))]
pub(crate) use log::{debug, error, info, trace, warn};

#[cfg(not(any(feature = "log", feature = "defmt")))]
mod noop {
    macro_rules! trace {
        ($($arg:expr),* $(,)?) => {{ $( let _ = &$arg; )* }};
    }
    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {{ $( let _ = &$arg; )* }};
    }
    macro_rules! info {
        ($($arg:expr),* $(,)?) => {{ $( let _ = &$arg; )* }};
    }
    macro_rules! warn {
        ($($arg:expr),* $(,)?) => {{ $( let _ = &$arg; )* }};
    }
    macro_rules! error {
        ($($arg:expr),* $(,)?) => {{ $( let _ = &$arg; )* }};
    }

    pub(crate) use {debug, error, info, trace, warn};
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
pub(crate) use noop::{debug, error, info, trace, warn};
