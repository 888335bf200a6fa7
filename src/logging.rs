// Not every level is used. Which is fine. Just squash the warnings.
#![allow(unused_macros)]

// When `logging` is disabled, the arguments are still type checked (and thus
// "used") so that call sites don't need `_`-prefixed bindings.
macro_rules! log {
    ($level:ident, $($tt:tt)*) => {{
        #[cfg(feature = "logging")]
        {
            log::$level!(target: "jiff_tzchoice", $($tt)*);
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = format_args!($($tt)*);
        }
    }};
}

macro_rules! error {
    ($($tt:tt)*) => { log!(error, $($tt)*) }
}

macro_rules! warn {
    ($($tt:tt)*) => { log!(warn, $($tt)*) }
}

macro_rules! info {
    ($($tt:tt)*) => { log!(info, $($tt)*) }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(debug, $($tt)*) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(trace, $($tt)*) }
}
