//! Logging macros.
//!
//! Call sites use `defmt` on target. Unit tests run on the host without a
//! defmt global logger, so there the arguments are only evaluated.

macro_rules! info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(not(test))]
        defmt::info!($fmt $(, $arg)*);
        #[cfg(test)]
        let _ = ($(&$arg,)*);
    }};
}

macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(not(test))]
        defmt::warn!($fmt $(, $arg)*);
        #[cfg(test)]
        let _ = ($(&$arg,)*);
    }};
}

macro_rules! error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(not(test))]
        defmt::error!($fmt $(, $arg)*);
        #[cfg(test)]
        let _ = ($(&$arg,)*);
    }};
}
