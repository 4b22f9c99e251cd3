//! Logging shim
//!
//! Same convention as the core crate: forwards to `defmt` when the feature is
//! on and borrows its arguments otherwise. The display only logs at debug
//! level.

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}
