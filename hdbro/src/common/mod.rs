//! Supporting utility type.
mod bytestr;
pub use bytestr::ByteStr;

/// Trace event, only with `verbose` feature.
macro_rules! verbose {
    ($($tt:tt)*) => {
        #[cfg(feature = "verbose")]
        tracing::trace!($($tt)*)
    };
}

/// Create and enter trace `Span`, only with `verbose` feature.
///
/// The span is exited at the end of the enclosing block, do not hold it
/// across an `.await`.
macro_rules! span {
    ($($tt:tt)*) => {
        #[cfg(feature = "verbose")]
        let s = tracing::trace_span!($($tt)*);
        #[cfg(feature = "verbose")]
        let _s = s.enter();
    };
}

/// Log record, only with `log` feature.
///
/// Arguments are not evaluated without the feature.
macro_rules! report {
    ($level:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        log::$level!($($tt)*)
    };
}

pub(crate) use verbose;
pub(crate) use span;
pub(crate) use report;
