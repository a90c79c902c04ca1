//! Errors raised while capturing the host's capabilities.

use snafu::Snafu;

/// Errors that can occur when capturing the host's reallocation primitive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum InitError {
    /// The host passed a null capability table.
    #[snafu(display("The host passed a null capability table."))]
    NullApi,

    /// The capability table has no system subsystem.
    #[snafu(display("The host capability table has no system subsystem."))]
    MissingSystemTable,

    /// The system subsystem has no `realloc` entry.
    #[snafu(display("The host system table has no `realloc` entry."))]
    MissingRealloc,

    /// A primitive was already captured. The first one stays in place.
    #[snafu(display("The host reallocation primitive has already been captured."))]
    AlreadyCaptured,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn is_core_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}

        let err = InitError::AlreadyCaptured;
        assert_error(&err);
        assert_eq!(
            err.to_string(),
            "The host reallocation primitive has already been captured."
        );
    }
}
