//! User-facing error messages

use application::SearchErrorKind;

/// Message shown to the user for a failed search
#[must_use]
pub const fn user_message(kind: SearchErrorKind) -> &'static str {
    match kind {
        SearchErrorKind::NotFound => "Address not found. Please try a different address or format.",
        SearchErrorKind::RateLimited => "Too many requests. Please wait a moment and try again.",
        SearchErrorKind::ServiceUnavailable => {
            "The map service is temporarily unavailable. Please try again later."
        },
        SearchErrorKind::Timeout => "Search timeout. Please try a smaller search radius.",
        SearchErrorKind::InvalidRequest => "Invalid search parameters. Please check your input.",
        SearchErrorKind::InvalidResponse => {
            "Invalid data format received from the map service. Please try again later."
        },
        SearchErrorKind::NetworkError => {
            "Unable to find churches. Please check your connection and try again."
        },
        SearchErrorKind::Configuration => {
            "Invalid configuration. Please check church-finder.toml and CHURCH_FINDER_* variables."
        },
    }
}

/// Process exit code for a failed search
#[must_use]
pub const fn exit_code(kind: SearchErrorKind) -> i32 {
    match kind {
        SearchErrorKind::InvalidRequest | SearchErrorKind::Configuration => 2,
        _ => 1,
    }
}
