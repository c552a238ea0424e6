/// Common utilities and shared constants for WebDAV requests

/// Header naming the target URL of a MOVE or COPY.
pub const HEADER_DESTINATION: &str = "Destination";

/// Header controlling whether MOVE or COPY may replace an existing target.
/// Valid values are `T` and `F`.
pub const HEADER_OVERWRITE: &str = "Overwrite";

/// Build a standardized User-Agent string for all WebDAV requests
pub fn build_user_agent() -> String {
    format!("davkit/{} (WebDAV-Client)", env!("CARGO_PKG_VERSION"))
}

/// Value of the `Overwrite` header for the given flag
pub fn overwrite_value(overwrite: bool) -> &'static str {
    if overwrite {
        "T"
    } else {
        "F"
    }
}
