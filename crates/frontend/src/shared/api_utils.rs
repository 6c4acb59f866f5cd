//! API utilities for frontend-backend communication
//!
//! The backend serves the JSON API from the same origin as the app, so the
//! base URL is just the window origin.

/// Get the base URL for API requests
///
/// # Returns
/// - The current origin like "https://example.com"
/// - Empty string if window is not available
pub fn api_base() -> String {
    match web_sys::window() {
        Some(w) => w.location().origin().unwrap_or_default(),
        None => String::new(),
    }
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/finances/categories");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
