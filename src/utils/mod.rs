//! Shared URL helpers.

pub mod url_utils;

pub use url_utils::{is_valid_url, normalize_url, same_origin};
