//! Helpers shared by the clients.

use crate::{Error, ErrorContext, Result};
use tracing::trace;

/// Substitute the client's default model when the caller left it empty.
pub(crate) fn fill_default_model(model: &mut String, default: &str) {
    if model.is_empty() {
        trace!(model = default, "using client default model");
        model.push_str(default);
    }
}

/// Check that an endpoint override is an absolute http(s) URL.
pub(crate) fn validate_endpoint(field: &str, endpoint: String) -> Result<String> {
    let parsed = url::Url::parse(&endpoint).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid endpoint URL: {}", e),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(endpoint.clone()),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("Unsupported endpoint scheme: {}", parsed.scheme()),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(endpoint),
        ));
    }
    Ok(endpoint)
}
