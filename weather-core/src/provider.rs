//! Outbound provider integration.

pub mod openweather;

pub use openweather::OpenWeatherService;

/// Shorten a provider error body for inclusion in error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_untouched() {
        assert_eq!(truncate_body("{\"cod\":401}"), "{\"cod\":401}");
    }

    #[test]
    fn long_body_is_cut_on_a_char_boundary() {
        let body = "맑음".repeat(150);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.trim_end_matches("...").chars().count(), 200);
    }
}
