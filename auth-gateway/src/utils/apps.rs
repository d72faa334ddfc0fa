// auth-gateway/src/utils/apps.rs

/// Sanitise a user-supplied app id before it is used in any lookup.
/// Lowercases and keeps only `[a-z0-9-]`; everything else is dropped.
pub fn sanitise_app_id(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}
