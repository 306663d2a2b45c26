use crate::adapter::EnvironmentContext;

/// Pick the notification recipient: the override when it is present and
/// non-blank, otherwise the target's username.
pub fn resolve_recipient(override_recipient: Option<&str>, ctx: &EnvironmentContext) -> String {
    match override_recipient.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => ctx.username.clone(),
    }
}
