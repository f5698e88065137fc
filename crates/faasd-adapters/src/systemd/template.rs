//! Unit template rendering.
//!
//! Templates use `{{.Key}}` placeholders (the leading dot is optional).
//! Every placeholder must have a value.

use std::collections::BTreeMap;

use crate::error::SystemdError;

/// Substitute placeholders in a unit template.
pub fn render_unit(
    unit: &str,
    template: &str,
    values: &BTreeMap<String, String>,
) -> Result<String, SystemdError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            // Unterminated, emit verbatim
            out.push_str(&rest[start..]);
            return Ok(out);
        };

        let raw = after_open[..end].trim();
        let key = raw.strip_prefix('.').unwrap_or(raw);
        let value = values
            .get(key)
            .ok_or_else(|| SystemdError::UnresolvedPlaceholder {
                unit: unit.to_string(),
                key: key.to_string(),
            })?;
        out.push_str(value);
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
