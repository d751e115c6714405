//! Filtering of partial paths requested by untrusted callers
//!
//! Request parameters such as `?include=songs.{name,artist},author` arrive as
//! one comma-separated string. They are split here and checked against a data
//! class's allow-list before anything reaches the parser.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

/// Split a comma-separated request value into paths.
///
/// Commas inside braces belong to a group and do not split. Whitespace around
/// each path is trimmed and empty entries are dropped.
pub fn split_request_partials(raw: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in raw.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => paths.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    paths.push(current);

    paths
        .into_iter()
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .collect()
}

/// Keep the requested paths permitted by `allowed`.
///
/// `None` allows everything and an empty list allows nothing. A path is
/// permitted when the list contains `*`, the path itself, or one of its
/// ancestors (`songs` permits `songs.name`).
pub fn filter_allowed(requested: Vec<String>, allowed: Option<&[String]>) -> Vec<String> {
    let Some(allowed) = allowed else {
        return requested;
    };

    if allowed.iter().any(|entry| entry == "*") {
        return requested;
    }

    requested
        .into_iter()
        .filter(|path| {
            allowed.iter().any(|entry| {
                path == entry
                    || path
                        .strip_prefix(entry.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
        })
        .collect()
}
