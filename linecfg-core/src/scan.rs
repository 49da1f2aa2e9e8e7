//! Element id enumeration.

/// Collect the distinct numeric ids of one element kind, in first-appearance
/// order.
///
/// A line contributes an id when it contains `{path} ` immediately followed
/// by digits, anywhere in the line. The result is bookkeeping input for
/// defined-but-never-referenced reporting; region capture goes through
/// [`crate::locate`] instead.
pub fn scan_ids<S: AsRef<str>>(lines: &[S], path: &str) -> Vec<u32> {
    let needle = format!("{path} ");
    let mut ids: Vec<u32> = Vec::new();
    for line in lines {
        let Some(pos) = line.as_ref().find(&needle) else {
            continue;
        };
        let rest = &line.as_ref()[pos + needle.len()..];
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            continue;
        }
        let Ok(id) = digits.parse::<u32>() else {
            continue;
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
