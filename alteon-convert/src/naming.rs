//! Canonical name derivation.
//!
//! No renaming authority exists on either platform, so every destination name
//! is derived deterministically from source content: display names and group
//! names are cleaned, word-capitalized and underscore-joined; service-group
//! names additionally carry a `:<port>` suffix so that one source group
//! reused across different vports yields distinct destination groups.

/// Substitutions for characters the target platform rejects. The first two
/// entries undo the mojibake the legacy export produces for accented names.
const CHAR_SUBSTITUTIONS: &[(&str, &str)] = &[("ñ", "n"), ("í", "i"), ("->", ""), (",", "")];

/// Derive the canonical service-group name for one (section, owner, port)
/// triple: the explicit group name when present, else the owning virtual
/// server's display name, cleaned and suffixed with `:<port>`.
pub fn service_group_name(explicit: Option<&str>, vip_name: &str, port: u16) -> String {
    let mut name = explicit.unwrap_or(vip_name).to_string();
    name = substitute_chars(&name);
    name = space_trailing_numeric_suffix(&name);
    name = remove_port_token(&name, port);
    format!("{}:{port}", underscore_name(&name))
}

/// Derive the canonical real-server name: the explicit name when present,
/// else the owning group's name with its `:<port>` suffix stripped.
pub fn real_server_name(explicit: Option<&str>, group_name: &str) -> String {
    let base = match explicit {
        Some(name) => name,
        None => group_name.split(':').next().unwrap_or(group_name),
    };
    underscore_name(base)
}

/// Capitalize the first letter of every whitespace-delimited word and join
/// the words with `_`.
pub fn underscore_name(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn substitute_chars(name: &str) -> String {
    let mut out = name.to_string();
    for (from, to) in CHAR_SUBSTITUTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

/// Turn a trailing `_NNN` or `-NNN` into ` NNN` so a legitimate numeric
/// suffix survives the port-removal step as its own token.
fn space_trailing_numeric_suffix(name: &str) -> String {
    let digit_count = name.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    // Trailing digits are ASCII, so this index is a char boundary.
    let digits_start = name.len() - digit_count;
    if digit_count == 0 || digits_start == 0 {
        return name.to_string();
    }
    let (head, digits) = name.split_at(digits_start);
    match head.chars().last() {
        Some('_') | Some('-') => format!("{} {digits}", &head[..head.len() - 1]),
        _ => name.to_string(),
    }
}

/// Remove the owning port where it appears as a standalone token, collapse
/// the surrounding whitespace, and strip one leftover trailing separator.
fn remove_port_token(name: &str, port: u16) -> String {
    let token = port.to_string();
    if !name.split_whitespace().any(|word| word == token) {
        return name.to_string();
    }
    let mut out = name
        .split_whitespace()
        .filter(|word| *word != token)
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(last) = out.chars().last() {
        if matches!(last, ' ' | '.' | '_' | '-') {
            out.pop();
        }
    }
    out
}
