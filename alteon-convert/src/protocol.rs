//! Symbolic service-name handling.
//!
//! Alteon dumps freely mix `service http` and `service 80`. All structural
//! matching downstream keys off numeric ports, so symbolic names are rewritten
//! to numbers before any section is located.

/// Known symbolic service names and their numeric ports. `https` is listed
/// before `http` so the longer token is rewritten first.
pub const PROTOCOL_PORTS: &[(&str, u16)] = &[
    ("https", 443),
    ("http", 80),
    ("smtp", 25),
    ("imap", 143),
    ("ldap", 389),
    ("pop3", 110),
];

/// Rewrite every `service <name>` token to `service <number>`, in place.
pub fn normalize_service_tokens(lines: &mut [String]) {
    for line in lines.iter_mut() {
        for (name, port) in PROTOCOL_PORTS {
            let from = format!("service {name}");
            if line.contains(&from) {
                *line = line.replace(&from, &format!("service {port}"));
            }
        }
    }
}

/// Resolve a raw vport token to a numeric port.
///
/// The token is either a symbolic service name, a plain number, or a number
/// with trailing sibling data on the same captured line
/// (`38081/pbind cookie insert`), which is truncated at the first `/`.
pub fn resolve_port_token(token: &str) -> Option<u16> {
    if let Some((_, port)) = PROTOCOL_PORTS.iter().find(|(name, _)| *name == token) {
        return Some(*port);
    }
    let numeric = token.split('/').next().unwrap_or(token);
    numeric.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{normalize_service_tokens, resolve_port_token};

    #[test]
    fn rewrites_symbolic_service_names_in_place() {
        let mut lines = vec![
            "/c/slb/virt 1/service http".to_string(),
            "/c/slb/virt 1/service https".to_string(),
            "\tgroup 7".to_string(),
        ];
        normalize_service_tokens(&mut lines);
        assert_eq!(
            lines,
            [
                "/c/slb/virt 1/service 80",
                "/c/slb/virt 1/service 443",
                "\tgroup 7",
            ]
        );
    }

    #[test]
    fn https_is_not_mangled_by_the_http_rewrite() {
        let mut lines = vec!["/c/slb/virt 2/service https".to_string()];
        normalize_service_tokens(&mut lines);
        assert_eq!(lines, ["/c/slb/virt 2/service 443"]);
    }

    #[test]
    fn resolves_symbolic_numeric_and_trailing_garbage_tokens() {
        assert_eq!(resolve_port_token("imap"), Some(143));
        assert_eq!(resolve_port_token("8080"), Some(8080));
        assert_eq!(
            resolve_port_token("38081/pbind cookie insert"),
            Some(38081)
        );
        assert_eq!(resolve_port_token("bogus"), None);
    }
}
