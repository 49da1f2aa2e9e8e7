//! Service-group extraction.
//!
//! Groups are created once per canonical name. Cross-port reuse of one
//! source group necessarily yields several destination groups because the
//! canonical name carries the owning port; same-port reuse resolves to the
//! already-created group. Membership stays pending (raw backend ids) until
//! the real-server pass has derived final server names.

use linecfg_core::{extract_field, locate};

use crate::element::{ElementKind, TOP_MARKER};
use crate::findings::Finding;
use crate::model::{LbMethod, ServiceGroup, TransportClass};
use crate::naming;
use crate::vip::VipDraft;

/// A service group plus its unresolved membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDraft {
    pub group: ServiceGroup,
    pub pending: Vec<PendingMember>,
}

/// A raw membership entry: backend id plus enable state, resolved to a
/// server name by the real-server pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMember {
    pub server_id: u32,
    pub enabled: bool,
}

/// Health-monitor tokens that require a `content` option to be usable on the
/// target device; without it the monitor falls back to the default.
const CONTENT_REQUIRED: &[&str] = &["http", "smtp", "imap", "pop3", "ldap"];

/// Build service groups for every classified vport, applying the canonical
/// name back onto the vport. Rediscovery of an existing name reuses the
/// group and emits a `duplicate_group_name` finding so operators can tell
/// benign reuse apart from genuine source-data duplicates.
pub fn build_service_groups(
    lines: &[String],
    drafts: &mut [VipDraft],
    findings: &mut Vec<Finding>,
) -> Vec<GroupDraft> {
    let path = ElementKind::ServiceGroup.path();
    let mut groups: Vec<GroupDraft> = Vec::new();
    for draft in drafts.iter_mut() {
        let vip_name = draft.name.clone();
        for port in &mut draft.ports {
            let Some(group_id) = port.group_id else {
                continue;
            };
            let section = locate(lines, TOP_MARKER, path, &group_id.to_string());
            let text = section.text();

            let explicit = extract_field(&text, "name").ok();
            let name = naming::service_group_name(explicit.as_deref(), &vip_name, port.port);
            port.service_group = name.clone();

            if groups.iter().any(|g| g.group.name == name) {
                findings.push(Finding::warning(
                    "duplicate_group_name",
                    format!("service group '{name}' reused by source group {group_id}"),
                ));
                continue;
            }

            groups.push(GroupDraft {
                group: ServiceGroup {
                    name,
                    protocol: TransportClass::Tcp,
                    health_monitor: resolve_health_monitor(&text),
                    lb_method: resolve_lb_method(&text),
                    member_list: Vec::new(),
                },
                pending: collect_pending_members(&text),
            });
        }
    }
    groups
}

/// Every `add <id>` occurrence becomes a pending member defaulting to
/// enabled; every `dis <id>` flips the matching pending members to disabled.
fn collect_pending_members(text: &str) -> Vec<PendingMember> {
    let mut pending: Vec<PendingMember> = id_occurrences(text, "add")
        .into_iter()
        .map(|server_id| PendingMember {
            server_id,
            enabled: true,
        })
        .collect();
    for disabled in id_occurrences(text, "dis") {
        for member in pending.iter_mut().filter(|m| m.server_id == disabled) {
            member.enabled = false;
        }
    }
    pending
}

/// All ids following `keyword ` anywhere in the text, duplicates kept.
fn id_occurrences(text: &str, keyword: &str) -> Vec<u32> {
    let needle = format!("{keyword} ");
    let mut ids = Vec::new();
    let mut start = 0;
    while let Some(pos) = text[start..].find(&needle) {
        let at = start + pos + needle.len();
        let digits: String = text[at..].chars().take_while(char::is_ascii_digit).collect();
        if let Ok(id) = digits.parse() {
            ids.push(id);
        }
        start = at;
    }
    ids
}

fn resolve_health_monitor(text: &str) -> String {
    let token = extract_field(text, "health").unwrap_or_else(|_| "(default)".to_string());
    let token = if CONTENT_REQUIRED.contains(&token.as_str()) && !text.contains("content") {
        "(default)".to_string()
    } else {
        token
    };
    match token.as_str() {
        "smtp" => "HM_SMTP",
        "http" => "HM_HTTP",
        "imap" => "HM_IMAP",
        "ldap" => "HM_LDAP",
        "pop3" => "HM_POP3",
        _ => "",
    }
    .to_string()
}

fn resolve_lb_method(text: &str) -> LbMethod {
    match extract_field(text, "metric").as_deref() {
        Ok("roundrobin") => LbMethod::RoundRobin,
        Ok("phash 255.255.255.255") => LbMethod::PersistentHash,
        _ => LbMethod::LeastConnection,
    }
}
