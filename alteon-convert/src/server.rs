//! Real-server extraction and identity resolution.
//!
//! A backend can be referenced from many groups under different derived
//! names. The network address is the durable identity: a rediscovered
//! address keeps its first-seen name, and the member reference being built
//! is rewritten to that name. Two servers claiming one name with different
//! addresses is a source-data problem the converter cannot resolve; the
//! first-seen binding wins and the conflict is reported for upstream fixing.

use std::collections::BTreeSet;

use linecfg_core::{extract_field, locate};

use crate::element::{ElementKind, TOP_MARKER};
use crate::findings::Finding;
use crate::group::GroupDraft;
use crate::model::{Member, RealPort, RealServer, CONN_LIMIT};
use crate::naming;

enum Identity {
    New,
    /// Same name, same address, or same address under another name
    /// (index of the authoritative record).
    Existing(usize),
    /// Same name, different address.
    NameClash(usize),
}

/// Resolve every pending member of every group: derive the backend's
/// canonical name, fill the group's member list, and create or extend the
/// real-server records. Newly created servers remove their source id from
/// `unapplied_reals`.
pub fn build_real_servers(
    lines: &[String],
    groups: &mut [GroupDraft],
    unapplied_reals: &mut BTreeSet<u32>,
    findings: &mut Vec<Finding>,
) -> Vec<RealServer> {
    let path = ElementKind::RealServer.path();
    let mut servers: Vec<RealServer> = Vec::new();
    for draft in groups.iter_mut() {
        // Pending membership is transient; consume it here.
        let pending = std::mem::take(&mut draft.pending);
        let Some(member_port) = group_port(&draft.group.name) else {
            continue;
        };
        for entry in pending {
            let section = locate(lines, TOP_MARKER, path, &entry.server_id.to_string());
            let text = section.text();
            // Address is the identity; a member whose backend has none is
            // skipped.
            let Ok(address) = extract_field(&text, "rip") else {
                continue;
            };
            let explicit = extract_field(&text, "name").ok();
            let mut name = naming::real_server_name(explicit.as_deref(), &draft.group.name);

            let identity = resolve_identity(&servers, &mut name, &address);

            draft.group.member_list.push(Member {
                port: member_port,
                server: name.clone(),
                status: entry.enabled,
            });

            match identity {
                Identity::New => {
                    servers.push(RealServer {
                        name,
                        host: address,
                        status: text.contains("ena"),
                        conn_limit: CONN_LIMIT,
                        conn_limit_log: 1,
                        health_monitor: String::new(),
                        port_list: vec![RealPort::new(member_port)],
                    });
                    unapplied_reals.remove(&entry.server_id);
                }
                Identity::Existing(index) => {
                    let ports = &mut servers[index].port_list;
                    if !ports.iter().any(|p| p.port_num == member_port) {
                        ports.push(RealPort::new(member_port));
                    }
                }
                Identity::NameClash(index) => {
                    findings.push(Finding::error(
                        "real_server_name_collision",
                        format!(
                            "real server name '{name}' maps to both {} and {address}; \
                             keeping the first-seen entry, fix the source data",
                            servers[index].host
                        ),
                    ));
                }
            }
        }
    }
    servers
}

/// Match the derived (name, address) pair against the running server list.
/// On an address match under another name, `name` is rewritten to the
/// existing, authoritative one.
fn resolve_identity(servers: &[RealServer], name: &mut String, address: &str) -> Identity {
    for (index, server) in servers.iter().enumerate() {
        if server.name == *name {
            if server.host == address {
                return Identity::Existing(index);
            }
            return Identity::NameClash(index);
        }
        if server.host == address {
            *name = server.name.clone();
            return Identity::Existing(index);
        }
    }
    Identity::New
}

/// The member port is the group name's `:<port>` suffix; the source format
/// has no member-side port.
fn group_port(group_name: &str) -> Option<u16> {
    group_name.rsplit(':').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::build_real_servers;
    use crate::group::{GroupDraft, PendingMember};
    use crate::model::{LbMethod, ServiceGroup, TransportClass};

    fn group_draft(name: &str, pending: Vec<PendingMember>) -> GroupDraft {
        GroupDraft {
            group: ServiceGroup {
                name: name.to_string(),
                protocol: TransportClass::Tcp,
                health_monitor: String::new(),
                lb_method: LbMethod::LeastConnection,
                member_list: Vec::new(),
            },
            pending,
        }
    }

    fn member(server_id: u32, enabled: bool) -> PendingMember {
        PendingMember { server_id, enabled }
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn creates_servers_and_fills_member_list() {
        let dump = lines(
            "/c/slb/real 1\n\
             \tena\n\
             \trip 192.0.2.1\n\
             \tname \"web one\"\n\
             /c/slb/real 2\n\
             \tena\n\
             \trip 192.0.2.2\n",
        );
        let mut groups = vec![group_draft("Web_Farm:80", vec![member(1, true), member(2, false)])];
        let mut unapplied = BTreeSet::from([1, 2, 3]);
        let mut findings = Vec::new();

        let servers = build_real_servers(&dump, &mut groups, &mut unapplied, &mut findings);

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].name, "Web_One");
        assert_eq!(servers[0].host, "192.0.2.1");
        assert_eq!(servers[0].port_list[0].port_num, 80);
        // No explicit name: fallback from the group name minus the suffix.
        assert_eq!(servers[1].name, "Web_Farm");
        assert_eq!(unapplied, BTreeSet::from([3]));

        let members = &groups[0].group.member_list;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].server, "Web_One");
        assert_eq!(members[0].port, 80);
        assert!(members[0].status);
        assert!(!members[1].status);
        assert!(groups[0].pending.is_empty());
        assert!(findings.is_empty());
    }

    #[test]
    fn same_address_under_new_name_keeps_first_seen_name() {
        let dump = lines(
            "/c/slb/real 1\n\
             \tena\n\
             \trip 192.0.2.1\n\
             \tname \"web one\"\n",
        );
        let mut groups = vec![
            group_draft("Web_Farm:80", vec![member(1, true)]),
            group_draft("Other_Pool:8080", vec![member(1, true)]),
        ];
        let mut unapplied = BTreeSet::from([1]);
        let mut findings = Vec::new();

        let servers = build_real_servers(&dump, &mut groups, &mut unapplied, &mut findings);

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].name, "Web_One");
        let ports: Vec<u16> = servers[0].port_list.iter().map(|p| p.port_num).collect();
        assert_eq!(ports, [80, 8080]);
        assert_eq!(groups[1].group.member_list[0].server, "Web_One");
    }

    #[test]
    fn name_collision_on_different_addresses_reports_and_keeps_first() {
        // Same derived name, different rip: first-seen wins, second sighting
        // is reported and creates nothing.
        let dump = lines(
            "/c/slb/real 1\n\
             \tena\n\
             \trip 192.0.2.1\n\
             \tname \"app\"\n\
             /c/slb/real 2\n\
             \tena\n\
             \trip 192.0.2.9\n\
             \tname \"app\"\n",
        );
        let mut groups = vec![group_draft("Pool_A:80", vec![member(1, true), member(2, true)])];
        let mut unapplied = BTreeSet::from([1, 2]);
        let mut findings = Vec::new();

        let servers = build_real_servers(&dump, &mut groups, &mut unapplied, &mut findings);

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].host, "192.0.2.1");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "real_server_name_collision");
        // The colliding id was not applied as a new server.
        assert_eq!(unapplied, BTreeSet::from([2]));
        // Both members still reference the shared name.
        assert_eq!(groups[0].group.member_list.len(), 2);
        assert_eq!(groups[0].group.member_list[1].server, "App");
    }

    #[test]
    fn duplicate_port_on_one_server_is_kept_once() {
        let dump = lines(
            "/c/slb/real 1\n\
             \tena\n\
             \trip 192.0.2.1\n",
        );
        let mut groups = vec![
            group_draft("Pool_A:80", vec![member(1, true)]),
            group_draft("Pool_B:80", vec![member(1, true)]),
        ];
        let mut unapplied = BTreeSet::new();
        let mut findings = Vec::new();

        let servers = build_real_servers(&dump, &mut groups, &mut unapplied, &mut findings);
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].port_list.len(), 1);
    }

    #[test]
    fn member_without_backend_section_is_skipped() {
        let dump = lines("/c/slb/real 1\n\tena\n\trip 192.0.2.1\n");
        let mut groups = vec![group_draft("Pool_A:80", vec![member(9, true)])];
        let mut unapplied = BTreeSet::from([9]);
        let mut findings = Vec::new();

        let servers = build_real_servers(&dump, &mut groups, &mut unapplied, &mut findings);
        assert!(servers.is_empty());
        assert!(groups[0].group.member_list.is_empty());
        assert_eq!(unapplied, BTreeSet::from([9]));
    }
}
