//! Virtual-server extraction and source-id consolidation.
//!
//! The legacy platform caps vports per virtual server, so operators spill
//! overflow ports into new numeric ids sharing the same address. The builder
//! folds every source id into one destination record per address; the
//! consolidation pass then renumbers the captured text so nested lookups key
//! off the destination index instead of the original ids.

use linecfg_core::{extract_field, locate};

use crate::element::{vport_path, ElementKind, TOP_MARKER};
use crate::limits::ScanLimits;
use crate::model::{PersistenceTemplate, TransportClass, VirtualPort, VirtualServer, CONN_LIMIT};
use crate::naming;
use crate::protocol::resolve_port_token;

/// A destination virtual server under construction. `source_ids` and
/// `section_text` are bookkeeping for the later passes and are dropped on
/// export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipDraft {
    pub address: String,
    pub name: String,
    pub enabled: bool,
    pub source_ids: Vec<u32>,
    pub section_text: String,
    pub ports: Vec<PortDraft>,
}

/// A vport under construction; classification fills the transport class and
/// persistence, the group builder fills the service-group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDraft {
    pub port: u16,
    pub protocol: TransportClass,
    pub persistence: Option<PersistenceTemplate>,
    pub group_id: Option<u32>,
    pub service_group: String,
}

impl PortDraft {
    fn new(port: u16) -> Self {
        PortDraft {
            port,
            protocol: TransportClass::default(),
            persistence: None,
            group_id: None,
            service_group: String::new(),
        }
    }
}

impl VipDraft {
    /// Export form: transient bookkeeping dropped, ports converted.
    pub fn into_virtual_server(self) -> VirtualServer {
        VirtualServer {
            name: self.name,
            address: self.address,
            status: self.enabled,
            conn_limit: CONN_LIMIT,
            conn_limit_log: 1,
            vport_list: self.ports.into_iter().map(port_to_model).collect(),
        }
    }
}

fn port_to_model(draft: PortDraft) -> VirtualPort {
    let mut port = VirtualPort::new(draft.port);
    port.protocol = draft.protocol;
    if let Some(template) = draft.persistence {
        port.set_persistence(template);
    }
    port.service_group = draft.service_group;
    port
}

/// Extract one draft per destination address, scanning source ids in
/// ascending order so merges are deterministic.
///
/// Presence is probed with an exact definition-line match rather than the
/// occurrence scanner: merge candidates must be folded into the destination
/// model even when their id was already seen under another address.
pub fn build_virtual_servers(lines: &[String], limits: &ScanLimits) -> Vec<VipDraft> {
    let path = ElementKind::VirtualServer.path();
    let mut drafts: Vec<VipDraft> = Vec::new();
    for id in 0..limits.max_virtual_servers {
        let probe = format!("{path} {id}");
        if !lines.iter().any(|line| line == &probe) {
            continue;
        }
        let section = locate(lines, TOP_MARKER, path, &id.to_string());
        let text = section.text();
        // The address is the identity; an element without one is skipped.
        let Ok(address) = extract_field(&text, "vip") else {
            continue;
        };

        if let Some(existing) = drafts.iter_mut().find(|d| d.address == address) {
            existing.source_ids.push(id);
            existing.section_text.push_str(&text);
            collect_ports(&text, id, &mut existing.ports);
        } else {
            let name = match extract_field(&text, "dname") {
                Ok(dname) => naming::underscore_name(&dname),
                Err(_) => format!("_{address}_"),
            };
            let enabled = section
                .lines()
                .get(1)
                .is_some_and(|line| line.contains("ena"));
            let mut ports = Vec::new();
            collect_ports(&text, id, &mut ports);
            drafts.push(VipDraft {
                address,
                name,
                enabled,
                source_ids: vec![id],
                section_text: text,
                ports,
            });
        }
    }
    drafts
}

/// Port Collector: resolve every vport token under `source_id` inside
/// `text`, de-duplicating against the destination's existing ports.
fn collect_ports(text: &str, source_id: u32, ports: &mut Vec<PortDraft>) {
    let path = vport_path(source_id);
    let mut start = 0;
    while let Some(pos) = text[start..].find(&path) {
        let at = start + pos;
        if let Ok(token) = extract_field(&text[at..], &path) {
            if let Some(port) = resolve_port_token(&token) {
                if !ports.iter().any(|p| p.port == port) {
                    ports.push(PortDraft::new(port));
                }
            }
        }
        start = at + path.len();
    }
}

/// Identifier Consolidator: rewrite every source-id reference in each draft's
/// captured text to the draft's own index, so per-port and per-group lookups
/// address the merged entity. Must run before any nested lookup.
pub fn consolidate_sections(drafts: &mut [VipDraft]) {
    let path = ElementKind::VirtualServer.path();
    for (index, draft) in drafts.iter_mut().enumerate() {
        for source_id in draft.source_ids.clone() {
            let from = format!("{path} {source_id}");
            let to = format!("{path} {index}");
            draft.section_text = replace_id_tag(&draft.section_text, &from, &to);
        }
    }
}

/// Replace `from` with `to` wherever `from` is not followed by a further
/// digit, so renumbering id 1 never corrupts a reference to id 12.
fn replace_id_tag(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(from) {
        let after = &rest[pos + from.len()..];
        out.push_str(&rest[..pos]);
        if after.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            out.push_str(from);
        } else {
            out.push_str(to);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}
