//! Vport classification.
//!
//! Per vport region the transport class and persistence-template requirement
//! are inferred from a small ordered set of marker substrings. Delayed
//! binding (`dbind ena`) makes the vport a candidate for HTTP-aware
//! processing; the persistence mode then decides between HTTP and plain TCP,
//! with TLS ports always falling back to TCP since the device cannot inspect
//! encrypted cookies.

use std::collections::BTreeSet;

use linecfg_core::{extract_field, locate, Section};

use crate::element::{vport_path, TOP_MARKER};
use crate::model::{PersistenceTemplate, TransportClass};
use crate::vip::{PortDraft, VipDraft};

/// Classify every port of every draft and record service-group
/// back-references. Referenced group ids are removed from `unapplied_groups`.
///
/// Must run after consolidation: the vport lookup keys off the destination
/// index, which only exists in the rewritten section text.
pub fn classify_ports(drafts: &mut [VipDraft], unapplied_groups: &mut BTreeSet<u32>) {
    for (index, draft) in drafts.iter_mut().enumerate() {
        let owner = Section::from_text(&draft.section_text);
        let path = vport_path(index);
        for port in &mut draft.ports {
            let sub = locate(owner.lines(), TOP_MARKER, &path, &port.port.to_string());
            let text = sub.text();
            classify(port, &text);
            if let Ok(raw) = extract_field(&text, "group") {
                if let Some(group_id) = leading_id(&raw) {
                    port.group_id = Some(group_id);
                    unapplied_groups.remove(&group_id);
                }
            }
        }
    }
}

/// First-match decision table over the region's marker substrings.
fn classify(port: &mut PortDraft, text: &str) {
    let on_443 = text.contains(" 443\n");
    let on_80 = text.contains(" 80\n");

    if !text.contains("dbind ena") {
        port.protocol = TransportClass::Tcp;
        return;
    }

    if text.contains("pbind cookie insert") {
        if on_443 {
            port.protocol = TransportClass::Tcp;
        } else {
            port.protocol = TransportClass::Http;
            port.persistence = Some(PersistenceTemplate::Cookie);
        }
    } else if text.contains("pbind cookie passive JSESSIONID") {
        if on_443 {
            port.protocol = TransportClass::Tcp;
        } else {
            port.protocol = TransportClass::Http;
            port.persistence = Some(PersistenceTemplate::CookieJsessionid);
        }
    } else if text.contains("pbind clientip") {
        port.protocol = if on_443 {
            TransportClass::Tcp
        } else if on_80 {
            TransportClass::Http
        } else {
            TransportClass::Tcp
        };
        port.persistence = Some(PersistenceTemplate::SourceIp);
    } else if text.contains("pbind sslid") {
        port.protocol = TransportClass::Tcp;
        port.persistence = Some(PersistenceTemplate::SslSessionId);
    } else {
        port.protocol = if on_80 {
            TransportClass::Http
        } else {
            TransportClass::Tcp
        };
    }
}

fn leading_id(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
