//! Conversion pipeline.
//!
//! One synchronous, single-writer sequence of passes over the normalized
//! line list. Ordering matters: virtual servers are folded in ascending
//! source-id order, consolidation must precede every nested lookup, and the
//! reuse accounting runs against the raw text so it stays independent of the
//! builders it cross-checks.

use std::collections::BTreeSet;

use linecfg_core::{scan_ids, ConfigLines};

use crate::element::ElementKind;
use crate::findings::Finding;
use crate::group;
use crate::limits::ScanLimits;
use crate::model::Model;
use crate::protocol;
use crate::reuse;
use crate::server;
use crate::summary::{build_summary, MigrationSummary, SummaryInputs};
use crate::vip::{self, VipDraft};
use crate::vport;

/// Everything one run produces: the exported model, the summary, and the
/// findings collected along the way.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub model: Model,
    pub summary: MigrationSummary,
    pub findings: Vec<Finding>,
}

/// Run the full extraction over a configuration dump. Performs no I/O.
pub fn convert_config(mut input: ConfigLines, limits: &ScanLimits) -> Conversion {
    protocol::normalize_service_tokens(input.lines_mut());
    let lines = input.lines();

    let defined_virts = scan_ids(lines, ElementKind::VirtualServer.path());
    let defined_groups = scan_ids(lines, ElementKind::ServiceGroup.path());
    let defined_reals = scan_ids(lines, ElementKind::RealServer.path());
    let mut unapplied_groups: BTreeSet<u32> = defined_groups.iter().copied().collect();
    let mut unapplied_reals: BTreeSet<u32> = defined_reals.iter().copied().collect();
    let mut findings: Vec<Finding> = Vec::new();

    let mut drafts = vip::build_virtual_servers(lines, limits);
    vip::consolidate_sections(&mut drafts);
    vport::classify_ports(&mut drafts, &mut unapplied_groups);
    let mut groups = group::build_service_groups(lines, &mut drafts, &mut findings);
    let real_servers = server::build_real_servers(
        lines,
        &mut groups,
        &mut unapplied_reals,
        &mut findings,
    );
    let reuse = reuse::compute_reuse(lines, limits);

    let model = Model {
        virtual_servers: drafts
            .into_iter()
            .map(VipDraft::into_virtual_server)
            .collect(),
        service_groups: groups.into_iter().map(|g| g.group).collect(),
        real_servers,
    };

    let summary = build_summary(
        SummaryInputs {
            model: &model,
            defined_virts: defined_virts.len(),
            defined_groups: defined_groups.len(),
            defined_reals: defined_reals.len(),
            unapplied_groups: unapplied_groups.into_iter().collect(),
            unapplied_reals: unapplied_reals.into_iter().collect(),
            reuse,
        },
        &mut findings,
    );

    Conversion {
        model,
        summary,
        findings,
    }
}
