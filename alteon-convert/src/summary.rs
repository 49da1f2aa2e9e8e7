//! Post-conversion summary and reconciliation.

use serde::Serialize;

use crate::findings::Finding;
use crate::model::Model;
use crate::reuse::{CrossPortReuse, GroupReuse, ReuseStats};

/// Summary statistics for one conversion run, including the independent
/// reconciliation of the builders' output against the reuse accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub defined_virtual_servers: usize,
    pub final_virtual_servers: usize,

    pub defined_service_groups: usize,
    pub applied_service_groups: usize,
    pub unapplied_service_group_ids: Vec<u32>,
    pub group_reuse_total: u32,
    pub cross_port_extra_groups: u32,
    pub group_reuse: Vec<GroupReuse>,
    pub cross_port_reuse: Vec<CrossPortReuse>,
    pub expected_service_groups: usize,
    pub final_service_groups: usize,

    pub defined_real_servers: usize,
    pub unapplied_real_server_ids: Vec<u32>,
    pub expected_real_servers: usize,
    pub final_real_servers: usize,

    /// True when `applied + extra == final` holds for service groups. A
    /// mismatch signals a defect in one of the two independent computations,
    /// not a source-data problem.
    pub reconciled: bool,
}

/// Inputs for building the summary, gathered across the pipeline passes.
pub struct SummaryInputs<'a> {
    pub model: &'a Model,
    pub defined_virts: usize,
    pub defined_groups: usize,
    pub defined_reals: usize,
    pub unapplied_groups: Vec<u32>,
    pub unapplied_reals: Vec<u32>,
    pub reuse: ReuseStats,
}

/// Build the summary and, on a reconciliation mismatch, append the
/// `reuse_mismatch` finding.
pub fn build_summary(inputs: SummaryInputs<'_>, findings: &mut Vec<Finding>) -> MigrationSummary {
    let applied = inputs.defined_groups - inputs.unapplied_groups.len();
    let expected_groups = applied + inputs.reuse.extra_groups as usize;
    let final_groups = inputs.model.service_groups.len();
    let reconciled = expected_groups == final_groups;
    if !reconciled {
        findings.push(Finding::error(
            "reuse_mismatch",
            format!(
                "expected {expected_groups} service groups \
                 (applied {applied} + {} extra from cross-port reuse) but built {final_groups}",
                inputs.reuse.extra_groups
            ),
        ));
    }

    MigrationSummary {
        defined_virtual_servers: inputs.defined_virts,
        final_virtual_servers: inputs.model.virtual_servers.len(),
        defined_service_groups: inputs.defined_groups,
        applied_service_groups: applied,
        unapplied_service_group_ids: inputs.unapplied_groups,
        group_reuse_total: inputs.reuse.total_reuse,
        cross_port_extra_groups: inputs.reuse.extra_groups,
        group_reuse: inputs.reuse.reused,
        cross_port_reuse: inputs.reuse.cross_port,
        expected_service_groups: expected_groups,
        final_service_groups: final_groups,
        defined_real_servers: inputs.defined_reals,
        expected_real_servers: inputs.defined_reals - inputs.unapplied_reals.len(),
        unapplied_real_server_ids: inputs.unapplied_reals,
        final_real_servers: inputs.model.real_servers.len(),
        reconciled,
    }
}
