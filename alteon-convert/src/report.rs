use colored::Colorize;

use crate::findings::{Finding, FindingSeverity};
use crate::summary::MigrationSummary;

/// Render the conversion summary for terminal output.
pub fn render_summary(summary: &MigrationSummary) -> String {
    let mut out = Vec::new();
    out.push("summary".cyan().to_string());
    out.push(format!(
        "- virtual servers: defined={} merged={}",
        summary.defined_virtual_servers, summary.final_virtual_servers
    ));
    out.push(format!(
        "- service groups: defined={} applied={} unapplied={} reuse={} cross_port_extra={}",
        summary.defined_service_groups,
        summary.applied_service_groups,
        summary.unapplied_service_group_ids.len(),
        summary.group_reuse_total,
        summary.cross_port_extra_groups
    ));
    out.push(format!(
        "- service groups: expected={} built={}",
        summary.expected_service_groups, summary.final_service_groups
    ));
    out.push(format!(
        "- real servers: defined={} expected={} built={}",
        summary.defined_real_servers, summary.expected_real_servers, summary.final_real_servers
    ));
    if !summary.unapplied_service_group_ids.is_empty() {
        out.push(format!(
            "- unapplied group ids: {}",
            join_ids(&summary.unapplied_service_group_ids)
        ));
    }
    if !summary.unapplied_real_server_ids.is_empty() {
        out.push(format!(
            "- unapplied real server ids: {}",
            join_ids(&summary.unapplied_real_server_ids)
        ));
    }
    for reuse in &summary.group_reuse {
        out.push(format!("- group {} reused {} times", reuse.id, reuse.times));
    }
    for cross in &summary.cross_port_reuse {
        out.push(format!(
            "- group {} applied on ports {}",
            cross.id,
            cross.ports.join(", ")
        ));
    }
    let verdict = if summary.reconciled {
        "reconciled=yes".green().to_string()
    } else {
        "reconciled=NO".red().to_string()
    };
    out.push(format!("- {verdict}"));
    out.join("\n")
}

/// Render findings, one line each, severity-colored.
pub fn render_findings(findings: &[Finding]) -> String {
    let mut out = Vec::new();
    for finding in findings {
        let tag = match finding.severity {
            FindingSeverity::Warning => "WARN".yellow().to_string(),
            FindingSeverity::Error => "ERROR".red().to_string(),
        };
        out.push(format!("{tag} {} {}", finding.code, finding.message));
    }
    out.join("\n")
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use crate::findings::Finding;
    use crate::model::Model;
    use crate::reuse::ReuseStats;
    use crate::summary::{build_summary, SummaryInputs};

    use super::{render_findings, render_summary};

    #[test]
    fn summary_rendering_lists_counts_and_verdict() {
        let model = Model::default();
        let mut findings = Vec::new();
        let summary = build_summary(
            SummaryInputs {
                model: &model,
                defined_virts: 2,
                defined_groups: 1,
                defined_reals: 3,
                unapplied_groups: vec![1],
                unapplied_reals: vec![4],
                reuse: ReuseStats::default(),
            },
            &mut findings,
        );
        let text = render_summary(&summary);
        assert!(text.contains("defined=2"));
        assert!(text.contains("unapplied group ids: 1"));
        assert!(text.contains("unapplied real server ids: 4"));
        assert!(text.contains("reconciled"));
    }

    #[test]
    fn findings_render_one_line_each() {
        let findings = vec![
            Finding::warning("duplicate_group_name", "dup".to_string()),
            Finding::error("reuse_mismatch", "off by one".to_string()),
        ];
        let text = render_findings(&findings);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("duplicate_group_name"));
        assert!(text.contains("reuse_mismatch"));
    }
}
