//! Independent service-group reuse accounting.
//!
//! This pass re-derives, from the normalized text alone, how often each
//! source group is applied and across how many distinct vports. Because the
//! canonical naming scheme suffixes the owning port, cross-port reuse must
//! produce one extra destination group per additional port; the expected
//! totals computed here cross-check the builders' deduplication-by-name
//! logic without sharing any code with it.

use serde::Serialize;

use crate::element::ElementKind;
use crate::limits::ScanLimits;

/// Reuse of one source group id: how many applications beyond the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReuse {
    pub id: u32,
    pub times: u32,
}

/// One source group applied on several distinct vports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossPortReuse {
    pub id: u32,
    pub ports: Vec<String>,
}

/// Aggregated reuse statistics over the whole dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReuseStats {
    /// Applications beyond the first, across all group ids.
    pub total_reuse: u32,
    /// Destination groups expected beyond one-per-source-id, due to
    /// cross-port reuse.
    pub extra_groups: u32,
    pub reused: Vec<GroupReuse>,
    pub cross_port: Vec<CrossPortReuse>,
}

/// Scan the whole bounded group-id space.
///
/// An application of group `N` is a line ending in `group N` but not in
/// `/group N`: option lines under a vport qualify, the group's own
/// definition header (and any nested path form) does not. The owning vport
/// is recovered by walking back to the nearest virtual-server header line.
pub fn compute_reuse(lines: &[String], limits: &ScanLimits) -> ReuseStats {
    let mut stats = ReuseStats::default();
    for id in 0..limits.max_service_groups {
        let applied = format!("group {id}");
        let defining = format!("/group {id}");

        let applications: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.ends_with(&defining) && line.ends_with(&applied))
            .map(|(index, _)| index)
            .collect();

        let mut ports: Vec<String> = Vec::new();
        for &at in &applications {
            let Some(port) = owning_port(lines, at) else {
                continue;
            };
            if !ports.contains(&port) {
                ports.push(port);
            }
        }

        if ports.len() > 1 {
            stats.extra_groups += (ports.len() - 1) as u32;
            stats.cross_port.push(CrossPortReuse { id, ports });
        }
        if applications.len() > 1 {
            stats.total_reuse += (applications.len() - 1) as u32;
            stats.reused.push(GroupReuse {
                id,
                times: (applications.len() - 1) as u32,
            });
        }
    }
    stats
}

/// Walk upward from an application line to the owning virtual-server header
/// and return its vport number.
fn owning_port(lines: &[String], from: usize) -> Option<String> {
    let virt_path = ElementKind::VirtualServer.path();
    let header = lines[..=from]
        .iter()
        .rev()
        .find(|line| line.contains(virt_path))?;
    let (_, tail) = header.rsplit_once("/service ")?;
    let port = tail.split('/').next()?;
    Some(port.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::compute_reuse;
    use crate::limits::ScanLimits;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn cross_port_reuse_counts_one_extra_group() {
        let dump = lines(
            "/c/slb/group 7\n\
             \tadd 1\n\
             /c/slb/virt 1/service 80\n\
             \tgroup 7\n\
             /c/slb/virt 1/service 443\n\
             \tgroup 7\n",
        );
        let stats = compute_reuse(&dump, &ScanLimits::default());
        assert_eq!(stats.total_reuse, 1);
        assert_eq!(stats.extra_groups, 1);
        assert_eq!(stats.cross_port[0].ports, ["80", "443"]);
        assert_eq!(stats.reused[0].id, 7);
    }

    #[test]
    fn same_port_reuse_adds_no_extra_group() {
        let dump = lines(
            "/c/slb/group 7\n\
             \tadd 1\n\
             /c/slb/virt 1/service 80\n\
             \tgroup 7\n\
             /c/slb/virt 2/service 80\n\
             \tgroup 7\n",
        );
        let stats = compute_reuse(&dump, &ScanLimits::default());
        assert_eq!(stats.total_reuse, 1);
        assert_eq!(stats.extra_groups, 0);
        assert!(stats.cross_port.is_empty());
    }

    #[test]
    fn single_application_is_not_reuse() {
        let dump = lines(
            "/c/slb/group 7\n\
             \tadd 1\n\
             /c/slb/virt 1/service 80\n\
             \tgroup 7\n",
        );
        let stats = compute_reuse(&dump, &ScanLimits::default());
        assert_eq!(stats.total_reuse, 0);
        assert_eq!(stats.extra_groups, 0);
    }

    #[test]
    fn definition_header_is_not_an_application() {
        let dump = lines("/c/slb/group 12\n\tadd 1\n");
        let stats = compute_reuse(&dump, &ScanLimits::default());
        assert_eq!(stats.total_reuse, 0);
        assert!(stats.reused.is_empty());
    }

    #[test]
    fn distinct_ids_sharing_a_digit_suffix_do_not_collide() {
        let dump = lines(
            "/c/slb/virt 1/service 80\n\
             \tgroup 15\n\
             /c/slb/virt 1/service 443\n\
             \tgroup 5\n",
        );
        let stats = compute_reuse(&dump, &ScanLimits::default());
        // Neither id is applied more than once.
        assert_eq!(stats.total_reuse, 0);
    }

    #[test]
    fn vport_header_with_trailing_sibling_data_still_yields_the_port() {
        let dump = lines(
            "/c/slb/virt 2/service 38081/pbind cookie insert\n\
             \tgroup 9\n\
             /c/slb/virt 3/service 80\n\
             \tgroup 9\n",
        );
        let stats = compute_reuse(&dump, &ScanLimits::default());
        assert_eq!(stats.cross_port[0].ports, ["38081", "80"]);
    }
}
