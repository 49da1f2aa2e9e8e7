use std::fmt::Display;

/// Prefix shared by every top-level element header in an Alteon dump.
pub const TOP_MARKER: &str = "/c/";

/// The three SLB element kinds the converter extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    VirtualServer,
    ServiceGroup,
    RealServer,
}

impl ElementKind {
    /// Containment path of this kind's top-level sections.
    pub fn path(self) -> &'static str {
        match self {
            ElementKind::VirtualServer => "/c/slb/virt",
            ElementKind::ServiceGroup => "/c/slb/group",
            ElementKind::RealServer => "/c/slb/real",
        }
    }
}

/// Containment path of the vport sections nested under one virtual server.
///
/// `parent` must use whichever numbering the text currently carries: source
/// ids before consolidation, destination indexes after.
pub fn vport_path(parent: impl Display) -> String {
    format!("{} {parent}/service", ElementKind::VirtualServer.path())
}
