//! The exported A10 object model.
//!
//! Field names and numeric encodings follow the aXAPI 2.1 create-call payloads
//! (`slb.virtual_server.create`, `slb.service_group.create`,
//! `slb.server.create`). Enabled flags serialize as `1`/`0` and transport
//! classes as the ACOS protocol codes (`2` = TCP, `11` = HTTP). Builder-side
//! bookkeeping (source ids, captured section text, pending members) lives in
//! the draft types of the builder modules and never reaches these structs.

use serde::{Serialize, Serializer};

/// Default connection limit applied to virtual and real servers.
pub const CONN_LIMIT: u32 = 8_000_000;

/// Transport class of a vport or group: layer-4 passthrough or HTTP-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportClass {
    #[default]
    Tcp,
    Http,
}

impl TransportClass {
    /// ACOS protocol code.
    pub fn code(self) -> u8 {
        match self {
            TransportClass::Tcp => 2,
            TransportClass::Http => 11,
        }
    }
}

impl Serialize for TransportClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Load-balancing method of a service group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LbMethod {
    RoundRobin,
    #[default]
    LeastConnection,
    PersistentHash,
}

impl LbMethod {
    pub fn code(self) -> u8 {
        match self {
            LbMethod::RoundRobin => 0,
            LbMethod::LeastConnection => 2,
            LbMethod::PersistentHash => 14,
        }
    }
}

impl Serialize for LbMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Persistence template referenced by a classified vport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceTemplate {
    Cookie,
    CookieJsessionid,
    SourceIp,
    SslSessionId,
}

impl PersistenceTemplate {
    /// Name of the pre-provisioned template on the target device.
    pub fn template(self) -> &'static str {
        match self {
            PersistenceTemplate::Cookie => "Persist_Cookie",
            PersistenceTemplate::CookieJsessionid => "Persist_Cookie_JSESSIONID",
            PersistenceTemplate::SourceIp => "Persist_Srcip",
            PersistenceTemplate::SslSessionId => "Persist_SSLID",
        }
    }
}

fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// Per-vport connection-limit block, fixed defaults unless overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionLimit {
    pub status: u8,
    pub connection_limit: u32,
    pub connection_limit_action: u8,
    pub connection_limit_log: u8,
}

impl Default for ConnectionLimit {
    fn default() -> Self {
        ConnectionLimit {
            status: 0,
            connection_limit: CONN_LIMIT,
            connection_limit_action: 0,
            connection_limit_log: 1,
        }
    }
}

/// A published service address with its vports. Address is the primary
/// identity: one record per address, merged-into but never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualServer {
    pub name: String,
    pub address: String,
    #[serde(serialize_with = "flag")]
    pub status: bool,
    pub conn_limit: u32,
    pub conn_limit_log: u8,
    pub vport_list: Vec<VirtualPort>,
}

/// One service-port configuration under a virtual server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualPort {
    pub port: u16,
    pub protocol: TransportClass,
    pub connection_limit: ConnectionLimit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_persistence_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ip_persistence_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_session_id_persistence_template: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_group: String,
}

impl VirtualPort {
    /// A fresh port with defaults, before classification.
    pub fn new(port: u16) -> Self {
        VirtualPort {
            port,
            protocol: TransportClass::default(),
            connection_limit: ConnectionLimit::default(),
            cookie_persistence_template: None,
            source_ip_persistence_template: None,
            ssl_session_id_persistence_template: None,
            service_group: String::new(),
        }
    }

    /// Attach a persistence template to the field the template kind belongs to.
    pub fn set_persistence(&mut self, template: PersistenceTemplate) {
        let name = template.template().to_string();
        match template {
            PersistenceTemplate::Cookie | PersistenceTemplate::CookieJsessionid => {
                self.cookie_persistence_template = Some(name);
            }
            PersistenceTemplate::SourceIp => {
                self.source_ip_persistence_template = Some(name);
            }
            PersistenceTemplate::SslSessionId => {
                self.ssl_session_id_persistence_template = Some(name);
            }
        }
    }
}

/// A named pool definition. The canonical name (always `...:<port>`) is the
/// primary identity; once created a group is only appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceGroup {
    pub name: String,
    pub protocol: TransportClass,
    pub health_monitor: String,
    pub lb_method: LbMethod,
    pub member_list: Vec<Member>,
}

/// A service-group member. The port is inherited from the group name's
/// suffix: the source format has no member-side port concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub port: u16,
    pub server: String,
    #[serde(serialize_with = "flag")]
    pub status: bool,
}

/// A backend server. Name is the exported identity, address the durable one:
/// an address rediscovered under a new derived name keeps its first-seen name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealServer {
    pub name: String,
    pub host: String,
    #[serde(serialize_with = "flag")]
    pub status: bool,
    pub conn_limit: u32,
    pub conn_limit_log: u8,
    pub health_monitor: String,
    pub port_list: Vec<RealPort>,
}

/// One port offered by a real server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealPort {
    pub port_num: u16,
    pub protocol: TransportClass,
    pub health_monitor: String,
    pub status: u8,
}

impl RealPort {
    pub fn new(port_num: u16) -> Self {
        RealPort {
            port_num,
            protocol: TransportClass::Tcp,
            health_monitor: "(default)".to_string(),
            status: 1,
        }
    }
}

/// The three exported collections, serialized as plain arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub virtual_servers: Vec<VirtualServer>,
    pub service_groups: Vec<ServiceGroup>,
    pub real_servers: Vec<RealServer>,
}
