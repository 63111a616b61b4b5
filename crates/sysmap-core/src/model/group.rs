use serde::{Deserialize, Serialize};

/// Display group of an entity, derived from its RDF class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    Organization,
    System,
    Service,
    Information,
    Other,
}

impl Group {
    pub const ALL: [Group; 5] = [
        Group::Organization,
        Group::System,
        Group::Service,
        Group::Information,
        Group::Other,
    ];

    /// Group name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Group::Organization => "Organization",
            Group::System => "System",
            Group::Service => "Service",
            Group::Information => "Information",
            Group::Other => "Other",
        }
    }

    /// Visibility parameter key in the address bar.
    pub fn param_key(&self) -> &'static str {
        match self {
            Group::Organization => "organization",
            Group::System => "system",
            Group::Service => "service",
            Group::Information => "information",
            Group::Other => "other",
        }
    }

    pub fn from_name(name: &str) -> Option<Group> {
        Group::ALL.into_iter().find(|g| g.name() == name)
    }
}
