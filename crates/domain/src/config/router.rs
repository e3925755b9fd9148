use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouterConfig {
    pub id: String,

    /// Evaluated in file order; the first matching route wins.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One routing rule. Every matcher defaults to the empty string, which
/// matches anything.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub class: String,

    #[serde(default, rename = "type")]
    pub record_type: String,

    #[serde(default)]
    pub source: String,

    /// Id of a resolver, or of a router defined earlier in the file.
    pub resolver: String,
}
