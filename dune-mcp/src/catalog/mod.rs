// Static catalogs served by the MCP server
//
// The resource list and the Pumpfun dashboard query list never change for
// the lifetime of the process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// URI of the Pumpfun dashboard resource
pub const DASHBOARD_URI: &str = "dune://hashed_official/pumpdotfun";

/// A discoverable data source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub mime_type: String,
    pub description: String,
}

/// A Dune query backing one panel of the dashboard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub query_id: String,
    pub description: String,
}

static RESOURCES: Lazy<Vec<ResourceDescriptor>> = Lazy::new(|| {
    vec![ResourceDescriptor {
        uri: DASHBOARD_URI.to_string(),
        name: "Pumpfun Dashboard Data".to_string(),
        mime_type: "application/json".to_string(),
        description: "Data from the Pumpfun dashboard on Dune".to_string(),
    }]
});

static DASHBOARD_QUERIES: Lazy<Vec<QueryDescriptor>> = Lazy::new(|| {
    [
        ("3705945", "Total deployed"),
        ("3706280", "Fee & Revenue"),
        ("3919233", "Monthly transactions and monthly volume"),
    ]
    .into_iter()
    .map(|(query_id, description)| QueryDescriptor {
        query_id: query_id.to_string(),
        description: description.to_string(),
    })
    .collect()
});

pub fn resources() -> &'static [ResourceDescriptor] {
    &RESOURCES
}

pub fn dashboard_queries() -> &'static [QueryDescriptor] {
    &DASHBOARD_QUERIES
}

/// Look up a resource by URI
pub fn find_resource(uri: &str) -> Option<&'static ResourceDescriptor> {
    RESOURCES.iter().find(|resource| resource.uri == uri)
}
