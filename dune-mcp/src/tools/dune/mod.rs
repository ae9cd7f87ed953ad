// Dune tools module
//
// Tools that expose the Pumpfun dashboard queries and their results.

mod queries;
mod query_data;

pub use queries::DashboardQueriesTool;
pub use query_data::QueryDataTool;

use std::sync::Arc;
use crate::client::QueryResultsSource;
use crate::errors::ToolError;
use crate::tools::registry::ToolRegistry;

/// Register Dune tools with the registry
pub fn register_tools(
    registry: &mut ToolRegistry,
    source: Arc<dyn QueryResultsSource>,
) -> Result<(), ToolError> {
    // Register query data tool
    QueryDataTool::register(registry, source).map_err(|e| {
        log::error!("Failed to register QueryDataTool: {}", e);
        e
    })?;

    // Register dashboard queries tool
    DashboardQueriesTool::register(registry).map_err(|e| {
        log::error!("Failed to register DashboardQueriesTool: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use crate::errors::DuneError;

    struct NoSource;

    #[async_trait]
    impl QueryResultsSource for NoSource {
        async fn query_results(&self, _query_id: &str) -> Result<Value, DuneError> {
            Ok(json!(null))
        }
    }

    #[test]
    fn test_register_tools() {
        let mut registry = ToolRegistry::new();
        register_tools(&mut registry, Arc::new(NoSource)).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_is_an_error() {
        let mut registry = ToolRegistry::new();
        register_tools(&mut registry, Arc::new(NoSource)).unwrap();

        let err = register_tools(&mut registry, Arc::new(NoSource)).unwrap_err();
        assert!(matches!(err, ToolError::RegistrationFailed(_)));
    }
}
