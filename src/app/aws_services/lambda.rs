use super::{FunctionCatalog, FunctionPage};
use crate::app::inventory::types::{FunctionDescriptor, TagSet, NOT_AVAILABLE};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_lambda as lambda;
use tracing::{debug, warn};

pub struct LambdaCatalogService {
    client: lambda::Client,
}

impl LambdaCatalogService {
    pub fn new(client: lambda::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FunctionCatalog for LambdaCatalogService {
    /// List one page of Lambda functions
    async fn list_functions_page(&self, marker: Option<String>) -> Result<FunctionPage> {
        let response = self
            .client
            .list_functions()
            .set_marker(marker)
            .send()
            .await
            .context("Failed to list Lambda functions")?;

        let functions: Vec<FunctionDescriptor> = response
            .functions
            .unwrap_or_default()
            .iter()
            .filter_map(function_to_descriptor)
            .collect();

        debug!(
            "Listed {} Lambda functions (more pages: {})",
            functions.len(),
            response.next_marker.is_some()
        );

        Ok(FunctionPage {
            functions,
            next_marker: response.next_marker,
        })
    }

    async fn list_tags(&self, function_arn: &str) -> Result<TagSet> {
        let response = self
            .client
            .list_tags()
            .resource(function_arn)
            .send()
            .await
            .with_context(|| format!("Failed to list tags for {}", function_arn))?;

        Ok(response.tags.unwrap_or_default().into_iter().collect())
    }
}

/// Convert a listed function configuration; entries without a name are skipped
pub(crate) fn function_to_descriptor(
    function: &lambda::types::FunctionConfiguration,
) -> Option<FunctionDescriptor> {
    let Some(name) = function.function_name.clone() else {
        warn!("Skipping Lambda function listing entry without a name");
        return None;
    };

    Some(FunctionDescriptor {
        name,
        // Container image functions have no runtime
        runtime: function
            .runtime
            .as_ref()
            .map(|runtime| runtime.as_str().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        last_modified: function.last_modified.clone().unwrap_or_default(),
        role_arn: function.role.clone(),
        function_arn: function.function_arn.clone().unwrap_or_default(),
    })
}
