use crate::app::aws_services::FunctionCatalog;
use crate::app::inventory::types::FunctionDescriptor;
use anyhow::{Context, Result};
use tracing::debug;

/// List every function visible to the caller, following `NextMarker` until
/// the last page.
///
/// With a non-empty `allow_list` only functions whose name is exactly one of
/// the listed names are returned. Listing failures propagate.
pub async fn enumerate_functions(
    catalog: &dyn FunctionCatalog,
    allow_list: &[String],
) -> Result<Vec<FunctionDescriptor>> {
    let mut functions = Vec::new();
    let mut marker: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = catalog
            .list_functions_page(marker.take())
            .await
            .with_context(|| format!("Failed to list Lambda functions (page {})", pages + 1))?;
        pages += 1;

        functions.extend(
            page.functions
                .into_iter()
                .filter(|function| allow_list.is_empty() || allow_list.contains(&function.name)),
        );

        match page.next_marker {
            Some(next) if !next.is_empty() => marker = Some(next),
            _ => break,
        }
    }

    debug!(
        "Enumerated {} Lambda functions across {} pages",
        functions.len(),
        pages
    );
    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::aws_services::FunctionPage;
    use crate::app::inventory::types::TagSet;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn descriptor(name: &str) -> FunctionDescriptor {
        FunctionDescriptor {
            name: name.to_string(),
            runtime: "nodejs20.x".to_string(),
            last_modified: "2024-01-01T00:00:00.000+0000".to_string(),
            role_arn: None,
            function_arn: format!("arn:aws:lambda:us-east-1:123456789012:function:{}", name),
        }
    }

    /// Serves pages of two functions each and records the markers it was asked for
    struct PagedCatalog {
        names: Vec<&'static str>,
        seen_markers: Mutex<Vec<Option<String>>>,
        fail_on_page: Option<usize>,
    }

    impl PagedCatalog {
        fn new(names: Vec<&'static str>) -> Self {
            Self {
                names,
                seen_markers: Mutex::new(Vec::new()),
                fail_on_page: None,
            }
        }
    }

    #[async_trait]
    impl FunctionCatalog for PagedCatalog {
        async fn list_functions_page(&self, marker: Option<String>) -> Result<FunctionPage> {
            self.seen_markers.lock().unwrap().push(marker.clone());
            let start: usize = marker.map(|m| m.parse().unwrap()).unwrap_or(0);
            if self.fail_on_page == Some(start / 2) {
                anyhow::bail!("TooManyRequestsException: Rate exceeded");
            }
            let end = (start + 2).min(self.names.len());
            Ok(FunctionPage {
                functions: self.names[start..end].iter().map(|n| descriptor(n)).collect(),
                next_marker: (end < self.names.len()).then(|| end.to_string()),
            })
        }

        async fn list_tags(&self, _function_arn: &str) -> Result<TagSet> {
            Ok(TagSet::new())
        }
    }

    fn names(functions: &[FunctionDescriptor]) -> Vec<&str> {
        functions.iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_follows_pagination_to_the_end() {
        let catalog = PagedCatalog::new(vec!["a", "b", "c", "d", "e"]);
        let functions = enumerate_functions(&catalog, &[]).await.unwrap();

        assert_eq!(names(&functions), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            *catalog.seen_markers.lock().unwrap(),
            vec![None, Some("2".to_string()), Some("4".to_string())]
        );
    }

    #[tokio::test]
    async fn test_allow_list_filters_exact_names() {
        let catalog = PagedCatalog::new(vec!["orders", "orders-v2", "billing", "audit"]);
        let allow = vec!["orders".to_string(), "audit".to_string(), "missing".to_string()];
        let functions = enumerate_functions(&catalog, &allow).await.unwrap();

        assert_eq!(names(&functions), vec!["orders", "audit"]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let catalog = PagedCatalog::new(vec!["orders"]);
        let allow = vec!["nothing-here".to_string()];
        let functions = enumerate_functions(&catalog, &allow).await.unwrap();
        assert!(functions.is_empty());
    }

    #[tokio::test]
    async fn test_empty_account() {
        let catalog = PagedCatalog::new(vec![]);
        assert!(enumerate_functions(&catalog, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let mut catalog = PagedCatalog::new(vec!["a", "b", "c"]);
        catalog.fail_on_page = Some(1);
        let err = enumerate_functions(&catalog, &[]).await.unwrap_err();
        assert!(format!("{:#}", err).contains("TooManyRequestsException"));
    }
}
