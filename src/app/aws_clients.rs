use crate::app::aws_services::{
    CloudWatchMetricsService, IamRoleService, InventorySources, LambdaCatalogService, LogsService,
    S3ReportStore,
};
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use std::sync::Arc;
use tracing::{debug, info};

/// SDK clients for every service the inventory reads from or writes to.
///
/// All clients share one `SdkConfig`, resolved once per cold start from the
/// default credential chain (the function's execution role inside Lambda).
#[derive(Debug, Clone)]
pub struct AwsClients {
    pub lambda: aws_sdk_lambda::Client,
    pub logs: aws_sdk_cloudwatchlogs::Client,
    pub cloudwatch: aws_sdk_cloudwatch::Client,
    pub iam: aws_sdk_iam::Client,
    pub s3: aws_sdk_s3::Client,
}

impl AwsClients {
    /// Load the shared SDK config, optionally pinned to `region`
    pub async fn load(region: Option<&str>) -> Self {
        debug!("Loading AWS config (region override: {:?})", region);

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let config = loader.load().await;

        info!(
            "AWS config loaded for region {}",
            config
                .region()
                .map(|region| region.as_ref())
                .unwrap_or("<unset>")
        );

        Self::from_config(&config)
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self {
            lambda: aws_sdk_lambda::Client::new(config),
            logs: aws_sdk_cloudwatchlogs::Client::new(config),
            cloudwatch: aws_sdk_cloudwatch::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
        }
    }

    /// Wrap the clients in the service seams the pipeline consumes
    pub fn into_sources(self) -> InventorySources {
        InventorySources {
            functions: Arc::new(LambdaCatalogService::new(self.lambda)),
            logs: Arc::new(LogsService::new(self.logs)),
            metrics: Arc::new(CloudWatchMetricsService::new(self.cloudwatch)),
            roles: Arc::new(IamRoleService::new(self.iam)),
            store: Arc::new(S3ReportStore::new(self.s3)),
        }
    }
}
