use super::{LogGroupSummary, LogsReader};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs as logs;

pub struct LogsService {
    client: logs::Client,
}

impl LogsService {
    pub fn new(client: logs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogsReader for LogsService {
    /// Describe log groups by name prefix (first page only)
    async fn find_log_groups(&self, prefix: &str) -> Result<Vec<LogGroupSummary>> {
        let response = self
            .client
            .describe_log_groups()
            .log_group_name_prefix(prefix)
            .send()
            .await
            .with_context(|| format!("Failed to describe log groups with prefix {}", prefix))?;

        Ok(response
            .log_groups
            .unwrap_or_default()
            .iter()
            .filter_map(log_group_to_summary)
            .collect())
    }

    async fn latest_event_timestamp(&self, log_group_name: &str) -> Result<Option<i64>> {
        let response = self
            .client
            .describe_log_streams()
            .log_group_name(log_group_name)
            .order_by(logs::types::OrderBy::LastEventTime)
            .descending(true)
            .limit(1)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to describe log streams for log group: {}",
                    log_group_name
                )
            })?;

        Ok(response
            .log_streams
            .unwrap_or_default()
            .first()
            .and_then(|stream| stream.last_event_timestamp))
    }
}

pub(crate) fn log_group_to_summary(log_group: &logs::types::LogGroup) -> Option<LogGroupSummary> {
    Some(LogGroupSummary {
        name: log_group.log_group_name.clone()?,
        creation_time: log_group.creation_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use logs::types::LogGroup;

    #[test]
    fn test_log_group_to_summary() {
        let group = LogGroup::builder()
            .log_group_name("/aws/lambda/orders-api")
            .creation_time(1_700_000_000_000)
            .build();

        assert_eq!(
            log_group_to_summary(&group),
            Some(LogGroupSummary {
                name: "/aws/lambda/orders-api".to_string(),
                creation_time: Some(1_700_000_000_000),
            })
        );
        assert_eq!(log_group_to_summary(&LogGroup::builder().build()), None);
    }
}
