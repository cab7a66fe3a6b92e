use super::RoleDirectory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_iam as iam;
use chrono::{DateTime, Utc};

pub struct IamRoleService {
    client: iam::Client,
}

impl IamRoleService {
    pub fn new(client: iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleDirectory for IamRoleService {
    async fn role_last_used(&self, role_name: &str) -> Result<Option<DateTime<Utc>>> {
        let response = self
            .client
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .with_context(|| format!("Failed to get IAM role {}", role_name))?;

        let role = response
            .role
            .ok_or_else(|| anyhow::anyhow!("GetRole returned no role for {}", role_name))?;

        role.role_last_used
            .and_then(|last_used| last_used.last_used_date)
            .map(|date| {
                smithy_to_chrono(&date).with_context(|| {
                    format!("Role {} has an out-of-range last used date", role_name)
                })
            })
            .transpose()
    }
}

/// Convert an SDK timestamp into a chrono UTC timestamp
pub(crate) fn smithy_to_chrono(date: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(date.secs(), date.subsec_nanos())
}
