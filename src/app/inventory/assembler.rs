use crate::app::inventory::types::{
    render_tags, FunctionDescriptor, InventoryRecord, LastSuccessTime, LogGroupStatus,
    MetricTotals, RoleInfo, TagSet,
};

/// Collector outputs for one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFields {
    pub log_group: LogGroupStatus,
    pub metrics: MetricTotals,
    pub last_success: LastSuccessTime,
    pub tags: TagSet,
    pub role: RoleInfo,
}

/// Flatten a function and its collected fields into one report row
pub fn assemble_record(function: &FunctionDescriptor, fields: &CollectedFields) -> InventoryRecord {
    InventoryRecord {
        function_name: function.name.clone(),
        runtime: function.runtime.clone(),
        last_modified: function.last_modified.clone(),
        log_group_enabled: fields.log_group.enabled_label().to_string(),
        log_group_creation_date: fields.log_group.creation_date().to_string(),
        total_invocations: fields.metrics.invocations,
        total_errors: fields.metrics.errors,
        last_success_time: fields.last_success.to_string(),
        tags: render_tags(&fields.tags),
        execution_role: fields.role.name().to_string(),
        role_last_used_date: fields.role.last_used().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn orders() -> FunctionDescriptor {
        FunctionDescriptor {
            name: "orders-api".to_string(),
            runtime: "python3.12".to_string(),
            last_modified: "2024-02-10T08:15:00.000+0000".to_string(),
            role_arn: Some("arn:aws:iam::123456789012:role/orders-role".to_string()),
            function_arn: "arn:aws:lambda:us-east-1:123456789012:function:orders-api".to_string(),
        }
    }

    #[test]
    fn test_assemble_fully_resolved() {
        let fields = CollectedFields {
            log_group: LogGroupStatus::Enabled {
                created_at: "2023-11-14 22:13:20".to_string(),
            },
            metrics: MetricTotals {
                invocations: 1520,
                errors: 7,
            },
            last_success: LastSuccessTime::At("2025-05-31 23:59:01".to_string()),
            tags: TagSet::from([
                ("team".to_string(), "checkout".to_string()),
                ("env".to_string(), "prod".to_string()),
            ]),
            role: RoleInfo::Resolved {
                name: "orders-role".to_string(),
                last_used: Some("2025-05-31 23:59:00".to_string()),
            },
        };

        assert_eq!(
            assemble_record(&orders(), &fields),
            InventoryRecord {
                function_name: "orders-api".to_string(),
                runtime: "python3.12".to_string(),
                last_modified: "2024-02-10T08:15:00.000+0000".to_string(),
                log_group_enabled: "Yes".to_string(),
                log_group_creation_date: "2023-11-14 22:13:20".to_string(),
                total_invocations: 1520,
                total_errors: 7,
                last_success_time: "2025-05-31 23:59:01".to_string(),
                tags: "{env=prod, team=checkout}".to_string(),
                execution_role: "orders-role".to_string(),
                role_last_used_date: "2025-05-31 23:59:00".to_string(),
            }
        );
    }

    #[test]
    fn test_assemble_all_defaults() {
        let fields = CollectedFields {
            log_group: LogGroupStatus::NotEnabled,
            metrics: MetricTotals::default(),
            last_success: LastSuccessTime::Unavailable,
            tags: TagSet::new(),
            role: RoleInfo::Unavailable,
        };
        let record = assemble_record(&orders(), &fields);

        assert_eq!(record.function_name, "orders-api");
        assert_eq!(record.log_group_enabled, "No");
        assert_eq!(record.log_group_creation_date, "N/A");
        assert_eq!((record.total_invocations, record.total_errors), (0, 0));
        assert_eq!(record.last_success_time, "N/A");
        assert_eq!(record.tags, "{}");
        assert_eq!(record.execution_role, "N/A");
        assert_eq!(record.role_last_used_date, "N/A");
    }
}
