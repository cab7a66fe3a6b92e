//! AWS SDK error categorization for collector fallbacks.
//!
//! Collectors never surface their errors; they substitute a default value
//! and log why. This module turns the wrapped SDK error into a short,
//! greppable category for that log line. It does not drive any retry logic.

/// Why a best-effort lookup fell back to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Request was throttled due to rate limiting
    Throttled { error_code: String },
    Timeout,
    /// Could not reach the service at all
    NetworkError,
    /// AWS-side transient failure
    ServiceUnavailable,
    /// The resource being described does not exist (deleted role, missing log group)
    NotFound { error_code: String },
    PermissionDenied { error_code: String },
    Other { error_code: String },
}

impl ErrorCategory {
    /// Short label for log output
    pub fn short_label(&self) -> &'static str {
        match self {
            ErrorCategory::Throttled { .. } => "throttled",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::NetworkError => "network",
            ErrorCategory::ServiceUnavailable => "unavailable",
            ErrorCategory::NotFound { .. } => "not_found",
            ErrorCategory::PermissionDenied { .. } => "permission_denied",
            ErrorCategory::Other { .. } => "error",
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            ErrorCategory::Throttled { error_code }
            | ErrorCategory::NotFound { error_code }
            | ErrorCategory::PermissionDenied { error_code }
            | ErrorCategory::Other { error_code } => Some(error_code),
            ErrorCategory::Timeout
            | ErrorCategory::NetworkError
            | ErrorCategory::ServiceUnavailable => None,
        }
    }
}

/// Categorize an error returned by one of the service seams.
///
/// SDK errors only print "service error" through `Display`, so the debug
/// form (which carries the error code) is inspected when that is all the
/// display form says.
pub fn categorize_error(error: &anyhow::Error) -> ErrorCategory {
    let error_str = format!("{:#}", error);
    let detail = if error_str.contains("service error") {
        format!("{:?}", error)
    } else {
        error_str
    };

    categorize_error_string(&detail)
}

/// Categorize an error based on its string representation
pub fn categorize_error_string(error_str: &str) -> ErrorCategory {
    if error_str.contains("ThrottlingException")
        || error_str.contains("Throttling")
        || error_str.contains("TooManyRequestsException")
        || error_str.contains("RequestLimitExceeded")
        || error_str.contains("RateExceeded")
    {
        return ErrorCategory::Throttled {
            error_code: extract_error_code(error_str).unwrap_or_else(|| "Throttling".to_string()),
        };
    }

    if error_str.contains("TimeoutError")
        || error_str.contains("timed out")
        || error_str.contains("deadline exceeded")
    {
        return ErrorCategory::Timeout;
    }

    if error_str.contains("DispatchFailure")
        || error_str.contains("connection")
        || error_str.contains("Connection")
        || error_str.contains("DNS")
    {
        return ErrorCategory::NetworkError;
    }

    if error_str.contains("ServiceUnavailable")
        || error_str.contains("ServiceFailure")
        || error_str.contains("InternalServerError")
        || error_str.contains("InternalFailure")
    {
        return ErrorCategory::ServiceUnavailable;
    }

    if error_str.contains("NoSuchEntity")
        || error_str.contains("ResourceNotFoundException")
        || error_str.contains("NotFound")
    {
        return ErrorCategory::NotFound {
            error_code: extract_error_code(error_str).unwrap_or_else(|| "NotFound".to_string()),
        };
    }

    if error_str.contains("AccessDenied")
        || error_str.contains("UnauthorizedOperation")
        || error_str.contains("InvalidClientTokenId")
        || error_str.contains("ExpiredToken")
    {
        return ErrorCategory::PermissionDenied {
            error_code: extract_error_code(error_str)
                .unwrap_or_else(|| "AccessDenied".to_string()),
        };
    }

    ErrorCategory::Other {
        error_code: extract_error_code(error_str).unwrap_or_else(|| "Error".to_string()),
    }
}

/// Extract an AWS error code from an error message if present.
///
/// Recognizes `code: "Name"` in debug output and a leading `Name: message`.
fn extract_error_code(error_str: &str) -> Option<String> {
    let code_start = error_str
        .find("code: Some(\"")
        .map(|i| i + 12)
        .or_else(|| error_str.find("code: \"").map(|i| i + 7));

    if let Some(start) = code_start {
        let rest = &error_str[start..];
        if let Some(end) = rest.find('"') {
            let code = &rest[..end];
            if !code.is_empty() && code.len() < 64 {
                return Some(code.to_string());
            }
        }
    }

    let prefix = error_str.split(':').next()?.trim();
    if prefix.ends_with("Exception") || prefix.ends_with("Error") || prefix.ends_with("Entity") {
        let code = prefix.rsplit("::").next().unwrap_or(prefix);
        if !code.is_empty() && code.len() < 64 && !code.contains(' ') {
            return Some(code.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_throttling() {
        let cat = categorize_error_string("ThrottlingException: Rate exceeded");
        assert_eq!(
            cat,
            ErrorCategory::Throttled {
                error_code: "ThrottlingException".to_string()
            }
        );
        assert_eq!(cat.short_label(), "throttled");
    }

    #[test]
    fn test_categorize_timeout() {
        let cat = categorize_error_string("TimeoutError: request timed out after 30s");
        assert_eq!(cat, ErrorCategory::Timeout);
        assert_eq!(cat.error_code(), None);
    }

    #[test]
    fn test_categorize_network_error() {
        let cat = categorize_error_string("DispatchFailure: connection refused");
        assert_eq!(cat, ErrorCategory::NetworkError);
    }

    #[test]
    fn test_categorize_deleted_role() {
        let cat = categorize_error_string(
            "Failed to get IAM role orders-role: NoSuchEntity { message: \"The role with name orders-role cannot be found.\", meta: ErrorMetadata { code: Some(\"NoSuchEntity\") } }",
        );
        assert_eq!(
            cat,
            ErrorCategory::NotFound {
                error_code: "NoSuchEntity".to_string()
            }
        );
    }

    #[test]
    fn test_categorize_access_denied() {
        let cat = categorize_error_string("AccessDeniedException: User is not authorized");
        assert_eq!(cat.short_label(), "permission_denied");
        assert_eq!(cat.error_code(), Some("AccessDeniedException"));
    }

    #[test]
    fn test_categorize_generic_error() {
        let cat = categorize_error_string("ValidationException: Invalid parameter");
        assert_eq!(
            cat,
            ErrorCategory::Other {
                error_code: "ValidationException".to_string()
            }
        );
    }

    #[test]
    fn test_categorize_anyhow_chain() {
        let error = anyhow::anyhow!("AccessDenied: not allowed")
            .context("Failed to read metric Invocations for orders-api");
        assert_eq!(categorize_error(&error).short_label(), "permission_denied");
    }

    #[test]
    fn test_extract_error_code() {
        assert_eq!(
            extract_error_code("ThrottlingException: Rate exceeded"),
            Some("ThrottlingException".to_string())
        );
        assert_eq!(
            extract_error_code("meta { code: \"ValidationException\" }"),
            Some("ValidationException".to_string())
        );
        assert_eq!(extract_error_code("plain failure"), None);
    }
}
