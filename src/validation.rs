//! Parameter parsing for MCP tool calls
//!
//! Tool arguments arrive as strings. These helpers parse them into domain
//! values and turn failures, including facade errors, into public MCP errors
//! so the client sees the message.

use crate::filter::QuickFilter;
use crate::model::Priority;
use crate::service::ServiceError;
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;

/// Build a public invalid-params error
pub fn invalid_params(message: impl Into<String>) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message.into(), true)
}

/// Convert a facade error into a public MCP error
pub fn service_error(error: ServiceError) -> mcp_attr::Error {
    let code = match error {
        ServiceError::NotFound { .. } | ServiceError::Validation(_) => {
            mcp_attr::ErrorCode::INVALID_PARAMS
        }
        ServiceError::Remote(_) => mcp_attr::ErrorCode::INTERNAL_ERROR,
    };
    mcp_attr::Error::new(code).with_message(error.to_string(), true)
}

/// Parse a priority parameter
///
/// # Arguments
/// * `priority_str` - One of low, medium, high
pub fn parse_priority(priority_str: &str) -> McpResult<Priority> {
    priority_str.parse::<Priority>().map_err(invalid_params)
}

/// Parse a quick filter parameter
///
/// # Arguments
/// * `filter_str` - One of all, today, week, high, overdue
pub fn parse_quick_filter(filter_str: &str) -> McpResult<QuickFilter> {
    filter_str.parse::<QuickFilter>().map_err(invalid_params)
}

/// Parse a date parameter
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Parse an optional parameter, treating `None` as absent
pub fn parse_optional<T>(
    value: Option<String>,
    parse: impl Fn(&str) -> McpResult<T>,
) -> McpResult<Option<T>> {
    value.as_deref().map(parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority() {
        assert_eq!(parse_priority("high").unwrap(), Priority::High);
        assert!(parse_priority("urgent").is_err());
    }

    #[test]
    fn test_parse_quick_filter() {
        assert_eq!(parse_quick_filter("week").unwrap(), QuickFilter::Week);
        assert!(parse_quick_filter("month").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
        );
        assert!(parse_date("15/03/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(None, parse_priority).unwrap(), None);
        assert_eq!(
            parse_optional(Some("low".to_string()), parse_priority).unwrap(),
            Some(Priority::Low)
        );
        assert!(parse_optional(Some("x".to_string()), parse_priority).is_err());
    }
}
