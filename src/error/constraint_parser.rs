use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Extracts structured (entity, field, value) information out of the
/// free-text messages Postgres produces for constraint violations, e.g.
/// turning a `users_email_key` violation into a Duplicate error on
/// `users.email`.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing, cached for reuse
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in PostgreSQL DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            // Matches column names in quotes
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation into (entity, field, value).
    ///
    /// The constraint name (e.g. `users_email_key`) carries the table and
    /// column; the violating value is pulled from the DETAIL line.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (entity, field) = constraint_name.and_then(Self::parse_constraint_name)?;
        let value = Self::extract_key_value_from_message(message)
            .map(|(_, v)| v)
            .unwrap_or_else(|| "duplicate_value".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into the offending column name.
    pub fn parse_not_null_violation(message: &str) -> Option<String> {
        Self::extract_column_from_message(message)
    }

    /// Parses a foreign key violation into (field, referenced_value).
    pub fn parse_foreign_key_violation(message: &str) -> Option<(String, String)> {
        Self::extract_key_value_from_message(message)
    }

    /// Splits a Postgres constraint name like `users_email_key` or
    /// `bookings_item_id_fkey` into (table, column).
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stripped = constraint
            .strip_suffix("_key")
            .or_else(|| constraint.strip_suffix("_fkey"))
            .or_else(|| constraint.strip_suffix("_check"))?;

        // Table names never contain '_' in this schema except item_requests;
        // try the two-segment prefix first so its constraints parse correctly.
        if let Some(rest) = stripped.strip_prefix("item_requests_") {
            return Some(("item_requests".to_string(), rest.to_string()));
        }
        let (table, column) = stripped.split_once('_')?;
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts ("field", "value") from a "Key (field)=(value)" DETAIL line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns().key_value.captures(message)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    /// Extracts a quoted column name from a message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        let caps = Self::patterns().column_name.captures(message)?;
        Some(caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_email_constraint() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(booker@example.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "booker@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_constraint_name_fkey() {
        let result = ConstraintParser::parse_constraint_name("bookings_item_id_fkey");
        assert_eq!(result, Some(("bookings".to_string(), "item_id".to_string())));
    }

    #[test]
    fn test_parse_constraint_name_item_requests_table() {
        let result = ConstraintParser::parse_constraint_name("item_requests_requestor_id_fkey");
        assert_eq!(
            result,
            Some(("item_requests".to_string(), "requestor_id".to_string()))
        );
    }

    #[test]
    fn test_extract_column_from_not_null_message() {
        let message = "null value in column \"email\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message),
            Some("email".to_string())
        );
    }

    #[test]
    fn test_parse_foreign_key_detail() {
        let message = "insert or update on table \"items\" violates foreign key constraint \"items_owner_id_fkey\"\nDETAIL: Key (owner_id)=(999) is not present in table \"users\".";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message),
            Some(("owner_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_unparseable_constraint_name() {
        assert_eq!(ConstraintParser::parse_constraint_name("nonsense"), None);
    }
}
