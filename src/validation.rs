//! Input validation for roster tables.
//!
//! Checks structural integrity of a roster before any scheduling work
//! starts. Detects:
//! - Header row other than exactly `Name, Email, Available`
//! - Rows with the wrong number of cells
//! - Email values missing `@` or `.`
//! - Availability values other than `yes`/`no` (case-insensitive)
//!
//! Header problems stop the check early; row problems are all collected.

use std::fmt;

use crate::store::Table;

/// Expected roster headers, in order.
pub const ROSTER_COLUMNS: [&str; 3] = ["Name", "Email", "Available"];

/// Validation result.
pub type ValidationResult = Result<(), ValidationErrors>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Header row is not exactly `Name, Email, Available`.
    InvalidHeaders,
    /// A row has more or fewer cells than there are headers.
    MalformedRow,
    /// An email lacks `@` or `.`.
    InvalidEmail,
    /// An availability value is not `yes` or `no`.
    InvalidAvailability,
}

/// All problems found in one roster.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl ValidationErrors {
    /// Whether any error has the given kind.
    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Whether an email has the minimal shape the roster requires.
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// Parses an availability cell. Accepts `yes`/`no` in any case.
pub fn parse_availability(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Validates a roster table.
///
/// Checks:
/// 1. Headers are exactly [`ROSTER_COLUMNS`] (stops here on failure)
/// 2. Every row has one cell per header
/// 3. Every email contains `@` and `.`
/// 4. Every availability value is `yes` or `no`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(table: &Table) -> ValidationResult {
    if table.columns != ROSTER_COLUMNS {
        return Err(ValidationErrors(vec![ValidationError::new(
            ValidationErrorKind::InvalidHeaders,
            format!(
                "Invalid headers {:?}. Expected: {:?}",
                table.columns, ROSTER_COLUMNS
            ),
        )]));
    }

    let mut errors = Vec::new();

    for (idx, row) in table.rows.iter().enumerate() {
        let line = idx + 1;
        let [name, email, available] = match row.as_slice() {
            [name, email, available] => [name, email, available],
            _ => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedRow,
                    format!(
                        "Row {line} has {} cells, expected {}",
                        row.len(),
                        ROSTER_COLUMNS.len()
                    ),
                ));
                continue;
            }
        };

        if !is_valid_email(email) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidEmail,
                format!("Invalid email format for '{name}' in row {line}: '{email}'"),
            ));
        }

        if parse_availability(available).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidAvailability,
                format!(
                    "Invalid Available value for '{name}' in row {line}: '{available}'. Allowed values: 'yes' or 'no'"
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Table {
        Table::new(ROSTER_COLUMNS)
            .with_row(["A", "a@x.com", "yes"])
            .with_row(["B", "b@x.com", "No"])
            .with_row(["C", "c@x.com", "YES"])
    }

    #[test]
    fn test_valid_roster() {
        assert!(validate_roster(&sample_roster()).is_ok());
    }

    #[test]
    fn test_invalid_headers() {
        let table = Table::new(["Name", "Mail", "Avail"]).with_row(["A", "a@x.com", "yes"]);
        let errors = validate_roster(&table).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has(ValidationErrorKind::InvalidHeaders));
    }

    #[test]
    fn test_reordered_headers_rejected() {
        let table = Table::new(["Email", "Name", "Available"]);
        let errors = validate_roster(&table).unwrap_err();
        assert!(errors.has(ValidationErrorKind::InvalidHeaders));
    }

    #[test]
    fn test_extra_column_rejected() {
        let table = Table::new(["Name", "Email", "Available", "Team"]);
        assert!(validate_roster(&table).is_err());
    }

    #[test]
    fn test_email_needs_at_and_dot() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("a@xcom"));
        assert!(!is_valid_email("a.x.com"));
        assert!(!is_valid_email(""));

        let table = Table::new(ROSTER_COLUMNS).with_row(["A", "ax.com", "yes"]);
        let errors = validate_roster(&table).unwrap_err();
        assert!(errors.has(ValidationErrorKind::InvalidEmail));
    }

    #[test]
    fn test_availability_values() {
        assert_eq!(parse_availability("Yes"), Some(true));
        assert_eq!(parse_availability(" no "), Some(false));
        assert_eq!(parse_availability("maybe"), None);

        let table = Table::new(ROSTER_COLUMNS).with_row(["A", "a@x.com", "maybe"]);
        let errors = validate_roster(&table).unwrap_err();
        assert!(errors.has(ValidationErrorKind::InvalidAvailability));
    }

    #[test]
    fn test_malformed_row() {
        let table = Table::new(ROSTER_COLUMNS).with_row(["A", "a@x.com"]);
        let errors = validate_roster(&table).unwrap_err();
        assert!(errors.has(ValidationErrorKind::MalformedRow));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let table = Table::new(ROSTER_COLUMNS)
            .with_row(["A", "bad", "yes"])
            .with_row(["B", "b@x.com", "perhaps"]);
        let errors = validate_roster(&table).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.to_string().contains("'bad'"));
        assert!(errors.to_string().contains("'perhaps'"));
    }
}
