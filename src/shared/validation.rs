use chrono::NaiveDate;
use validator::ValidationError;

/// Calendar date format accepted for `dateLost` / `dateFound`
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an event date such as `2024-01-31`
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), EVENT_DATE_FORMAT).ok()
}

/// `validator` hook rejecting dates that are not `YYYY-MM-DD`
pub fn validate_event_date(value: &str) -> Result<(), ValidationError> {
    match parse_event_date(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("event_date");
            err.message = Some("Date must use the YYYY-MM-DD format".into());
            Err(err)
        }
    }
}
