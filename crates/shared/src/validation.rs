//! Common validation utilities.

use validator::ValidationError;

/// Validates that every day-of-month value is within 1-31.
pub fn validate_days_of_month(days: &[i16]) -> Result<(), ValidationError> {
    if days.iter().all(|d| (1..=31).contains(d)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("day_of_month_range");
        err.message = Some("Days of month must be between 1 and 31".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_of_month_valid() {
        assert!(validate_days_of_month(&[1, 15, 31]).is_ok());
        assert!(validate_days_of_month(&[]).is_ok());
    }

    #[test]
    fn test_days_of_month_zero_rejected() {
        assert!(validate_days_of_month(&[0, 15]).is_err());
    }

    #[test]
    fn test_days_of_month_too_large_rejected() {
        assert!(validate_days_of_month(&[32]).is_err());
    }

    #[test]
    fn test_days_of_month_negative_rejected() {
        assert!(validate_days_of_month(&[-1]).is_err());
    }

    #[test]
    fn test_days_of_month_error_message() {
        let err = validate_days_of_month(&[99]).unwrap_err();
        assert_eq!(err.code, "day_of_month_range");
        assert!(err.message.unwrap().contains("1 and 31"));
    }
}
