//! Input validation shared by the tool forms. Errors are user-facing text.

pub fn parse_positive(raw: &str, field: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| format!("{field} must be a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{field} must be greater than zero"));
    }
    Ok(value)
}

pub fn parse_non_negative(raw: &str, field: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = trimmed
        .replace(',', "")
        .parse()
        .map_err(|_| format!("{field} must be a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{field} cannot be negative"));
    }
    Ok(value)
}

pub fn parse_quantity(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => u32::try_from(value).map_err(|_| "Quantity is too large".into()),
        Ok(_) => Err("Quantity must be at least 1".into()),
        Err(_) => Err("Quantity must be a whole number".into()),
    }
}

pub fn require_text(raw: &str, field: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_numbers() {
        assert_eq!(parse_positive(" 1,250.5 ", "Value"), Ok(1250.5));
        assert_eq!(
            parse_positive("0", "Weight"),
            Err("Weight must be greater than zero".into())
        );
        assert_eq!(
            parse_positive("-3", "Weight"),
            Err("Weight must be greater than zero".into())
        );
        assert!(parse_positive("abc", "Weight").is_err());
        assert!(parse_positive("NaN", "Weight").is_err());
    }

    #[test]
    fn non_negative_allows_blank_and_zero() {
        assert_eq!(parse_non_negative("", "Shipping"), Ok(0.0));
        assert_eq!(parse_non_negative("0", "Shipping"), Ok(0.0));
        assert!(parse_non_negative("-1", "Shipping").is_err());
    }

    #[test]
    fn quantities() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-2").is_err());
        assert!(parse_quantity("1.5").is_err());
    }

    #[test]
    fn required_text() {
        assert_eq!(require_text("  Shanghai ", "Origin"), Ok("Shanghai".into()));
        assert_eq!(require_text("   ", "Origin"), Err("Origin is required".into()));
    }
}
