use crate::error::{AppError, AppResult};
use regex::Regex;

/// Validate a cell number in E.164-ish form: optional +, 10 to 15 digits.
pub fn validate_cellno(cellno: &str) -> AppResult<()> {
    let cellno_regex = Regex::new(r"^\+?\d{10,15}$").unwrap();

    if !cellno_regex.is_match(cellno) {
        return Err(AppError::ValidationError(
            "Cell number must be 10-15 digits, optionally prefixed with +".to_string(),
        ));
    }

    Ok(())
}

/// Strip separators so "(0300) 123-4567" and "03001234567" store the same.
pub fn normalize_cellno(cellno: &str) -> String {
    let mut out = String::with_capacity(cellno.len());
    for (i, c) in cellno.chars().enumerate() {
        if c.is_ascii_digit() || (i == 0 && c == '+') {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cellno() {
        assert!(validate_cellno("+923001234567").is_ok());
        assert!(validate_cellno("03001234567").is_ok());
        assert!(validate_cellno("12345").is_err());
        assert!(validate_cellno("+92-300-1234567").is_err());
        assert!(validate_cellno("not-a-number").is_err());
    }

    #[test]
    fn test_normalize_cellno() {
        assert_eq!(normalize_cellno("(0300) 123-4567"), "03001234567");
        assert_eq!(normalize_cellno("+92 300 1234567"), "+923001234567");
        assert_eq!(normalize_cellno("03001234567"), "03001234567");
    }
}
