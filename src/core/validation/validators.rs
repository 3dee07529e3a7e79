//! Reusable field validators
//!
//! Every validator receives the field name and the raw form value (`None`
//! when the key is absent) and answers with the error message to report.

/// Boxed validator signature shared by every rule
pub type FieldValidator = Box<dyn Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync>;

/// Validator: field is present and not blank
pub fn required() -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: Option<&str>| match value {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(format!("'{}' is required", field)),
    }
}

/// Validator: value coerces to a finite number
///
/// Absent values are left to [`required`].
pub fn numeric() -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: Option<&str>| match value {
        None => Ok(()),
        Some(s) => match coerce_number(s) {
            Some(_) => Ok(()),
            None => Err(format!("'{}' must be a number (value: '{}')", field, s)),
        },
    }
}

/// Validator: number must not be negative
///
/// Non-numeric values pass; [`numeric`] reports them.
pub fn non_negative() -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone
{
    |field: &str, value: Option<&str>| match value.and_then(coerce_number) {
        Some(num) if num < 0.0 => Err(format!(
            "'{}' must not be negative (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be one of the allowed strings (exact match)
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: Option<&str>| match value {
        Some(s) if allowed.contains(&s) => Ok(()),
        Some(s) => Err(format!(
            "'{}' must be one of {:?} (value: '{}')",
            field, allowed, s
        )),
        None => Err(format!("'{}' must be one of {:?}", field, allowed)),
    }
}

/// Coerce a form string into a finite number
///
/// Surrounding whitespace is ignored. Blank strings and non-finite values
/// (`NaN`, `inf`) do not coerce.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
