//! Display name -> URL-safe code, used as the primary key of companies and industries.

use crate::error::AppError;

/// Lowercase ASCII slug of a display name, transliterating non-Latin scripts.
/// e.g. "Apple Computer" -> "apple-computer", "Москва" -> "moskva"
pub fn slugify(name: &str) -> String {
    ::slug::slugify(name.replace('&', " and "))
}

/// Slug of `name` for use as a key. Names without a single letter or digit
/// have no usable code.
pub fn code_for(field: &str, name: &str) -> Result<String, AppError> {
    let code = slugify(name);
    if code.is_empty() {
        return Err(AppError::BadRequest(format!(
            "{} must contain at least one letter or digit: {:?}",
            field, name
        )));
    }
    Ok(code)
}
