use crate::error::CounselError;

/// Validates raw user input and hands it to the classifier unmodified.
///
/// The pipeline records and classifies exactly what the user submitted;
/// the only rule enforced here is the empty-input guard: blank or
/// whitespace-only text is rejected before anything is dispatched or
/// recorded.
pub fn normalize(raw: &str) -> Result<&str, CounselError> {
    if raw.trim().is_empty() {
        return Err(CounselError::EmptyInput);
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_text_through_unmodified() {
        assert_eq!(normalize("오늘 너무 힘들었어").unwrap(), "오늘 너무 힘들었어");
        // Surrounding whitespace is preserved, not stripped.
        assert_eq!(normalize("  속상해  ").unwrap(), "  속상해  ");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(normalize(""), Err(CounselError::EmptyInput)));
        assert!(matches!(normalize("   \n\t"), Err(CounselError::EmptyInput)));
    }
}
