//! Question text normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading enumeration such as `12. `: digits, a period, then spaces.
static ENUMERATION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\. +").expect("valid enumeration pattern"));

/// Strip a leading `"<digits>. "` prefix and surrounding whitespace.
///
/// Only the very start of the text is considered, so periods elsewhere
/// (abbreviations, decimals, mid-sentence numbers) are kept.
///
/// ```
/// use quizload::clean_question_text;
///
/// assert_eq!(clean_question_text("3. What is 2+2?"), "What is 2+2?");
/// assert_eq!(clean_question_text("Inc. grew rapidly"), "Inc. grew rapidly");
/// ```
pub fn clean_question_text(text: &str) -> String {
    let text = text.trim_start();
    ENUMERATION_PREFIX.replace(text, "").trim().to_string()
}
