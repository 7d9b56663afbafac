// Shared prompt fragments.
// Each generation task builds its own prompt in generation::prompts; this file
// holds the pieces several tasks repeat.

/// Output-format rules for tasks whose answer is a single plain paragraph.
pub const PARAGRAPH_FORMAT_RULES: &str = "\
1. Return ONLY a 3-5 sentence professional paragraph
2. NO bullet points, NO numbered lists, NO markdown
3. NO bold text, NO asterisks, NO special formatting
4. Pure paragraph format - sentences separated by spaces
5. Each sentence should be complete and professional
6. Output should be clean plain text only";

/// Closing line that discourages preamble and meta-commentary.
pub const NO_PREAMBLE_INSTRUCTION: &str =
    "CRITICAL: Return ONLY the requested content, no explanations, no labels, no additional text.";

/// Formats caller-supplied free text under `heading`, or nothing when absent or blank.
pub fn special_focus(heading: &str, instructions: Option<&str>) -> String {
    match instructions.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => format!("{heading}: {text}"),
        None => String::new(),
    }
}
