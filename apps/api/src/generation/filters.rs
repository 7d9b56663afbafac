//! Task-specific shape filters. Each runs after the generic noise pass and
//! turns cleaned text into the shape its endpoint returns.

use std::sync::LazyLock;

use regex::Regex;

use crate::generation::sanitizer::{strip_noise, PLACEHOLDER};

const BULLET_GLYPH: char = '•';
const MAX_SKILLS: usize = 20;
const MIN_SKILL_CHARS: usize = 2;
const MAX_SKILL_CHARS: usize = 30;
const MAX_IMPROVED_SENTENCES: usize = 6;
/// Summary lines at or below this length are leftover labels.
const MIN_SUMMARY_LINE_CHARS: usize = 10;
const MIN_IMPROVED_LINE_CHARS: usize = 5;

/// Phrases that reveal the model talking about its own rewrite.
const IMPROVE_META_PHRASES: &[&str] = &["improved text", "enhanced version"];

/// Category labels and list headers that leak into skill terms.
const SKILL_LABEL_PHRASES: &[&str] = &[
    "comprehensive skills list",
    "technical/core competencies",
    "professional expertise",
    "leadership & soft skills",
    "industry-specific",
    "category",
    "skills list",
    "skills:",
    "skills for",
    "1. ",
    "2. ",
    "3. ",
    "4. ",
];

/// Placeholder phrases copied from the prompt instead of real skills.
const GENERIC_SKILL_PHRASES: &[&str] = &[
    "primary tools",
    "hard skills",
    "soft skills",
    "domain knowledge",
    "methodologies",
    "frameworks",
    "certifications",
    "relevant certifications",
];

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
static LEADING_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[\d.]+\s*").expect("valid regex"));
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid regex"));
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));
static SKILL_CATEGORY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\d+\.[ \t]*)?[* \t]*(?:TECHNICAL/CORE COMPETENCIES|PROFESSIONAL EXPERTISE|LEADERSHIP & SOFT SKILLS|INDUSTRY-SPECIFIC)[* \t]*:",
    )
    .expect("valid regex")
});

/// Summary pipeline: generic noise pass, then one plain paragraph. Never empty.
pub fn sanitize_summary(raw: &str) -> String {
    or_placeholder(summary_paragraph(&strip_noise(raw)))
}

/// ImproveText pipeline: generic noise pass, then at most six sentences. Never empty.
pub fn sanitize_improved(raw: &str) -> String {
    or_placeholder(improved_paragraph(&strip_noise(raw)))
}

/// Bullets pipeline. Never empty.
pub fn sanitize_bullets(raw: &str) -> Vec<String> {
    list_or_placeholder(bullet_lines(&strip_noise(raw)))
}

/// Skills pipeline: category labels out first, then the generic pass and term split.
/// Never empty.
pub fn sanitize_skills(raw: &str) -> Vec<String> {
    let unlabeled = strip_skill_category_labels(raw);
    list_or_placeholder(skill_terms(&strip_noise(&unlabeled)))
}

fn or_placeholder(text: String) -> String {
    if text.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text
    }
}

fn list_or_placeholder(items: Vec<String>) -> Vec<String> {
    if items.is_empty() {
        vec![PLACEHOLDER.to_string()]
    } else {
        items
    }
}

/// Removes bullet glyphs, blank lines and leading numbering.
fn strip_list_structure(text: &str) -> String {
    let unbulleted: String = text
        .chars()
        .filter(|c| !matches!(c, '•' | '-' | '*'))
        .collect();
    let collapsed = BLANK_LINES.replace_all(&unbulleted, "\n");
    LEADING_NUMBERING
        .replace_all(&collapsed, "")
        .trim()
        .to_string()
}

/// Joins the lines that pass `keep` with spaces and collapses whitespace runs.
fn join_lines(text: &str, keep: impl Fn(&str) -> bool) -> String {
    let joined = LINE_BREAKS
        .split(text)
        .map(str::trim)
        .filter(|&line| keep(line))
        .collect::<Vec<_>>()
        .join(" ");
    WHITESPACE_RUN.replace_all(&joined, " ").trim().to_string()
}

/// Summary shape: one plain paragraph.
pub fn summary_paragraph(text: &str) -> String {
    let stripped = strip_list_structure(text);
    join_lines(&stripped, |line| {
        line.chars().count() > MIN_SUMMARY_LINE_CHARS
    })
}

/// ImproveText shape: one plain paragraph of at most six sentences, no quotes
/// and no meta-commentary lines.
pub fn improved_paragraph(text: &str) -> String {
    let stripped = strip_list_structure(text);
    let unquoted: String = stripped
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201C}' | '\u{201D}'))
        .collect();

    let paragraph = join_lines(&unquoted, |line| {
        let lower = line.to_lowercase();
        line.chars().count() >= MIN_IMPROVED_LINE_CHARS
            && !IMPROVE_META_PHRASES.iter().any(|p| lower.contains(p))
    });

    let sentences: Vec<&str> = SENTENCE_END
        .split(&paragraph)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() > MAX_IMPROVED_SENTENCES {
        format!("{}.", sentences[..MAX_IMPROVED_SENTENCES].join(". "))
    } else {
        paragraph
    }
}

/// Non-empty trimmed lines that pass `keep`, in source order.
fn lines_where(text: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|&line| !line.is_empty() && keep(line))
        .map(str::to_string)
        .collect()
}

/// Bullets shape: lines carrying `•`, or failing that, hyphenated or
/// numbered lines. Source order, no deduplication.
///
/// The generic pass runs first and rejoins sentence units with spaces, so
/// bullets that end in `.`, `!` or `?` arrive here on one line and come back
/// as a single entry.
pub fn bullet_lines(text: &str) -> Vec<String> {
    let bullets = lines_where(text, |line| line.contains(BULLET_GLYPH));
    if !bullets.is_empty() {
        return bullets;
    }
    lines_where(text, |line| line.contains('-') || NUMBERED_ITEM.is_match(line))
}

/// Removes "TECHNICAL/CORE COMPETENCIES:"-style labels (optionally numbered)
/// so the skills listed after them survive the generic pass.
pub fn strip_skill_category_labels(raw: &str) -> String {
    SKILL_CATEGORY_LABEL.replace_all(raw, "").into_owned()
}

fn is_skill_term(term: &str) -> bool {
    let len = term.chars().count();
    if !(MIN_SKILL_CHARS..=MAX_SKILL_CHARS).contains(&len) {
        return false;
    }
    if term.contains(':') || NUMBERED_ITEM.is_match(term) {
        return false;
    }
    let lower = term.to_lowercase();
    !SKILL_LABEL_PHRASES.iter().any(|p| lower.contains(p))
        && !GENERIC_SKILL_PHRASES.iter().any(|p| lower.contains(p))
}

/// Skills shape: short terms split on commas, line breaks, bullets and
/// hyphens, capped at twenty in source order.
pub fn skill_terms(text: &str) -> Vec<String> {
    text.split([',', '\n', BULLET_GLYPH, '-'])
        .map(str::trim)
        .filter(|term| is_skill_term(term))
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_strips_structure() {
        let input = "1. Results-driven engineer with a decade of backend work\n\n\
                     • Shipped   billing systems used by 3,000 merchants\nSummary:";
        assert_eq!(
            summary_paragraph(input),
            "Resultsdriven engineer with a decade of backend work Shipped billing systems used by 3,000 merchants"
        );
    }

    #[test]
    fn test_summary_end_to_end_keeps_substance() {
        let raw = "Of course, here is a professional summary. John led three major projects, \
                   increasing throughput by 40% while mentoring five engineers across two teams.";
        assert_eq!(
            sanitize_summary(raw),
            "John led three major projects, increasing throughput by 40% while mentoring five engineers across two teams."
        );
    }

    #[test]
    fn test_summary_never_empty() {
        assert_eq!(sanitize_summary("ok"), PLACEHOLDER);
        assert_eq!(sanitize_improved("ok"), PLACEHOLDER);
    }

    #[test]
    fn test_improved_drops_quotes_and_meta_lines() {
        let input = "Here is the improved text\n\"Seasoned analyst who turned raw sales data into weekly forecasts.\"";
        assert_eq!(
            improved_paragraph(input),
            "Seasoned analyst who turned raw sales data into weekly forecasts."
        );
    }

    #[test]
    fn test_improved_truncates_to_six_sentences() {
        let input = "One sentence here. Two sentence here. Three sentence here. \
                     Four sentence here. Five sentence here. Six sentence here. Seven sentence here.";
        assert_eq!(
            improved_paragraph(input),
            "One sentence here. Two sentence here. Three sentence here. \
             Four sentence here. Five sentence here. Six sentence here."
        );
    }

    #[test]
    fn test_improved_six_sentences_untouched() {
        let input = "A one here. B two here! C three? D four. E five. F six.";
        assert_eq!(improved_paragraph(input), input);
    }

    #[test]
    fn test_bullets_keep_glyph_lines_in_order() {
        let input = "Intro line without glyph\n• Cut costs by 20%\nanother plain line\n\
                     • Led a team of 6\n• Shipped v2 in 3 months";
        assert_eq!(
            bullet_lines(input),
            vec!["• Cut costs by 20%", "• Led a team of 6", "• Shipped v2 in 3 months"]
        );
    }

    #[test]
    fn test_bullets_fall_back_to_hyphen_lines() {
        let input = "Key achievements\n- Grew revenue 15%\nplain text\n- Hired 4 engineers";
        assert_eq!(
            bullet_lines(input),
            vec!["- Grew revenue 15%", "- Hired 4 engineers"]
        );
    }

    #[test]
    fn test_bullets_fall_back_to_numbered_lines() {
        let input = "1. Grew revenue 15%\n2. Hired 4 engineers\nclosing remark";
        assert_eq!(
            bullet_lines(input),
            vec!["1. Grew revenue 15%", "2. Hired 4 engineers"]
        );
    }

    #[test]
    fn test_bullets_never_empty_after_sanitize() {
        let out = sanitize_bullets("Nothing structured in this reply at all");
        assert_eq!(out, vec![PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_bullets_ending_in_periods_merge_into_one_entry() {
        let raw = "• Cut vendor costs by 20% this year.\n• Led a team of six engineers.";
        assert_eq!(
            sanitize_bullets(raw),
            vec!["• Cut vendor costs by 20% this year. • Led a team of six engineers."]
        );
    }

    #[test]
    fn test_bullets_without_terminal_punctuation_stay_separate() {
        let raw = "• Cut vendor costs by 20% this year\n• Led a team of six engineers";
        assert_eq!(
            sanitize_bullets(raw),
            vec!["• Cut vendor costs by 20% this year", "• Led a team of six engineers"]
        );
    }

    #[test]
    fn test_skills_header_and_generic_dropped() {
        let raw = "TECHNICAL/CORE COMPETENCIES: Python, Go, Kubernetes, 1. Soft skills, Communication";
        assert_eq!(
            sanitize_skills(raw),
            vec!["Python", "Go", "Kubernetes", "Communication"]
        );
    }

    #[test]
    fn test_skills_cap_and_order() {
        let mut terms: Vec<String> = (1..=22).map(|i| format!("Skill{i:02}")).collect();
        terms.insert(3, "Soft skills".to_string());
        terms.insert(7, "Methodologies".to_string());
        terms.insert(11, "Skills list".to_string());
        terms.insert(15, "Category".to_string());
        terms.insert(19, "An extremely long descriptive skill phrase".to_string());
        assert_eq!(terms.len(), 27);

        let skills = skill_terms(&terms.join(", "));
        let expected: Vec<String> = (1..=20).map(|i| format!("Skill{i:02}")).collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_skills_headers_rejected() {
        assert!(!is_skill_term("Tools:"));
        assert!(!is_skill_term("3. Docker"));
        assert!(!is_skill_term("C"));
        assert!(is_skill_term("Go"));
        assert!(is_skill_term("CI/CD"));
    }

    #[test]
    fn test_numbered_category_labels_removed() {
        let raw = "1. **TECHNICAL/CORE COMPETENCIES**: SQL, Tableau\n2. PROFESSIONAL EXPERTISE: Forecasting";
        assert_eq!(
            strip_skill_category_labels(raw),
            " SQL, Tableau\n Forecasting"
        );
    }

    #[test]
    fn test_skills_split_on_hyphen_and_bullet() {
        assert_eq!(
            skill_terms("• Rust\n- Terraform\nAWS, GCP"),
            vec!["Rust", "Terraform", "AWS", "GCP"]
        );
    }
}
