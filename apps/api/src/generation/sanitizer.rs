//! Generic noise filter applied to every raw completion before task shaping.
//!
//! Strips markdown emphasis, splits into sentence-like units, and drops units
//! that are fragments or known model self-narration.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Returned whenever filtering leaves nothing behind.
pub const PLACEHOLDER: &str = "Professional content generated.";

/// Units shorter than this (in characters, after trimming) are fragments.
const MIN_UNIT_CHARS: usize = 20;

/// A banned preamble pattern and the model habit it targets.
pub struct BannedPattern {
    pub pattern: &'static str,
    pub reason: &'static str,
}

/// Banned preamble table, version 2.
///
/// Every pattern is case-insensitive. Anchored patterns only match at the
/// start of a unit.
pub const BANNED_PATTERNS: &[BannedPattern] = &[
    BannedPattern {
        pattern: r"^Of course[,.]? Here are",
        reason: "compliant opener before a list",
    },
    BannedPattern {
        pattern: r"^Of course[,.]? Here is",
        reason: "compliant opener before a single paragraph",
    },
    BannedPattern {
        pattern: r"^Here are \d+[-+]\d+ (exceptional|professional) (resume )?(bullet points|summary)",
        reason: "counted list announcement, ranged",
    },
    BannedPattern {
        pattern: r"^Here are \d+[-+] \w+ (bullet points|sentences)",
        reason: "counted list announcement, open-ended",
    },
    BannedPattern {
        pattern: r"^Here are some (suggested|recommended) (bullet points|skills|summary)",
        reason: "suggestion announcement",
    },
    BannedPattern {
        pattern: r"^I('ll| will) (now )?(generate|create|provide)",
        reason: "first-person intent narration",
    },
    BannedPattern {
        pattern: r"^Here (is|are) (a|the) (professional|exceptional|comprehensive)",
        reason: "adjective-led announcement",
    },
    BannedPattern {
        pattern: r"crafted to meet your specifications",
        reason: "self-congratulation",
    },
    BannedPattern {
        pattern: r"tailored for a .+ role",
        reason: "tailoring claim",
    },
    BannedPattern {
        pattern: r"^As (requested|per your request)",
        reason: "request acknowledgement",
    },
    BannedPattern {
        pattern: r"^Below (is|are) .+ (bullet points|summary|skills)",
        reason: "positional announcement",
    },
    BannedPattern {
        pattern: r"^Generated (content|summary|bullets)",
        reason: "output label",
    },
    BannedPattern {
        pattern: r"designed to .+ and impact",
        reason: "purpose commentary",
    },
    BannedPattern {
        pattern: r"tells? a compelling story",
        reason: "narrative commentary",
    },
    BannedPattern {
        pattern: r"^Software Engineer,? Comprehensive Skills List",
        reason: "echoed skills-list title",
    },
    BannedPattern {
        pattern: r"^Comprehensive Skills List for",
        reason: "echoed skills-list title",
    },
    BannedPattern {
        pattern: r"^TECHNICAL/CORE COMPETENCIES:",
        reason: "echoed skills category header",
    },
    BannedPattern {
        pattern: r"^PROFESSIONAL EXPERTISE:",
        reason: "echoed skills category header",
    },
    BannedPattern {
        pattern: r"^LEADERSHIP & SOFT SKILLS:",
        reason: "echoed skills category header",
    },
    BannedPattern {
        pattern: r"^INDUSTRY-SPECIFIC:",
        reason: "echoed skills category header",
    },
];

/// Keywords that together mark a bullet-list preamble the table misses.
const PREAMBLE_KEYWORDS: &[&str] = &["here are", "exceptional", "resume", "bullet points"];

static BANNED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BANNED_PATTERNS
        .iter()
        .map(|b| {
            RegexBuilder::new(b.pattern)
                .case_insensitive(true)
                .build()
                .expect("banned pattern table holds valid regexes")
        })
        .collect()
});

/// Index into `BANNED_PATTERNS` of the first pattern matching `unit`.
pub fn banned_match(unit: &str) -> Option<usize> {
    BANNED.iter().position(|re| re.is_match(unit))
}

/// True when `unit` carries every preamble keyword at once.
fn is_compound_preamble(unit: &str) -> bool {
    let lower = unit.to_lowercase();
    PREAMBLE_KEYWORDS.iter().all(|k| lower.contains(k))
}

/// Splits after `.`, `!` or `?` when followed by whitespace; the whitespace run is dropped.
pub fn split_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = idx + c.len_utf8();
        let mut resume = end;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            resume = ws_idx + ws.len_utf8();
            chars.next();
        }
        if resume > end {
            units.push(&text[start..end]);
            start = resume;
        }
    }
    units.push(&text[start..]);
    units
}

fn keep_unit(unit: &str) -> bool {
    if unit.chars().count() < MIN_UNIT_CHARS {
        return false;
    }
    if let Some(idx) = banned_match(unit) {
        debug!("Dropped unit ({}): {unit}", BANNED_PATTERNS[idx].reason);
        return false;
    }
    if is_compound_preamble(unit) {
        debug!("Dropped unit (compound preamble): {unit}");
        return false;
    }
    true
}

/// Generic pass shared by every task. Never returns an empty string.
pub fn strip_noise(text: &str) -> String {
    let unmarked: String = text.chars().filter(|c| !matches!(c, '#' | '*')).collect();

    let kept: Vec<&str> = split_units(&unmarked)
        .into_iter()
        .map(str::trim)
        .filter(|unit| keep_unit(unit))
        .collect();

    if kept.is_empty() {
        return PLACEHOLDER.to_string();
    }
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBSTANCE: &str = " led the migration of twelve services to Kubernetes with zero downtime.";

    #[test]
    fn test_every_banned_pattern_compiles() {
        assert_eq!(BANNED.len(), BANNED_PATTERNS.len());
    }

    #[test]
    fn test_split_units_on_terminal_punctuation() {
        let units = split_units("First one. Second one!  Third?\nFourth");
        assert_eq!(units, vec!["First one.", "Second one!", "Third?", "Fourth"]);
    }

    #[test]
    fn test_split_units_ignores_inner_dots() {
        let units = split_units("Raised uptime to 99.9% across 3 regions.");
        assert_eq!(units, vec!["Raised uptime to 99.9% across 3 regions."]);
    }

    #[test]
    fn test_short_input_becomes_placeholder() {
        assert_eq!(strip_noise("Too short."), PLACEHOLDER);
        assert_eq!(strip_noise("**Hi** there"), PLACEHOLDER);
        assert_eq!(strip_noise(""), PLACEHOLDER);
    }

    #[test]
    fn test_markdown_markers_removed() {
        let out = strip_noise("## **Delivered** a payments platform serving 2M users.");
        assert_eq!(out, "Delivered a payments platform serving 2M users.");
    }

    #[test]
    fn test_each_banned_pattern_drops_its_unit() {
        let samples = [
            "Of course, Here are the bullets you asked for",
            "Of course, here is the summary you asked for",
            "Here are 5-7 exceptional resume bullet points for you",
            "Here are 5+ strong bullet points for the role",
            "Here are some suggested skills for a designer",
            "I will now generate the content for this role",
            "Here is a professional overview of the candidate",
            "These lines were crafted to meet your specifications",
            "This summary is tailored for a Senior Engineer role",
            "As requested, the improved text follows below",
            "Below are the strongest bullet points",
            "Generated content for the requested position",
            "Each point is designed to show scope and impact",
            "This paragraph tells a compelling story",
            "Software Engineer, Comprehensive Skills List",
            "Comprehensive Skills List for Data Scientists",
            "TECHNICAL/CORE COMPETENCIES: Rust and Go",
            "PROFESSIONAL EXPERTISE: distributed systems",
            "LEADERSHIP & SOFT SKILLS: mentoring and hiring",
            "INDUSTRY-SPECIFIC: PCI DSS and SOC 2 audits",
        ];
        assert_eq!(samples.len(), BANNED_PATTERNS.len());
        for (idx, sample) in samples.iter().enumerate() {
            assert_eq!(banned_match(sample), Some(idx), "sample {idx}: {sample}");
            let input = format!("{sample}{SUBSTANCE}");
            assert_eq!(strip_noise(&input), PLACEHOLDER, "sample {idx} survived");
        }
    }

    #[test]
    fn test_banned_patterns_are_case_insensitive() {
        assert!(banned_match("of course, here are the results you wanted").is_some());
        assert!(banned_match("technical/core competencies: Python").is_some());
    }

    #[test]
    fn test_compound_preamble_dropped() {
        let input = "Sure, here are exceptional resume bullet points for this role. \
                     Cut cloud spend by 30% by rightsizing compute fleets.";
        assert_eq!(
            strip_noise(input),
            "Cut cloud spend by 30% by rightsizing compute fleets."
        );
    }

    #[test]
    fn test_compound_near_miss_survives() {
        let input = "Sure, here are outstanding resume bullet points for this role.";
        assert_eq!(strip_noise(input), input);
    }

    #[test]
    fn test_preamble_dropped_substance_kept() {
        let input = "Of course, here is a professional summary. John led three major projects, \
                     increasing throughput by 40% while mentoring five engineers across two teams.";
        assert_eq!(
            strip_noise(input),
            "John led three major projects, increasing throughput by 40% while mentoring five engineers across two teams."
        );
    }

    #[test]
    fn test_strip_noise_is_idempotent() {
        let inputs = [
            "# Summary\nOf course, here are some thoughts. Built a data platform used by 40 analysts daily!  \
             Reduced report latency from hours to minutes. Ok.",
            "• Led migration to AWS, cutting costs 25%\n• Mentored four junior developers on testing",
            "tiny",
        ];
        for input in inputs {
            let once = strip_noise(input);
            assert_eq!(strip_noise(&once), once);
        }
    }

    #[test]
    fn test_newlines_inside_units_are_preserved() {
        let input = "• Led migration to AWS, cutting costs 25%\n• Mentored four junior developers";
        assert_eq!(strip_noise(input), input);
    }
}
