// All LLM prompt templates for the AI generation endpoints.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::generation::models::{BulletsRequest, ImproveTextRequest, SkillsRequest, SummaryRequest};
use crate::llm_client::prompts::{special_focus, NO_PREAMBLE_INSTRUCTION, PARAGRAPH_FORMAT_RULES};

/// Summary prompt. Replace: {title}, {years}, {skills}, {format_rules},
/// {special_focus}, {closing}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Create a professional summary for a {title} with {years} years of experience.

IMPORTANT FORMAT RULES - STRICTLY FOLLOW THESE:
{format_rules}

KEY ELEMENTS TO INCLUDE:
• Start with a strong opening statement about {title} expertise
• Include 2-3 quantifiable achievements or impacts
• Use action verbs: led, developed, optimized, implemented
• End with forward-looking career objective
• Focus on: {skills}

{special_focus}

{closing}"#;

/// Bullets prompt. Replace: {role}, {company}, {track_note}, {context},
/// {focus_intro}, {tailor}
pub const BULLETS_PROMPT_TEMPLATE: &str = r#"Generate exceptional resume bullet points for {role} role at {company}.

{track_note}

Role context: {context}

{focus_intro}

REQUIREMENTS FOR EACH BULLET POINT:
• Start with powerful action verbs (orchestrated, spearheaded, revolutionized, accelerated, transformed)
• Include specific metrics and quantifiable results (increase by X%, reduce by Y%, manage $Z budget)
• Focus on business impact and value creation, not just duties
• Use industry-standard terminology for ATS compatibility
• Demonstrate progression and increasing responsibility
• Showcase both technical expertise and soft skills

FORMAT: one bullet per line, each line starting with the • character.

Generate 5-7 bullet points specific to {role} role.

{tailor}"#;

/// Improve-text prompt. Replace: {text}, {special_focus}, {format_rules}
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Improve this professional summary text:

ORIGINAL TEXT:
"{text}"

{special_focus}

CRITICAL FORMATTING RULES - MUST FOLLOW:
{format_rules}

IMPROVEMENT GUIDELINES:
• Elevate language to professional level
• Add quantifiable metrics where appropriate
• Use powerful action verbs
• Optimize for ATS with relevant keywords
• Focus on achievements and results
• Ensure parallel structure and flow

IMPORTANT: If the original text has bullet points, CONVERT them to smooth paragraph sentences.
Return ONLY the improved 3-5 sentence paragraph, nothing else."#;

/// Skills prompt. Replace: {title}, {field}, {focus_intro}, {focus_closing}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Provide a comprehensive skills list for a {title} targeting {field} roles.

{focus_intro}

CATEGORIZE SKILLS INTO:
1. TECHNICAL/CORE COMPETENCIES: Primary tools, technologies, and hard skills
2. PROFESSIONAL EXPERTISE: Domain knowledge and specialized capabilities
3. LEADERSHIP & SOFT SKILLS: Management, communication, strategic abilities
4. INDUSTRY-SPECIFIC: Relevant certifications, methodologies, frameworks

REQUIREMENTS:
• Include both foundational and advanced skills
• Balance between technical and transferable skills
• Prioritize in-demand, market-relevant competencies
• Include ATS keywords for optimal resume scanning
• Provide 12-18 total skills across categories
• Format as comma-separated list within categories

{focus_closing}"#;

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

fn custom(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Fills `{slot}` placeholders in one left-to-right pass. Inserted values are
/// copied verbatim and never scanned for further slots; unknown `{...}` text
/// is left as is.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let slot = tail
            .find('}')
            .map(|close| &tail[1..close])
            .and_then(|name| slots.iter().find(|(slot, _)| *slot == name));

        match slot {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn build_summary_prompt(title: &str, req: &SummaryRequest) -> String {
    let focus = special_focus("SPECIAL REQUESTS", custom(&req.custom_instructions));
    fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("title", title),
            ("years", or_default(&req.years, "5+")),
            ("skills", or_default(&req.skills, "relevant skills")),
            ("format_rules", PARAGRAPH_FORMAT_RULES),
            ("special_focus", &focus),
            ("closing", NO_PREAMBLE_INSTRUCTION),
        ],
    )
}

pub fn build_bullets_prompt(role: &str, req: &BulletsRequest) -> String {
    let track_note = match (custom(&req.position), custom(&req.title)) {
        (Some(position), Some(title)) if position != title => format!(
            "Note: This is specifically for {position} position within {title} career track."
        ),
        _ => String::new(),
    };

    let instructions = custom(&req.custom_instructions);
    let focus_intro = match instructions {
        Some(text) => format!(
            "ADDITIONAL FOCUS REQUESTED: {text}\n\n\
             Create bullet points that showcase {role} expertise with emphasis on these areas:"
        ),
        None => "Focus on core role responsibilities:".to_string(),
    };
    let tailor = special_focus("TAILOR to highlight", instructions);

    fill_template(
        BULLETS_PROMPT_TEMPLATE,
        &[
            ("role", role),
            ("company", or_default(&req.company, "a leading company")),
            ("track_note", &track_note),
            (
                "context",
                or_default(&req.context, "Key responsibilities and achievements"),
            ),
            ("focus_intro", &focus_intro),
            ("tailor", &tailor),
        ],
    )
}

pub fn build_improve_prompt(text: &str, req: &ImproveTextRequest) -> String {
    let focus = special_focus("SPECIFIC REQUESTS", custom(&req.custom_instructions));
    fill_template(
        IMPROVE_PROMPT_TEMPLATE,
        &[
            ("text", text),
            ("special_focus", &focus),
            ("format_rules", PARAGRAPH_FORMAT_RULES),
        ],
    )
}

pub fn build_skills_prompt(title: &str, req: &SkillsRequest) -> String {
    let (focus_intro, focus_closing) = match custom(&req.custom_instructions) {
        Some(text) => (
            format!(
                "SPECIFIC SKILL AREAS REQUESTED: {text}\n\n\
                 Prioritize skills related to these areas within {title} context:"
            ),
            format!(
                "SPECIAL FOCUS: Emphasize skills related to {text} while maintaining {title} relevance."
            ),
        ),
        None => (
            format!("Provide balanced skill set for general {title} role:"),
            "Focus on skills that demonstrate both depth and breadth of expertise.".to_string(),
        ),
    };

    fill_template(
        SKILLS_PROMPT_TEMPLATE,
        &[
            ("title", title),
            ("field", or_default(&req.field, "competitive industry")),
            ("focus_intro", &focus_intro),
            ("focus_closing", &focus_closing),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults_applied() {
        let prompt = build_summary_prompt("Product Manager", &SummaryRequest::default());
        assert!(prompt.starts_with(
            "Create a professional summary for a Product Manager with 5+ years of experience."
        ));
        assert!(prompt.contains("Focus on: relevant skills"));
        assert!(!prompt.contains("SPECIAL REQUESTS"));
        assert!(!prompt.contains('{'), "unfilled slot in: {prompt}");
    }

    #[test]
    fn test_summary_custom_instructions_appended() {
        let req = SummaryRequest {
            years: Some("8".to_string()),
            custom_instructions: Some("mention fintech".to_string()),
            ..Default::default()
        };
        let prompt = build_summary_prompt("Analyst", &req);
        assert!(prompt.contains("with 8 years of experience"));
        assert!(prompt.contains("SPECIAL REQUESTS: mention fintech"));
    }

    #[test]
    fn test_bullets_track_note_only_when_distinct() {
        let req = BulletsRequest {
            title: Some("Engineering".to_string()),
            position: Some("Tech Lead".to_string()),
            ..Default::default()
        };
        let prompt = build_bullets_prompt("Tech Lead", &req);
        assert!(prompt.contains("specifically for Tech Lead position within Engineering career track"));
        assert!(prompt.contains("at a leading company"));
        assert!(prompt.contains("Focus on core role responsibilities:"));

        let same = BulletsRequest {
            title: Some("Tech Lead".to_string()),
            position: Some("Tech Lead".to_string()),
            ..Default::default()
        };
        assert!(!build_bullets_prompt("Tech Lead", &same).contains("career track"));
    }

    #[test]
    fn test_bullets_custom_focus() {
        let req = BulletsRequest {
            position: Some("SRE".to_string()),
            company: Some("Acme".to_string()),
            custom_instructions: Some("incident response".to_string()),
            ..Default::default()
        };
        let prompt = build_bullets_prompt("SRE", &req);
        assert!(prompt.contains("for SRE role at Acme."));
        assert!(prompt.contains("ADDITIONAL FOCUS REQUESTED: incident response"));
        assert!(prompt.contains("TAILOR to highlight: incident response"));
    }

    #[test]
    fn test_improve_embeds_text_verbatim() {
        let req = ImproveTextRequest {
            text: Some("I did {stuff} at work".to_string()),
            custom_instructions: None,
        };
        let prompt = build_improve_prompt("I did {stuff} at work", &req);
        assert!(prompt.contains("\"I did {stuff} at work\""));
        assert!(prompt.contains("1. Return ONLY a 3-5 sentence professional paragraph"));
        assert!(!prompt.contains("SPECIFIC REQUESTS"));
    }

    #[test]
    fn test_skills_prompt_with_and_without_focus() {
        let plain = build_skills_prompt("Nurse", &SkillsRequest::default());
        assert!(plain.contains("for a Nurse targeting competitive industry roles"));
        assert!(plain.contains("Provide balanced skill set for general Nurse role:"));

        let focused = SkillsRequest {
            field: Some("pediatrics".to_string()),
            custom_instructions: Some("neonatal care".to_string()),
            ..Default::default()
        };
        let prompt = build_skills_prompt("Nurse", &focused);
        assert!(prompt.contains("targeting pediatrics roles"));
        assert!(prompt.contains("SPECIAL FOCUS: Emphasize skills related to neonatal care"));
    }

    #[test]
    fn test_fill_template_single_pass() {
        let filled = fill_template("{a} and {b} {unknown}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(filled, "{b} and x {unknown}");
    }

    #[test]
    fn test_braces_in_caller_text_are_kept_verbatim() {
        let req = SummaryRequest {
            custom_instructions: Some("mention {closing} and {skills}".to_string()),
            ..Default::default()
        };
        let prompt = build_summary_prompt("{years} Engineer", &req);
        assert!(prompt.contains("SPECIAL REQUESTS: mention {closing} and {skills}"));
        assert!(prompt.starts_with("Create a professional summary for a {years} Engineer with 5+"));

        let skills = SkillsRequest {
            custom_instructions: Some("skills named {title}".to_string()),
            ..Default::default()
        };
        let prompt = build_skills_prompt("Nurse", &skills);
        assert!(prompt.contains("SPECIFIC SKILL AREAS REQUESTED: skills named {title}"));

        let bullets = BulletsRequest {
            position: Some("Lead {company}".to_string()),
            custom_instructions: Some("{tailor} outage work".to_string()),
            ..Default::default()
        };
        let prompt = build_bullets_prompt("Lead {company}", &bullets);
        assert!(prompt.contains("for Lead {company} role at a leading company."));
        assert!(prompt.contains("TAILOR to highlight: {tailor} outage work"));
    }
}
