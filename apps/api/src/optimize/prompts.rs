// Prompt constants for the optimize relay.

/// Placeholder replaced with the raw job description.
pub const JOB_DESCRIPTION_PLACEHOLDER: &str = "{job_description}";

/// Optimization prompt template. Replace `{job_description}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert HR copywriter and job description optimizer. Analyze and rewrite the following job description to make it more effective at attracting top talent.

Your rewrite should:
1. Lead with the impact and opportunity, not just requirements
2. Use clear, jargon-free language
3. Remove unnecessary requirements (like "10+ years" when 5 would do)
4. Use inclusive language that doesn't discourage qualified candidates
5. Highlight benefits and growth opportunities
6. Make it scannable with clear sections
7. End with a compelling call-to-action

Format your response with clear sections like:
- Role Overview (2-3 sentences about the opportunity)
- What You'll Do (4-6 bullet points)
- What You Bring (skills/experience, be realistic)
- Why Join Us (benefits, culture, growth)
- Call to Action

Original Job Description:
{job_description}

Provide ONLY the optimized job description, no preamble or explanation."#;

/// Builds the outbound prompt. The job description is inserted as-is.
pub fn build_optimize_prompt(job_description: &str) -> String {
    // `replacen` so a placeholder inside the user's own text is left alone.
    OPTIMIZE_PROMPT_TEMPLATE.replacen(JOB_DESCRIPTION_PLACEHOLDER, job_description, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_exactly_one_placeholder() {
        assert_eq!(
            OPTIMIZE_PROMPT_TEMPLATE
                .matches(JOB_DESCRIPTION_PLACEHOLDER)
                .count(),
            1
        );
    }

    #[test]
    fn test_prompt_embeds_input_verbatim() {
        let jd = "Senior Rust Engineer\n\n  - 10+ years   required\t(PhD preferred) ";
        let prompt = build_optimize_prompt(jd);
        assert!(prompt.contains(&format!("Original Job Description:\n{jd}\n\nProvide ONLY")));
    }

    #[test]
    fn test_prompt_is_template_with_placeholder_swapped() {
        let jd = "Barista wanted";
        let (before, after) = OPTIMIZE_PROMPT_TEMPLATE
            .split_once(JOB_DESCRIPTION_PLACEHOLDER)
            .unwrap();
        assert_eq!(build_optimize_prompt(jd), format!("{before}{jd}{after}"));
    }

    #[test]
    fn test_placeholder_in_input_is_not_expanded() {
        let jd = "Literal {job_description} token and \"quotes\" and ${dollars}";
        let prompt = build_optimize_prompt(jd);
        assert!(prompt.contains(jd));
        assert_eq!(prompt.len(), OPTIMIZE_PROMPT_TEMPLATE.len() - JOB_DESCRIPTION_PLACEHOLDER.len() + jd.len());
    }

    #[test]
    fn test_unicode_input_is_preserved() {
        let jd = "Ingénieur logiciel — 東京 🚀";
        assert!(build_optimize_prompt(jd).contains(jd));
    }
}
