use std::collections::HashSet;

use super::domain::{canonical_skill_name, Assessment};

/// Pull skill labels out of one assessment.
///
/// Tech-stack tokens come first (comma separated), followed by the assessment
/// type and role as standalone labels. Labels are deduplicated on their
/// canonical name; the first spelling seen is the one returned.
pub fn extract_skills(assessment: &Assessment) -> Vec<String> {
    let stack_tokens = assessment
        .techstack
        .as_deref()
        .into_iter()
        .flat_map(|stack| stack.split(','));

    let standalone = [assessment.kind.as_deref(), assessment.role.as_deref()]
        .into_iter()
        .flatten();

    dedupe_labels(stack_tokens.chain(standalone))
}

pub(crate) fn dedupe_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut skills = Vec::new();

    for label in labels {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(canonical_skill_name(trimmed)) {
            skills.push(trimmed.to_string());
        }
    }

    skills
}
