use crate::domain::{Employee, SkillGap};
use crate::gemini::{GenerationError, GenerativeModel};
use crate::insights::normalizer::parse_json_lenient;
use serde_json::Value;
use tracing::warn;

/// Keeps only entries with the expected primitive shape: a string skill name
/// and numeric level fields. Input order is preserved; the gap arithmetic is
/// not re-checked.
pub fn filter_skill_gaps(value: &Value) -> Vec<SkillGap> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries.iter().filter_map(well_formed).collect()
}

fn well_formed(entry: &Value) -> Option<SkillGap> {
    Some(SkillGap {
        skill: entry.get("skill")?.as_str()?.to_string(),
        current_level: level(entry.get("currentLevel")?)?,
        desired_level: level(entry.get("desiredLevel")?)?,
        gap: level(entry.get("gap")?)?,
    })
}

fn level(value: &Value) -> Option<i32> {
    Some(value.as_f64()?.round() as i32)
}

/// Asks the model for a skill-gap analysis and returns the well-formed rows.
/// A response that cannot be normalized degrades to an empty list, not an
/// error; only the generation call itself can fail.
pub async fn skill_gap_analysis(
    model: &dyn GenerativeModel,
    employee: &Employee,
    desired_role_title: &str,
) -> Result<Vec<SkillGap>, GenerationError> {
    let prompt = skill_gap_prompt(employee, desired_role_title);
    let text = model.generate(&prompt, true).await?;

    match parse_json_lenient(&text) {
        Some(value) => Ok(filter_skill_gaps(&value)),
        None => {
            warn!(employee = %employee.id, "skill gap analysis response had no structured data");
            Ok(Vec::new())
        }
    }
}

pub fn skill_gap_prompt(employee: &Employee, desired_role_title: &str) -> String {
    let anchor_skill = employee
        .skills
        .first()
        .map(String::as_str)
        .unwrap_or("Relevant Skill");

    format!(
        "Analyze the skill gap for employee {name} (current role: {role}) aspiring for the role of {desired}.\n\
         Current skills: {skills}.\n\
         Assume typical skills for a {desired} include [e.g., Leadership, Strategic Planning, Advanced {anchor}, Project Management, etc. - you can infer these].\n\
         Provide the analysis as a JSON array of objects, where each object has: \"skill\" (string), \"currentLevel\" (number 1-5, estimate based on current role and skills), \"desiredLevel\" (number 1-5, for {desired}), and \"gap\" (number, desiredLevel - currentLevel).\n\
         Only include skills where there's a gap (gap > 0). Estimate currentLevel based on their existing skills and role.\n\
         Example: [{{\"skill\": \"Strategic Planning\", \"currentLevel\": 2, \"desiredLevel\": 4, \"gap\": 2}}]",
        name = employee.name,
        role = employee.role,
        desired = desired_role_title,
        skills = employee.skills.join(", "),
        anchor = anchor_skill,
    )
}
