use crate::domain::{Employee, TrainingProgram};
use crate::gemini::{GenerationError, GenerativeModel};
use rand::Rng;

/// At most this many keyword matches are surfaced.
pub const MAX_MATCHES: usize = 3;

/// Outcome of matching freeform recommendation text against the catalog.
///
/// The fallback pick is deliberately a separate variant: it is a uniform
/// random selection made only because nothing matched, and callers must
/// present it as a weak match rather than a genuine recommendation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramMatches {
    /// Programs whose name, description, or gained skills contain a keyword
    /// from the recommendation text, in catalog order.
    Keyword(Vec<TrainingProgram>),
    /// Nothing matched; one program drawn uniformly from the catalog.
    Fallback(TrainingProgram),
    /// Nothing matched and the catalog was empty.
    None,
}

impl ProgramMatches {
    pub fn programs(&self) -> Vec<&TrainingProgram> {
        match self {
            ProgramMatches::Keyword(programs) => programs.iter().collect(),
            ProgramMatches::Fallback(program) => vec![program],
            ProgramMatches::None => Vec::new(),
        }
    }

    pub fn is_weak(&self) -> bool {
        !matches!(self, ProgramMatches::Keyword(_))
    }
}

/// Lower-cases and whitespace-splits the recommendation text, then keeps
/// catalog programs containing any keyword as a substring of their name,
/// description, or gained skills. Capped at [`MAX_MATCHES`], catalog order
/// preserved.
pub fn match_programs<R: Rng>(
    recommendation: &str,
    catalog: &[TrainingProgram],
    rng: &mut R,
) -> ProgramMatches {
    let lowered = recommendation.to_lowercase();
    let keywords: Vec<&str> = lowered.split_whitespace().collect();

    let matched: Vec<TrainingProgram> = catalog
        .iter()
        .filter(|program| program_mentions_any(program, &keywords))
        .take(MAX_MATCHES)
        .cloned()
        .collect();

    if !matched.is_empty() {
        return ProgramMatches::Keyword(matched);
    }
    if catalog.is_empty() {
        return ProgramMatches::None;
    }

    let pick = rng.gen_range(0..catalog.len());
    ProgramMatches::Fallback(catalog[pick].clone())
}

fn program_mentions_any(program: &TrainingProgram, keywords: &[&str]) -> bool {
    let name = program.name.to_lowercase();
    let description = program.description.to_lowercase();
    let skills: Vec<String> = program
        .skills_gained
        .iter()
        .map(|skill| skill.to_lowercase())
        .collect();

    keywords.iter().any(|kw| {
        name.contains(kw) || description.contains(kw) || skills.iter().any(|s| s.contains(kw))
    })
}

/// Asks the model for training recommendations as a short paragraph. The
/// caller runs the narrative through [`match_programs`] to surface catalog
/// entries.
pub async fn recommend_programs(
    model: &dyn GenerativeModel,
    employee: &Employee,
    competency_gaps: &[String],
    organization: &str,
) -> Result<String, GenerationError> {
    let prompt = recommendation_prompt(employee, competency_gaps, organization);
    model.generate(&prompt, false).await
}

pub fn recommendation_prompt(
    employee: &Employee,
    competency_gaps: &[String],
    organization: &str,
) -> String {
    format!(
        "Employee {name} (Role: {role}) has the following leadership competency gaps: {gaps}.\n\
         Their career goal is: \"{goal}\".\n\
         Based on this, recommend 2-3 types of training programs or focus areas that would be most beneficial for their leadership development at {organization}.\n\
         Provide a brief justification for each recommendation.\n\
         Format as a short paragraph.",
        name = employee.name,
        role = employee.role,
        gaps = competency_gaps.join(", "),
        goal = employee.career_goals,
    )
}
