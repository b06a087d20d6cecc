use crate::domain::{Employee, Role};
use crate::gemini::{GenerationError, GenerativeModel};

/// Candidates must score strictly above this potential threshold.
pub const POTENTIAL_FLOOR: u8 = 75;
/// Candidates must score strictly above this performance threshold.
pub const PERFORMANCE_FLOOR: u8 = 70;
/// At most this many candidates are surfaced per role.
pub const MAX_CANDIDATES: usize = 5;

/// Selects potential successors for a role: high potential, solid
/// performance, not already holding the role, and some overlap with the
/// role's required skills (or the role lists none). Sorted descending by
/// potential with a stable sort, so input order is preserved among equal
/// scores; truncated to [`MAX_CANDIDATES`].
pub fn rank_successors(employees: &[Employee], role: &Role) -> Vec<Employee> {
    let mut candidates: Vec<Employee> = employees
        .iter()
        .filter(|employee| {
            employee.potential_score > POTENTIAL_FLOOR
                && employee.performance_score > PERFORMANCE_FLOOR
                && employee.role != role.title
                && (role.required_skills.is_empty()
                    || employee
                        .skills
                        .iter()
                        .any(|skill| role.required_skills.contains(skill)))
        })
        .cloned()
        .collect();

    candidates.sort_by(|a, b| b.potential_score.cmp(&a.potential_score));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// Asks the model for a brief predictive analysis of one candidate stepping
/// into the role. Returns the narrative verbatim.
pub async fn simulate_succession(
    model: &dyn GenerativeModel,
    role: &Role,
    candidate: &Employee,
    organization: &str,
) -> Result<String, GenerationError> {
    let prompt = succession_prompt(role, candidate, organization);
    model.generate(&prompt, false).await
}

pub fn succession_prompt(role: &Role, candidate: &Employee, organization: &str) -> String {
    format!(
        "Simulate a succession scenario for {organization}.\n\
         Key Role to Fill: {title} (Department: {department}, Required Skills: {required})\n\
         Potential Candidate: {name} (Current Role: {current_role}, Skills: {skills}, Performance: {performance}/100, Potential: {potential}/100)\n\n\
         Provide a brief (2-3 paragraphs) predictive analysis covering:\n\
         1. Candidate's readiness for the role (strengths, potential gaps).\n\
         2. Potential impact on the team/department if they take this role.\n\
         3. Key development areas for the candidate to succeed in this new role.\n\
         Be concise and insightful.",
        title = role.title,
        department = role.department,
        required = role.required_skills.join(", "),
        name = candidate.name,
        current_role = candidate.role,
        skills = candidate.skills.join(", "),
        performance = candidate.performance_score,
        potential = candidate.potential_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, potential: u8, performance: u8, skills: &[&str]) -> Employee {
        Employee {
            id: format!("emp-1-{name}"),
            name: name.to_string(),
            role: "Software Engineer".to_string(),
            department: "Engineering".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            achievements: Vec::new(),
            performance_score: performance,
            potential_score: potential,
            engagement_score: 70,
            attrition_risk: 20,
            career_goals: "Become a team lead".to_string(),
            development_plan: Vec::new(),
            photo_url: String::new(),
            email: format!("{}@example.com", name.to_lowercase()),
            years_at_company: 3,
        }
    }

    fn role(title: &str, required: &[&str]) -> Role {
        Role {
            id: "role-1-0".to_string(),
            title: title.to_string(),
            description: String::new(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            department: "Engineering".to_string(),
            salary_range: "$100k - $150k".to_string(),
            experience_level: "Senior".to_string(),
        }
    }

    #[test]
    fn threshold_excludes_and_order_is_descending_by_potential() {
        let employees = vec![
            employee("Edward", 76, 80, &["Leadership"]),
            employee("Alice", 90, 80, &["Leadership"]),
            employee("Bob", 80, 80, &["Leadership"]),
            employee("Diana", 74, 95, &["Leadership"]),
        ];
        let target = role("Engineering Manager", &["Leadership"]);

        let ranked = rank_successors(&employees, &target);
        let potentials: Vec<u8> = ranked.iter().map(|e| e.potential_score).collect();
        assert_eq!(potentials, vec![90, 80, 76]);
    }

    #[test]
    fn performance_floor_and_current_role_are_enforced() {
        let mut incumbent = employee("Ian", 95, 95, &["Leadership"]);
        incumbent.role = "Engineering Manager".to_string();
        let low_performer = employee("Julia", 95, 70, &["Leadership"]);

        let target = role("Engineering Manager", &["Leadership"]);
        assert!(rank_successors(&[incumbent, low_performer], &target).is_empty());
    }

    #[test]
    fn skill_overlap_is_waived_when_role_lists_no_skills() {
        let employees = vec![employee("Fiona", 85, 80, &["Figma"])];

        let picky = role("Lead Data Scientist", &["Machine Learning"]);
        assert!(rank_successors(&employees, &picky).is_empty());

        let open = role("Lead Data Scientist", &[]);
        assert_eq!(rank_successors(&employees, &open).len(), 1);
    }

    #[test]
    fn result_is_capped_at_five() {
        let employees: Vec<Employee> = (0..8)
            .map(|i| employee(&format!("E{i}"), 80 + i, 90, &["Leadership"]))
            .collect();
        let target = role("Engineering Manager", &["Leadership"]);

        assert_eq!(rank_successors(&employees, &target).len(), MAX_CANDIDATES);
    }

    #[test]
    fn ties_preserve_input_order() {
        let employees = vec![
            employee("First", 88, 80, &["Leadership"]),
            employee("Second", 88, 80, &["Leadership"]),
        ];
        let target = role("Engineering Manager", &["Leadership"]);

        let ranked = rank_successors(&employees, &target);
        assert_eq!(ranked[0].name, "First");
        assert_eq!(ranked[1].name, "Second");
    }

    #[test]
    fn prompt_carries_role_and_candidate_details() {
        let candidate = employee("Alice", 90, 85, &["Leadership", "Agile"]);
        let target = role("Engineering Manager", &["Leadership"]);

        let prompt = succession_prompt(&target, &candidate, "Caramel");
        assert!(prompt.contains("Engineering Manager"));
        assert!(prompt.contains("Alice"));
        assert!(prompt.contains("Potential: 90/100"));
        assert!(prompt.contains("Caramel"));
    }
}
