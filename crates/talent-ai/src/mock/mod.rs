//! Synthetic directory records for demos and tests.
//!
//! The generator owns its random source and a monotonic batch counter, so a
//! seeded instance reproduces exact output and identities never depend on
//! wall-clock time. Ids are unique within a generator (`emp-<batch>-<index>`),
//! not a global key scheme.

use crate::domain::{Employee, Role, TrainingProgram};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Edward", "Fiona", "George", "Hannah", "Ian", "Julia",
    "Kevin", "Laura",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Williams", "Brown", "Davis", "Miller", "Wilson", "Moore", "Taylor",
    "Anderson", "Thomas",
];
const ROLES: &[&str] = &[
    "Software Engineer",
    "Product Manager",
    "UX Designer",
    "Data Scientist",
    "Marketing Specialist",
    "HR Manager",
    "Sales Representative",
    "DevOps Engineer",
    "QA Tester",
    "Project Manager",
];
const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Product",
    "Design",
    "Data Science",
    "Marketing",
    "Human Resources",
    "Sales",
    "Operations",
];
const SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "React",
    "Node.js",
    "SQL",
    "Communication",
    "Leadership",
    "Project Management",
    "Agile",
    "AWS",
    "Machine Learning",
    "Strategic Planning",
    "Team Building",
    "Public Speaking",
    "Data Analysis",
    "Figma",
    "Canva",
    "Google Ads",
];
const ACHIEVEMENTS: &[&str] = &[
    "Launched new product feature",
    "Exceeded sales targets by 20%",
    "Improved team efficiency by 15%",
    "Mentored junior team member",
    "Led successful project completion",
    "Received positive client feedback",
    "Implemented new HR policy",
    "Reduced operational costs",
];
const CAREER_GOALS: &[&str] = &[
    "Become a team lead",
    "Transition to a management role",
    "Specialize in AI/ML",
    "Improve public speaking skills",
    "Gain cross-functional experience",
    "Lead a major product launch",
    "Develop expertise in cloud architecture",
];
const DEVELOPMENT_PLAN_ITEMS: &[&str] = &[
    "Complete Advanced React course",
    "Attend leadership workshop",
    "Shadow senior manager",
    "Obtain AWS certification",
    "Lead a small project",
    "Improve presentation skills through practice",
];
const ROLE_TITLES: &[&str] = &[
    "Senior Software Engineer",
    "Engineering Manager",
    "Director of Product",
    "Lead Data Scientist",
    "Marketing Director",
    "VP of Sales",
    "Chief Technology Officer",
    "HR Business Partner",
    "Principal UX Designer",
];
const EXPERIENCE_LEVELS: &[&str] = &[
    "Associate",
    "Mid-Level",
    "Senior",
    "Lead",
    "Principal",
    "Manager",
    "Director",
    "VP",
];
const PROGRAM_NAMES: &[&str] = &[
    "Future Leaders Program",
    "Tech Innovators Bootcamp",
    "Strategic Management Workshop",
    "Advanced Communication Skills",
    "Data-Driven Decision Making",
    "Agile Project Leadership",
    "Inclusive Leadership Training",
    "Executive Presence Coaching",
];
const PROGRAM_DURATIONS: &[&str] = &[
    "3 Weeks",
    "6 Months",
    "40 Hours",
    "3 Days Intensive",
    "Ongoing Mentorship",
];
const PROGRAM_PROVIDERS: &[&str] = &[
    "Internal L&D",
    "Coursera",
    "LinkedIn Learning",
    "ExecEd Inc.",
    "University Extension",
];

/// Factory for synthetic employees, roles, and training programs.
pub struct MockDirectory<R: Rng = StdRng> {
    rng: R,
    batch: u64,
}

impl MockDirectory<StdRng> {
    /// Deterministic generator; the same seed reproduces identical records.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator backed by OS entropy, for runtime use.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> MockDirectory<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, batch: 0 }
    }

    /// Produces exactly `count` employees with scores inside their
    /// documented bounds.
    pub fn employees(&mut self, count: usize) -> Vec<Employee> {
        let batch = self.next_batch();
        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            records.push(self.employee(batch, index));
        }
        records
    }

    pub fn roles(&mut self, count: usize) -> Vec<Role> {
        let batch = self.next_batch();
        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            records.push(self.role(batch, index));
        }
        records
    }

    pub fn programs(&mut self, count: usize) -> Vec<TrainingProgram> {
        let batch = self.next_batch();
        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            records.push(self.program(batch, index));
        }
        records
    }

    fn employee(&mut self, batch: u64, index: usize) -> Employee {
        let id = format!("emp-{batch}-{index}");
        let first = *self.pick(FIRST_NAMES);
        let last = *self.pick(LAST_NAMES);

        Employee {
            name: format!("{first} {last}"),
            role: (*self.pick(ROLES)).to_string(),
            department: (*self.pick(DEPARTMENTS)).to_string(),
            skills: self.subset(SKILLS, 5),
            achievements: self.subset(ACHIEVEMENTS, 3),
            performance_score: self.rng.gen_range(60..=98),
            potential_score: self.rng.gen_range(50..=99),
            engagement_score: self.rng.gen_range(40..=95),
            attrition_risk: self.rng.gen_range(5..=75),
            career_goals: (*self.pick(CAREER_GOALS)).to_string(),
            development_plan: self.subset(DEVELOPMENT_PLAN_ITEMS, 2),
            photo_url: format!("https://picsum.photos/seed/{id}/200/200"),
            email: format!(
                "{}.{}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            years_at_company: self.rng.gen_range(1..=10),
            id,
        }
    }

    fn role(&mut self, batch: u64, index: usize) -> Role {
        let lead_skill = *self.pick(SKILLS);
        let support_skill = *self.pick(SKILLS);
        let focus_department = *self.pick(DEPARTMENTS);

        Role {
            id: format!("role-{batch}-{index}"),
            title: (*self.pick(ROLE_TITLES)).to_string(),
            description: format!(
                "Responsible for leading {focus_department} initiatives and driving innovation. \
                 This role requires strong {lead_skill} and {support_skill} skills."
            ),
            required_skills: self.subset(SKILLS, 4),
            department: (*self.pick(DEPARTMENTS)).to_string(),
            salary_range: format!(
                "${}k - ${}k",
                self.rng.gen_range(70..=120),
                self.rng.gen_range(130..=200)
            ),
            experience_level: (*self.pick(EXPERIENCE_LEVELS)).to_string(),
        }
    }

    fn program(&mut self, batch: u64, index: usize) -> TrainingProgram {
        let focus_skill = *self.pick(SKILLS);
        let bonus_skill = *self.pick(SKILLS);
        let audience_role = *self.pick(ROLES);

        TrainingProgram {
            id: format!("prog-{batch}-{index}"),
            name: (*self.pick(PROGRAM_NAMES)).to_string(),
            description: format!(
                "A comprehensive program designed to enhance {focus_skill} and {bonus_skill}. \
                 Ideal for {audience_role} looking to advance their careers. \
                 This program focuses on practical application and real-world scenarios."
            ),
            target_audience: vec![
                (*self.pick(ROLES)).to_string(),
                format!("Aspiring {}", self.pick(EXPERIENCE_LEVELS)),
            ],
            duration: (*self.pick(PROGRAM_DURATIONS)).to_string(),
            skills_gained: self.subset(SKILLS, 4),
            provider: Some((*self.pick(PROGRAM_PROVIDERS)).to_string()),
        }
    }

    fn next_batch(&mut self) -> u64 {
        self.batch += 1;
        self.batch
    }

    fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[self.rng.gen_range(0..options.len())]
    }

    /// Between 1 and `max` distinct entries in shuffled order.
    fn subset(&mut self, options: &[&str], max: usize) -> Vec<String> {
        let mut pool: Vec<&str> = options.to_vec();
        pool.shuffle(&mut self.rng);
        let take = self.rng.gen_range(1..=max);
        pool.into_iter()
            .take(take)
            .map(str::to_string)
            .collect()
    }
}
