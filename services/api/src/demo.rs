use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use talent_ai::error::AppError;
use talent_ai::insights::{baseline_forecast, match_programs, rank_successors};
use talent_ai::mock::MockDirectory;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for the generated directory. Defaults to 2025 so repeated runs
    /// print the same records.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of employees to generate
    #[arg(long, default_value_t = 50)]
    pub(crate) employees: usize,
    /// Number of key roles to generate
    #[arg(long, default_value_t = 10)]
    pub(crate) roles: usize,
    /// Number of training programs to generate
    #[arg(long, default_value_t = 8)]
    pub(crate) programs: usize,
}

/// Walks the offline parts of the pipeline over a generated directory. No
/// network calls: the narrative fed to the program matcher is canned.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let seed = args.seed.unwrap_or(2025);
    let mut directory = MockDirectory::seeded(seed);

    let employees = directory.employees(args.employees);
    let roles = directory.roles(args.roles);
    let programs = directory.programs(args.programs);

    println!("Talent insights demo (seed {seed})");
    println!(
        "Directory: {} employees | {} key roles | {} training programs",
        employees.len(),
        roles.len(),
        programs.len()
    );

    println!("\nSuccession pipeline");
    for role in &roles {
        let candidates = rank_successors(&employees, role);
        if candidates.is_empty() {
            println!("- {}: no ready candidates", role.title);
            continue;
        }

        println!("- {} ({} candidates)", role.title, candidates.len());
        for candidate in &candidates {
            println!(
                "    {} | {} | potential {} | performance {}",
                candidate.name, candidate.role, candidate.potential_score,
                candidate.performance_score
            );
        }
    }

    let narrative = "A focused leadership workshop paired with an ongoing mentorship \
                     program would close the strategic planning gap fastest.";
    let mut rng = StdRng::seed_from_u64(seed);
    let matches = match_programs(narrative, &programs, &mut rng);

    println!("\nDevelopment recommendation");
    println!("Narrative: {narrative}");
    if matches.is_weak() {
        println!("No catalog match; falling back to a random pick:");
    } else {
        println!("Matched programs:");
    }
    for program in matches.programs() {
        println!(
            "- {} | {} | {} | {}",
            program.name,
            program.duration,
            program.provider.as_deref().unwrap_or("internal"),
            program.skills_gained.join(", ")
        );
    }

    println!("\nBaseline workforce forecast");
    for period in baseline_forecast() {
        println!(
            "- {}: demand {} | supply {} | gap {}",
            period.period(),
            period.demand(),
            period.supply(),
            period.gap()
        );
    }

    Ok(())
}
