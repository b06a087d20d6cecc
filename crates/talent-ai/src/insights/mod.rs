//! Insight operations: prompt construction, response normalization, and the
//! heuristic filters that turn generated text into displayable records.

pub mod forecast;
pub mod normalizer;
pub mod programs;
pub mod skill_gaps;
pub mod succession;

pub use forecast::{baseline_forecast, forecast_workforce, WorkforceForecast};
pub use normalizer::{parse_json_lenient, parse_json_payload};
pub use programs::{match_programs, recommend_programs, ProgramMatches};
pub use skill_gaps::{filter_skill_gaps, skill_gap_analysis};
pub use succession::{rank_successors, simulate_succession};
