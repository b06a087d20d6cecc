use crate::domain::ForecastPeriod;
use crate::gemini::{GenerationError, GenerativeModel};
use crate::insights::normalizer::parse_json_payload;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// AI-produced workforce outlook: a narrative, optionally accompanied by a
/// refined demand/supply series. Period gaps are re-derived on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceForecast {
    pub narrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_forecast: Option<Vec<ForecastPeriod>>,
}

/// The seed series shown before any AI refinement.
pub fn baseline_forecast() -> Vec<ForecastPeriod> {
    vec![
        ForecastPeriod::new("Q1 2025", 120, 115),
        ForecastPeriod::new("Q2 2025", 125, 118),
        ForecastPeriod::new("Q3 2025", 130, 120),
        ForecastPeriod::new("Q4 2025", 135, 122),
    ]
}

/// Asks the model for a workforce-needs analysis. When the response cannot be
/// normalized into the expected shape the raw text is wrapped into the
/// narrative instead, so the caller always has something to render.
pub async fn forecast_workforce(
    model: &dyn GenerativeModel,
    organizational_growth: &str,
    market_trends: &str,
    current_forecast: Option<&[ForecastPeriod]>,
    organization: &str,
) -> Result<WorkforceForecast, GenerationError> {
    let prompt = forecast_prompt(
        organizational_growth,
        market_trends,
        current_forecast,
        organization,
    );
    let text = model.generate(&prompt, true).await?;

    match parse_json_payload::<WorkforceForecast>(&text) {
        Some(forecast) if !forecast.narrative.is_empty() => Ok(forecast),
        _ => {
            warn!("workforce forecast response was not in the expected format");
            Ok(WorkforceForecast {
                narrative: format!(
                    "AI analysis could not be parsed correctly. Raw AI response: {text}"
                ),
                updated_forecast: None,
            })
        }
    }
}

pub fn forecast_prompt(
    organizational_growth: &str,
    market_trends: &str,
    current_forecast: Option<&[ForecastPeriod]>,
    organization: &str,
) -> String {
    let current = current_forecast
        .and_then(|periods| serde_json::to_string(periods).ok())
        .map(|json| {
            format!("Current internal forecast data (demand/supply for upcoming periods): {json}\n")
        })
        .unwrap_or_default();

    format!(
        "Analyze workforce needs for {organization}.\n\
         Organizational Growth Plans: {organizational_growth}.\n\
         Key Market Trends: {market_trends}.\n\
         {current}\n\
         Provide:\n\
         1. A concise narrative (2-3 paragraphs) discussing key roles likely to be in demand, potential skill shortages, and strategic HR considerations.\n\
         2. Optional: If you can refine or project the forecast further, provide a JSON array for 'updatedForecast' with objects containing \"period\", \"demand\" (number), \"supply\" (number). Only provide this if you have high confidence in quantitative adjustments based on the inputs. Otherwise, omit 'updatedForecast'.\n\n\
         Output the entire response as a single JSON object with keys \"narrative\" (string) and optionally \"updatedForecast\" (array).",
    )
}
