//! Narrative summary: collaborator interface and deterministic fallback

use crate::models::{TopPick, TopPicks};

/// Turns the structured pick lines into a short narrative.
///
/// Implementations usually call a language model. Any error or blank
/// response makes the assembler fall back to [`fallback_summary`].
pub trait Summarizer: Send + Sync {
    fn summarize(&self, prompt: &SummaryPrompt) -> crate::Result<String>;
}

/// Facts handed to a [`Summarizer`]
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPrompt {
    pub snorkel_line: String,
    pub beach_line: String,
    pub water_temp_c: Option<f64>,
    pub failed_locations: usize,
}

impl SummaryPrompt {
    #[must_use]
    pub fn from_picks(picks: &TopPicks, water_temp_c: Option<f64>, failed_locations: usize) -> Self {
        Self {
            snorkel_line: pick_line("Best snorkel", "Snorkel outlook", &picks.best_snorkel),
            beach_line: pick_line("Best beach", "Beach outlook", &picks.best_sunbathing),
            water_temp_c,
            failed_locations,
        }
    }

    /// Full instruction text for a language model
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "You are a beach forecaster for Perth, Western Australia. \
             Write a factual 2-3 sentence summary of the coming week.\n\n\
             {}\n{}\nWater temp: {}\nErrors: {} beaches failed to fetch\n\n\
             Mention specific spots, days and conditions. Avoid superlatives. \
             Respond with only the summary text.",
            self.snorkel_line,
            self.beach_line,
            water_temp_text(self.water_temp_c),
            self.failed_locations
        )
    }
}

fn pick_line(viable_prefix: &str, outlook_prefix: &str, pick: &TopPick) -> String {
    match (&pick.spot, &pick.day, &pick.why) {
        (Some(spot), Some(day), Some(why)) if pick.viable => {
            format!("{viable_prefix}: {spot} on {day} (score {:.1}/10) - {why}", pick.score)
        }
        _ => format!("{outlook_prefix}: No viable picks - {}", pick.note),
    }
}

fn water_temp_text(water_temp_c: Option<f64>) -> String {
    water_temp_c.map_or_else(|| "unavailable".to_string(), |t| format!("{t:.1}°C"))
}

/// Summary used when no summarizer is configured or it fails
#[must_use]
pub fn fallback_summary(picks: &TopPicks, water_temp_c: Option<f64>) -> String {
    let snorkel = match &picks.best_snorkel.spot {
        Some(spot) if picks.best_snorkel.viable => {
            format!("Best snorkelling at {spot} ({:.1}/10). ", picks.best_snorkel.score)
        }
        _ => format!("No viable snorkelling picks - {} ", picks.best_snorkel.note),
    };
    let beach = match &picks.best_sunbathing.spot {
        Some(spot) if picks.best_sunbathing.viable => {
            format!("Best beach day at {spot} ({:.1}/10). ", picks.best_sunbathing.score)
        }
        _ => format!("No viable beach picks - {} ", picks.best_sunbathing.note),
    };
    let water = match water_temp_c {
        Some(t) => format!("Water temperature {t:.1}°C."),
        None => "Water temperature unavailable.".to_string(),
    };

    format!("{snorkel}{beach}{water}")
}
