//! Forecast assembly
//!
//! Runs the aggregator for every catalog location, lays the results out per
//! activity and date, picks the best of each activity and gates picks on
//! the viability threshold. Assembly is pure: the caller supplies "today",
//! the fetched forecasts and the generation timestamp.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::notes::{beach_note, snorkel_note};
use super::summary::{Summarizer, SummaryPrompt, fallback_summary};
use crate::catalog::LocationCatalog;
use crate::config::SnorkelAlertConfig;
use crate::models::{
    Activity, BeachDay, ForecastDocument, Location, LocationForecast, RatingLabel, RunMeta,
    SnorkelDay, TodaySummary, TopPick, TopPicks,
};
use crate::rating::aggregator::{DEFAULT_WINDOW_HOURS, DailyAggregate, aggregate_location};
use crate::rating::calculator::defaults;
use crate::rating::{ScoringMode, deg_to_compass};

/// Lowest score worth recommending
pub const VIABILITY_THRESHOLD: f64 = 4.5;
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

const DEFAULT_TODAY_TEMP_MAX_C: f64 = 30.0;
const DEFAULT_TODAY_UV_MAX: f64 = 5.0;
/// Above this UV max the day is described as sunny
const SUNNY_UV_MAX: f64 = 5.0;

/// Knobs for one assembly run
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblySettings {
    pub mode: ScoringMode,
    pub window_hours: u32,
    pub forecast_days: u32,
    /// Alternates considered for the hidden gem, in preference order
    pub hidden_gem_candidates: Vec<String>,
    pub version: String,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            mode: ScoringMode::default(),
            window_hours: DEFAULT_WINDOW_HOURS,
            forecast_days: DEFAULT_FORECAST_DAYS,
            hidden_gem_candidates: vec!["Hamersley Pool".to_string(), "Watermans Bay".to_string()],
            version: crate::VERSION.to_string(),
        }
    }
}

impl AssemblySettings {
    #[must_use]
    pub fn from_config(config: &SnorkelAlertConfig) -> Self {
        Self {
            mode: config.scoring.mode,
            window_hours: config.scoring.window_hours,
            forecast_days: config.provider.forecast_days,
            hidden_gem_candidates: config.picks.hidden_gem_candidates.clone(),
            version: crate::VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Everything one run feeds into the assembler
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyInput {
    /// First forecast date, local to the coastline being rated
    pub today: NaiveDate,
    pub forecasts: Vec<LocationForecast>,
    pub water_temp_c: Option<f64>,
    /// Locations the provider failed to fetch
    pub errors: Vec<String>,
    pub cache_hits: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// A catalog location together with its fetched data and daily ratings
struct RatedLocation<'a> {
    location: &'a Location,
    forecast: &'a LocationForecast,
    daily: BTreeMap<NaiveDate, DailyAggregate>,
}

/// A (location, date) competing for a top pick
struct Candidate<'a> {
    location: &'a Location,
    date: NaiveDate,
    aggregate: &'a DailyAggregate,
    score: f64,
}

pub struct ForecastAssembler<'a> {
    catalog: &'a LocationCatalog,
    settings: AssemblySettings,
    summarizer: Option<&'a dyn Summarizer>,
}

impl<'a> ForecastAssembler<'a> {
    #[must_use]
    pub fn new(catalog: &'a LocationCatalog, settings: AssemblySettings) -> Self {
        Self {
            catalog,
            settings,
            summarizer: None,
        }
    }

    #[must_use]
    pub fn with_summarizer(mut self, summarizer: &'a dyn Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &AssemblySettings {
        &self.settings
    }

    /// Build the forecast document for one run
    #[must_use]
    pub fn assemble(&self, input: &AssemblyInput) -> ForecastDocument {
        let dates: Vec<NaiveDate> = (0..self.settings.forecast_days)
            .map(|offset| input.today + Duration::days(i64::from(offset)))
            .collect();
        let date_labels = dates.iter().copied().map(date_label).collect();

        let rated = self.rate_locations(&input.forecasts);

        let snorkel = snorkel_section(&rated, &dates);
        let sunbathing = beach_section(&rated, &dates);

        let best_snorkel = best_candidate(&rated, Activity::Snorkel, &dates, |a| a.snorkel_avg);
        let best_beach = best_candidate(&rated, Activity::Beach, &dates, |a| a.beach_avg);

        let snorkel_pick = snorkel_pick(best_snorkel.as_ref());
        let hidden_gem = self.hidden_gem(&rated, best_snorkel.as_ref(), &snorkel_pick);
        let top_picks = TopPicks {
            best_snorkel: snorkel_pick,
            best_sunbathing: beach_pick(best_beach.as_ref()),
            hidden_gem,
        };

        let summary = self.narrate(&top_picks, input.water_temp_c, input.errors.len());

        info!(
            "Assembled {} forecast for {} location(s) over {} day(s), {} fetch error(s)",
            self.settings.mode,
            rated.len(),
            dates.len(),
            input.errors.len()
        );

        ForecastDocument {
            today: self.today_summary(input),
            dates,
            date_labels,
            water_temp_c: input.water_temp_c,
            snorkel,
            sunbathing,
            top_picks,
            summary,
            errors: input.errors.clone(),
            meta: RunMeta {
                version: self.settings.version.clone(),
                mode: self.settings.mode,
                generated_at: input.generated_at,
                cache_hits: input.cache_hits.clone(),
            },
        }
    }

    fn rate_locations<'s>(&'s self, forecasts: &'s [LocationForecast]) -> Vec<RatedLocation<'s>> {
        let by_name: HashMap<&str, &LocationForecast> =
            forecasts.iter().map(|f| (f.location.as_str(), f)).collect();

        for forecast in forecasts {
            if self.catalog.get(&forecast.location).is_none() {
                warn!("Ignoring forecast for unknown location: {}", forecast.location);
            }
        }

        self.catalog
            .locations()
            .iter()
            .filter_map(|location| {
                let Some(forecast) = by_name.get(location.name.as_str()).copied() else {
                    debug!("No forecast data for {}", location.name);
                    return None;
                };
                Some(RatedLocation {
                    location,
                    forecast,
                    daily: aggregate_location(
                        location,
                        &forecast.hourly,
                        self.settings.mode,
                        self.settings.window_hours,
                    ),
                })
            })
            .collect()
    }

    /// Best alternate spot on the best snorkel day
    fn hidden_gem(
        &self,
        rated: &[RatedLocation<'_>],
        best: Option<&Candidate<'_>>,
        best_pick: &TopPick,
    ) -> TopPick {
        let Some(best) = best.filter(|_| best_pick.viable) else {
            return TopPick::unviable(0.0, best_pick.note.clone());
        };

        let mut gem: Option<Candidate<'_>> = None;
        for name in &self.settings.hidden_gem_candidates {
            if *name == best.location.name {
                continue;
            }
            let Some(entry) = rated
                .iter()
                .find(|r| r.location.name == *name && r.location.supports(Activity::Snorkel))
            else {
                continue;
            };
            let Some(aggregate) = entry.daily.get(&best.date) else {
                continue;
            };
            if gem.as_ref().is_none_or(|g| aggregate.snorkel_avg > g.score) {
                gem = Some(Candidate {
                    location: entry.location,
                    date: best.date,
                    aggregate,
                    score: aggregate.snorkel_avg,
                });
            }
        }

        match gem {
            Some(gem) if gem.score >= VIABILITY_THRESHOLD => viable_pick(
                &gem,
                Some(gem.aggregate.best_time.clone()),
                snorkel_justification(gem.aggregate),
            ),
            Some(gem) => TopPick::unviable(
                gem.score,
                snorkel_note(Some(gem.aggregate.wave_avg), first_wind(gem.aggregate)),
            ),
            None => TopPick::unviable(
                0.0,
                format!(
                    "No alternate snorkel spots have forecast data for {}.",
                    date_label(best.date)
                ),
            ),
        }
    }

    fn narrate(&self, picks: &TopPicks, water_temp_c: Option<f64>, failed: usize) -> String {
        let Some(summarizer) = self.summarizer else {
            return fallback_summary(picks, water_temp_c);
        };

        let prompt = SummaryPrompt::from_picks(picks, water_temp_c, failed);
        match summarizer.summarize(&prompt) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Summarizer returned no text, using fallback summary");
                fallback_summary(picks, water_temp_c)
            }
            Err(e) => {
                warn!("Summarizer failed, using fallback summary: {}", e);
                fallback_summary(picks, water_temp_c)
            }
        }
    }

    /// Today's header from the first catalog location with a daily block for today
    fn today_summary(&self, input: &AssemblyInput) -> TodaySummary {
        let daily = self
            .catalog
            .locations()
            .iter()
            .filter_map(|l| input.forecasts.iter().find(|f| f.location == l.name))
            .find_map(|f| f.daily_for(input.today));

        let temp_max = daily
            .and_then(|d| d.temperature_max)
            .unwrap_or(DEFAULT_TODAY_TEMP_MAX_C);
        let wind_speed = daily
            .and_then(|d| d.wind_speed_max)
            .unwrap_or(defaults::WIND_SPEED_KMH);
        let wind_direction = daily.and_then(|d| d.wind_direction_dominant).unwrap_or(0.0);
        let uv_max = daily
            .and_then(|d| d.uv_index_max)
            .unwrap_or(DEFAULT_TODAY_UV_MAX);

        TodaySummary {
            date: input.today,
            date_label: date_label(input.today),
            temp_max,
            wind_speed,
            wind_direction: deg_to_compass(Some(wind_direction)).to_string(),
            description: if uv_max > SUNNY_UV_MAX {
                "Sunny".to_string()
            } else {
                "Partly cloudy".to_string()
            },
        }
    }
}

fn snorkel_section(
    rated: &[RatedLocation<'_>],
    dates: &[NaiveDate],
) -> BTreeMap<String, BTreeMap<NaiveDate, SnorkelDay>> {
    rated
        .iter()
        .filter(|r| r.location.supports(Activity::Snorkel))
        .filter_map(|r| {
            let days: BTreeMap<NaiveDate, SnorkelDay> = r
                .daily
                .iter()
                .filter(|(date, _)| dates.contains(date))
                .map(|(date, aggregate)| {
                    let day = SnorkelDay {
                        rating: RatingLabel::from_score(aggregate.snorkel_avg),
                        score: aggregate.snorkel_avg,
                        waves: aggregate.wave_avg,
                        wind: representative_wind(aggregate),
                        best_time: aggregate.best_time.clone(),
                    };
                    (*date, day)
                })
                .collect();
            (!days.is_empty()).then(|| (r.location.name.clone(), days))
        })
        .collect()
}

fn beach_section(
    rated: &[RatedLocation<'_>],
    dates: &[NaiveDate],
) -> BTreeMap<String, BTreeMap<NaiveDate, BeachDay>> {
    rated
        .iter()
        .filter(|r| r.location.supports(Activity::Beach))
        .filter_map(|r| {
            let days: BTreeMap<NaiveDate, BeachDay> = r
                .daily
                .iter()
                .filter(|(date, _)| dates.contains(date))
                .map(|(date, aggregate)| {
                    let first_temp = first_temp(aggregate);
                    let first_wind = first_wind(aggregate);
                    let daily = r.forecast.daily_for(*date);
                    let day = BeachDay {
                        rating: RatingLabel::from_score(aggregate.beach_avg),
                        score: aggregate.beach_avg,
                        temp: whole(first_temp.unwrap_or(defaults::AIR_TEMPERATURE_C)),
                        temp_max: daily.and_then(|d| d.temperature_max).or(first_temp).map(whole),
                        temp_min: daily.and_then(|d| d.temperature_min).or(first_temp).map(whole),
                        wind: whole(first_wind.unwrap_or(defaults::WIND_SPEED_KMH)),
                        wind_max: daily.and_then(|d| d.wind_speed_max).or(first_wind).map(whole),
                    };
                    (*date, day)
                })
                .collect();
            (!days.is_empty()).then(|| (r.location.name.clone(), days))
        })
        .collect()
}

/// Highest-scoring (location, date); ties keep the earlier location, then the earlier date
fn best_candidate<'r>(
    rated: &'r [RatedLocation<'r>],
    activity: Activity,
    dates: &[NaiveDate],
    score: impl Fn(&DailyAggregate) -> f64,
) -> Option<Candidate<'r>> {
    let mut best: Option<Candidate<'r>> = None;

    for entry in rated.iter().filter(|r| r.location.supports(activity)) {
        for (date, aggregate) in &entry.daily {
            if !dates.contains(date) {
                continue;
            }
            let value = score(aggregate);
            if best.as_ref().is_none_or(|b| value > b.score) {
                best = Some(Candidate {
                    location: entry.location,
                    date: *date,
                    aggregate,
                    score: value,
                });
            }
        }
    }

    best
}

fn snorkel_pick(best: Option<&Candidate<'_>>) -> TopPick {
    match best {
        Some(c) if c.score >= VIABILITY_THRESHOLD => viable_pick(
            c,
            Some(c.aggregate.best_time.clone()),
            snorkel_justification(c.aggregate),
        ),
        Some(c) => TopPick::unviable(
            c.score,
            snorkel_note(Some(c.aggregate.wave_avg), first_wind(c.aggregate)),
        ),
        None => TopPick::unviable(0.0, snorkel_note(None, None)),
    }
}

fn beach_pick(best: Option<&Candidate<'_>>) -> TopPick {
    match best {
        Some(c) if c.score >= VIABILITY_THRESHOLD => {
            viable_pick(c, None, beach_justification(c.aggregate))
        }
        Some(c) => TopPick::unviable(
            c.score,
            beach_note(first_wind(c.aggregate), first_temp(c.aggregate)),
        ),
        None => TopPick::unviable(0.0, beach_note(None, None)),
    }
}

fn viable_pick(candidate: &Candidate<'_>, time: Option<String>, why: String) -> TopPick {
    TopPick {
        viable: true,
        spot: Some(candidate.location.name.clone()),
        date: Some(candidate.date),
        day: Some(date_label(candidate.date)),
        time,
        score: candidate.score,
        why: Some(why),
        note: String::new(),
    }
}

fn snorkel_justification(aggregate: &DailyAggregate) -> String {
    format!(
        "{:.1}m waves, {:.0}km/h wind",
        aggregate.wave_avg,
        representative_wind(aggregate)
    )
}

fn beach_justification(aggregate: &DailyAggregate) -> String {
    format!(
        "{:.0}°C, {:.0}km/h wind",
        first_temp(aggregate).unwrap_or(defaults::AIR_TEMPERATURE_C),
        representative_wind(aggregate)
    )
}

fn first_wind(aggregate: &DailyAggregate) -> Option<f64> {
    aggregate.first_condition().and_then(|c| c.wind)
}

fn first_temp(aggregate: &DailyAggregate) -> Option<f64> {
    aggregate.first_condition().and_then(|c| c.temp)
}

fn representative_wind(aggregate: &DailyAggregate) -> f64 {
    first_wind(aggregate).unwrap_or(defaults::WIND_SPEED_KMH)
}

#[allow(clippy::cast_possible_truncation)]
fn whole(value: f64) -> i64 {
    value.round() as i64
}

/// Short display label, e.g. "Tue 3rd"
#[must_use]
pub fn date_label(date: NaiveDate) -> String {
    format!("{}{}", date.format("%a %-d"), ordinal_suffix(date.day()))
}

#[must_use]
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnorkelAlertError;
    use crate::models::{DailyWeather, HourlySample};
    use crate::rating::CompassPoint;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    fn create_test_catalog() -> LocationCatalog {
        let sheltered = [CompassPoint::W, CompassPoint::SW, CompassPoint::NW];
        LocationCatalog::new(vec![
            Location::new("Mettams Pool", -31.8195, 115.7517, &[Activity::Snorkel])
                .with_shelter(&sheltered, 0.8),
            Location::new("Hamersley Pool", -31.8150, 115.7510, &[Activity::Snorkel])
                .with_shelter(&sheltered, 0.8),
            Location::new("Burns Beach", -31.7281, 115.7261, &[Activity::Snorkel]),
            Location::new("Cottesloe", -31.9939, 115.7522, &[Activity::Beach]),
        ])
        .unwrap()
    }

    fn calm_sample(date: NaiveDate, hour: u32) -> HourlySample {
        HourlySample {
            swell_height: Some(0.3),
            swell_direction: Some(270.0),
            wind_wave_height: Some(0.1),
            wind_speed: Some(10.0),
            wind_direction: Some(90.0),
            swell_period: Some(9.0),
            sea_temperature: Some(24.0),
            air_temperature: Some(27.0),
            ..HourlySample::at(date.and_hms_opt(hour, 0, 0).unwrap())
        }
    }

    fn rough_sample(date: NaiveDate, hour: u32) -> HourlySample {
        HourlySample {
            swell_height: Some(1.6),
            swell_direction: Some(180.0),
            wind_wave_height: Some(0.5),
            wind_speed: Some(32.0),
            wind_gusts: Some(45.0),
            wind_direction: Some(200.0),
            swell_period: Some(6.0),
            air_temperature: Some(18.0),
            ..HourlySample::at(date.and_hms_opt(hour, 0, 0).unwrap())
        }
    }

    fn week_of(name: &str, sample: fn(NaiveDate, u32) -> HourlySample) -> LocationForecast {
        let hourly = (0..7)
            .flat_map(|d| (0..24).map(move |h| sample(today() + Duration::days(d), h)))
            .collect();
        LocationForecast::new(name, hourly)
    }

    fn create_test_input(forecasts: Vec<LocationForecast>) -> AssemblyInput {
        AssemblyInput {
            today: today(),
            forecasts,
            water_temp_c: Some(22.4),
            errors: Vec::new(),
            cache_hits: Vec::new(),
            generated_at: DateTime::from_timestamp(1_770_000_000, 0).unwrap(),
        }
    }

    fn calm_week_input() -> AssemblyInput {
        create_test_input(vec![
            week_of("Mettams Pool", calm_sample),
            week_of("Hamersley Pool", calm_sample),
            week_of("Burns Beach", rough_sample),
            week_of("Cottesloe", calm_sample),
        ])
    }

    struct FixedSummarizer(&'static str);

    impl Summarizer for FixedSummarizer {
        fn summarize(&self, _prompt: &SummaryPrompt) -> crate::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummarizer;

    impl Summarizer for FailingSummarizer {
        fn summarize(&self, _prompt: &SummaryPrompt) -> crate::Result<String> {
            Err(SnorkelAlertError::provider("summarizer offline"))
        }
    }

    #[rstest]
    #[case(1, "st")]
    #[case(2, "nd")]
    #[case(3, "rd")]
    #[case(4, "th")]
    #[case(11, "th")]
    #[case(12, "th")]
    #[case(13, "th")]
    #[case(21, "st")]
    #[case(22, "nd")]
    #[case(23, "rd")]
    #[case(31, "st")]
    fn test_ordinal_suffix(#[case] day: u32, #[case] expected: &str) {
        assert_eq!(ordinal_suffix(day), expected);
    }

    #[test]
    fn test_dates_and_labels_cover_the_week() {
        let catalog = create_test_catalog();
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&calm_week_input());

        assert_eq!(doc.dates.len(), 7);
        assert_eq!(doc.dates[0], today());
        assert_eq!(doc.date_labels[0], "Mon 2nd");
        assert_eq!(doc.date_labels[1], "Tue 3rd");
        assert_eq!(doc.date_labels[6], "Sun 8th");
        assert_eq!(doc.today.date_label, "Mon 2nd");
    }

    #[test]
    fn test_viable_picks_carry_spot_day_and_reason() {
        let catalog = create_test_catalog();
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&calm_week_input());

        let snorkel = &doc.top_picks.best_snorkel;
        assert!(snorkel.viable);
        // Hamersley ties Mettams every day; the earlier catalog entry and date win
        assert_eq!(snorkel.spot.as_deref(), Some("Mettams Pool"));
        assert_eq!(snorkel.date, Some(today()));
        assert_eq!(snorkel.day.as_deref(), Some("Mon 2nd"));
        assert_eq!(snorkel.time.as_deref(), Some("06:00-09:00"));
        assert_eq!(snorkel.score, 8.9);
        assert_eq!(snorkel.why.as_deref(), Some("0.2m waves, 10km/h wind"));
        assert!(snorkel.note.is_empty());

        let beach = &doc.top_picks.best_sunbathing;
        assert!(beach.viable);
        assert_eq!(beach.spot.as_deref(), Some("Cottesloe"));
        assert_eq!(beach.score, 9.0);
        assert_eq!(beach.why.as_deref(), Some("27°C, 10km/h wind"));
        assert!(beach.time.is_none());
    }

    #[test]
    fn test_hidden_gem_uses_alternate_on_best_day() {
        let catalog = create_test_catalog();
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&calm_week_input());

        let gem = &doc.top_picks.hidden_gem;
        assert!(gem.viable);
        assert_eq!(gem.spot.as_deref(), Some("Hamersley Pool"));
        assert_eq!(gem.date, Some(today()));
        assert_eq!(gem.why.as_deref(), Some("0.2m waves, 10km/h wind"));
    }

    #[test]
    fn test_hidden_gem_below_threshold_is_unviable() {
        let catalog = create_test_catalog();
        let input = create_test_input(vec![
            week_of("Mettams Pool", calm_sample),
            week_of("Hamersley Pool", rough_sample),
        ]);
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&input);

        assert!(doc.top_picks.best_snorkel.viable);
        let gem = &doc.top_picks.hidden_gem;
        assert!(!gem.viable);
        assert!(gem.spot.is_none());
        assert!(gem.note.starts_with("Waves and wind are strong"));
    }

    #[test]
    fn test_rough_week_has_no_viable_snorkel_pick() {
        let catalog = create_test_catalog();
        let input = create_test_input(vec![week_of("Burns Beach", rough_sample)]);
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&input);

        let pick = &doc.top_picks.best_snorkel;
        assert!(!pick.viable);
        assert!(pick.score < VIABILITY_THRESHOLD);
        assert!(pick.spot.is_none() && pick.day.is_none() && pick.time.is_none() && pick.why.is_none());
        assert_eq!(
            pick.note,
            "Waves and wind are strong, making the water choppy and visibility poor (waves ~2.1m, winds ~32 km/h)."
        );

        // Hidden gem inherits the explanation
        assert!(!doc.top_picks.hidden_gem.viable);
        assert_eq!(doc.top_picks.hidden_gem.note, pick.note);

        // No beach data at all
        assert!(!doc.top_picks.best_sunbathing.viable);
        assert!(doc.top_picks.best_sunbathing.note.contains("limited"));
        assert!(doc.summary.starts_with("No viable snorkelling picks - Waves and wind"));
    }

    #[test]
    fn test_missing_dates_and_locations_have_no_keys() {
        let catalog = create_test_catalog();
        let mut mettams = week_of("Mettams Pool", calm_sample);
        let skipped = today() + Duration::days(3);
        mettams.hourly.retain(|s| s.date() != skipped);
        // Only evening samples: nothing inside the evaluation window
        let hamersley = LocationForecast::new("Hamersley Pool", vec![calm_sample(today(), 19)]);

        let input = create_test_input(vec![mettams, hamersley]);
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&input);

        let days = &doc.snorkel["Mettams Pool"];
        assert_eq!(days.len(), 6);
        assert!(!days.contains_key(&skipped));
        assert!(!doc.snorkel.contains_key("Hamersley Pool"));
        assert!(!doc.snorkel.contains_key("Burns Beach"));
        assert!(doc.sunbathing.is_empty());
    }

    #[test]
    fn test_dates_outside_the_horizon_are_ignored() {
        let catalog = create_test_catalog();
        let mut forecast = week_of("Mettams Pool", calm_sample);
        let late = today() + Duration::days(9);
        forecast.hourly.push(HourlySample {
            swell_height: Some(0.0),
            wind_wave_height: Some(0.0),
            wind_speed: Some(0.0),
            swell_period: Some(12.0),
            ..calm_sample(late, 8)
        });
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .assemble(&create_test_input(vec![forecast]));

        assert!(!doc.snorkel["Mettams Pool"].contains_key(&late));
        assert_eq!(doc.top_picks.best_snorkel.date, Some(today()));
    }

    #[test]
    fn test_beach_day_uses_daily_block_with_hourly_fallback() {
        let catalog = create_test_catalog();
        let mut cottesloe = week_of("Cottesloe", calm_sample);
        cottesloe.daily.push(DailyWeather {
            temperature_max: Some(31.6),
            wind_speed_max: Some(22.2),
            ..DailyWeather::empty(today())
        });
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .assemble(&create_test_input(vec![cottesloe]));

        let day = &doc.sunbathing["Cottesloe"][&today()];
        assert_eq!(day.temp, 27);
        assert_eq!(day.temp_max, Some(32));
        assert_eq!(day.temp_min, Some(27));
        assert_eq!(day.wind, 10);
        assert_eq!(day.wind_max, Some(22));
        assert_eq!(day.rating, RatingLabel::Perfect);
    }

    #[test]
    fn test_today_header_from_daily_block() {
        let catalog = create_test_catalog();
        let mut mettams = week_of("Mettams Pool", calm_sample);
        mettams.daily.push(DailyWeather {
            temperature_max: Some(34.0),
            wind_speed_max: Some(24.0),
            wind_direction_dominant: Some(225.0),
            uv_index_max: Some(11.0),
            ..DailyWeather::empty(today())
        });
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .assemble(&create_test_input(vec![mettams]));

        assert_eq!(doc.today.temp_max, 34.0);
        assert_eq!(doc.today.wind_speed, 24.0);
        assert_eq!(doc.today.wind_direction, "SW");
        assert_eq!(doc.today.description, "Sunny");
    }

    #[test]
    fn test_today_header_defaults() {
        let catalog = create_test_catalog();
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .assemble(&create_test_input(Vec::new()));

        assert_eq!(doc.today.temp_max, 30.0);
        assert_eq!(doc.today.wind_speed, 15.0);
        assert_eq!(doc.today.wind_direction, "N");
        assert_eq!(doc.today.description, "Partly cloudy");
        assert!(doc.snorkel.is_empty());
        assert!(!doc.top_picks.best_snorkel.viable);
    }

    #[test]
    fn test_summarizer_text_used_when_present() {
        let catalog = create_test_catalog();
        let summarizer = FixedSummarizer("  Calm mornings all week.  ");
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .with_summarizer(&summarizer)
            .assemble(&calm_week_input());
        assert_eq!(doc.summary, "Calm mornings all week.");
    }

    #[test]
    fn test_summarizer_failure_or_blank_falls_back() {
        let catalog = create_test_catalog();
        let expected = "Best snorkelling at Mettams Pool (8.9/10). Best beach day at Cottesloe (9.0/10). Water temperature 22.4°C.";

        let failing = FailingSummarizer;
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .with_summarizer(&failing)
            .assemble(&calm_week_input());
        assert_eq!(doc.summary, expected);

        let blank = FixedSummarizer("   ");
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default())
            .with_summarizer(&blank)
            .assemble(&calm_week_input());
        assert_eq!(doc.summary, expected);
    }

    #[test]
    fn test_unknown_forecast_locations_are_ignored() {
        let catalog = create_test_catalog();
        let input = create_test_input(vec![week_of("Atlantis", calm_sample)]);
        let doc = ForecastAssembler::new(&catalog, AssemblySettings::default()).assemble(&input);
        assert!(doc.snorkel.is_empty());
        assert!(doc.sunbathing.is_empty());
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let catalog = create_test_catalog();
        let assembler = ForecastAssembler::new(&catalog, AssemblySettings::default());
        let input = calm_week_input();

        let first = serde_json::to_string(&assembler.assemble(&input)).unwrap();
        let second = serde_json::to_string(&assembler.assemble(&input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_meta_records_mode_and_errors() {
        let catalog = create_test_catalog();
        let mut input = calm_week_input();
        input.errors = vec!["Cottesloe".to_string()];
        input.cache_hits = vec!["Mettams Pool".to_string()];
        let settings = AssemblySettings::default().with_mode(ScoringMode::Legacy);
        let doc = ForecastAssembler::new(&catalog, settings).assemble(&input);

        assert_eq!(doc.meta.mode, ScoringMode::Legacy);
        assert_eq!(doc.meta.cache_hits, vec!["Mettams Pool".to_string()]);
        assert_eq!(doc.errors, vec!["Cottesloe".to_string()]);
        assert_eq!(doc.meta.version, crate::VERSION);
    }
}
