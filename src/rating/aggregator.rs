//! Daily aggregation of hourly scores per location

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calculator::{beach_score, snorkel_score};
use super::{ScoringMode, round_to};
use crate::models::{HourlySample, Location};

/// Local hours that count towards a day's rating
pub const EVALUATION_HOURS: RangeInclusive<u32> = 6..=14;
/// Default width of the best snorkelling window
pub const DEFAULT_WINDOW_HOURS: u32 = 3;

/// Scores and raw inputs for one evaluated hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyCondition {
    pub hour: u32,
    pub snorkel: f64,
    pub beach: f64,
    /// Effective wave height, rounded to centimetres
    pub wave: f64,
    /// Provider wind speed, before shelter attenuation
    pub wind: Option<f64>,
    /// Provider air temperature
    pub temp: Option<f64>,
}

/// One location's rating for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Evaluated hours in ascending order; never empty
    pub conditions: Vec<HourlyCondition>,
    pub snorkel_avg: f64,
    pub beach_avg: f64,
    pub wave_avg: f64,
    /// "HH:00-HH:00"
    pub best_time: String,
}

impl DailyAggregate {
    fn from_conditions(
        date: NaiveDate,
        conditions: Vec<HourlyCondition>,
        mode: ScoringMode,
        window_hours: u32,
    ) -> Self {
        let snorkel_avg = daily_mean(mode, &conditions, |c| c.snorkel, 1);
        let beach_avg = daily_mean(mode, &conditions, |c| c.beach, 1);
        let wave_avg = daily_mean(mode, &conditions, |c| c.wave, 2);

        let best_time = match mode {
            ScoringMode::Legacy => legacy_best_time(&conditions, snorkel_avg),
            ScoringMode::Current => best_time_window(
                &conditions,
                window_hours,
                *EVALUATION_HOURS.start(),
                *EVALUATION_HOURS.end(),
            ),
        };

        Self {
            date,
            conditions,
            snorkel_avg,
            beach_avg,
            wave_avg,
            best_time,
        }
    }

    /// First evaluated hour; the assembler reports its wind and temperature
    #[must_use]
    pub fn first_condition(&self) -> Option<&HourlyCondition> {
        self.conditions.first()
    }
}

/// Rate every in-range hour for `location` and group the results by date.
///
/// Dates with no samples inside [`EVALUATION_HOURS`] are absent from the result.
#[must_use]
pub fn aggregate_location(
    location: &Location,
    samples: &[HourlySample],
    mode: ScoringMode,
    window_hours: u32,
) -> BTreeMap<NaiveDate, DailyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, Vec<HourlyCondition>> = BTreeMap::new();

    for sample in samples.iter().filter(|s| EVALUATION_HOURS.contains(&s.hour())) {
        let snorkel = snorkel_score(sample, location, mode);
        by_date.entry(sample.date()).or_default().push(HourlyCondition {
            hour: sample.hour(),
            snorkel: snorkel.score,
            beach: beach_score(sample),
            wave: round_to(snorkel.effective_wave, 2),
            wind: sample.wind_speed,
            temp: sample.air_temperature,
        });
    }

    let aggregates: BTreeMap<NaiveDate, DailyAggregate> = by_date
        .into_iter()
        .map(|(date, mut conditions)| {
            conditions.sort_by_key(|c| c.hour);
            let aggregate = DailyAggregate::from_conditions(date, conditions, mode, window_hours);
            (date, aggregate)
        })
        .collect();

    debug!(
        "Aggregated {} for {} day(s) from {} sample(s)",
        location.name,
        aggregates.len(),
        samples.len()
    );

    aggregates
}

/// Weight favouring mornings, before the afternoon sea breeze
#[must_use]
pub fn morning_weight(hour: u32) -> f64 {
    match hour {
        0..=7 => 1.1,
        8..=9 => 1.25,
        10..=12 => 1.4,
        13 => 0.9,
        _ => 0.7,
    }
}

/// Morning-weighted mean of `value` over `conditions`, rounded to `decimals`
#[must_use]
pub fn weighted_average(
    conditions: &[HourlyCondition],
    value: impl Fn(&HourlyCondition) -> f64,
    decimals: i32,
) -> Option<f64> {
    let (total, weight_total) = conditions.iter().fold((0.0, 0.0), |(total, weights), c| {
        let weight = morning_weight(c.hour);
        (total + value(c) * weight, weights + weight)
    });

    (weight_total > 0.0).then(|| round_to(total / weight_total, decimals))
}

fn daily_mean(
    mode: ScoringMode,
    conditions: &[HourlyCondition],
    value: impl Fn(&HourlyCondition) -> f64,
    decimals: i32,
) -> f64 {
    match mode {
        ScoringMode::Legacy => {
            if conditions.is_empty() {
                return 0.0;
            }
            let sum: f64 = conditions.iter().map(value).sum();
            round_to(sum / conditions.len() as f64, decimals)
        }
        ScoringMode::Current => weighted_average(conditions, value, decimals).unwrap_or(0.0),
    }
}

/// Best run of `width` consecutive hours by mean snorkel score.
///
/// Only windows of exactly `width` contiguous hours compete and the earliest
/// wins a tie. Without any such window the result starts at the first
/// available hour (or `default_start` when there are none). The end is
/// clipped to `max_end` and always lies after the start.
#[must_use]
pub fn best_time_window(
    conditions: &[HourlyCondition],
    width: u32,
    default_start: u32,
    max_end: u32,
) -> String {
    let width = width.max(1);
    let mut ordered: Vec<&HourlyCondition> = conditions.iter().collect();
    ordered.sort_by_key(|c| c.hour);

    let mut best: Option<(u32, f64)> = None;
    for slice in ordered.windows(width as usize) {
        let start = slice[0].hour;
        let end = slice[slice.len() - 1].hour;
        if end - start != width - 1 {
            continue;
        }

        let mean = slice.iter().map(|c| c.snorkel).sum::<f64>() / f64::from(width);
        if best.is_none_or(|(_, best_mean)| mean > best_mean) {
            best = Some((start, mean));
        }
    }

    let start = best
        .map(|(start, _)| start)
        .or_else(|| ordered.first().map(|c| c.hour))
        .unwrap_or(default_start);

    format_window(start, width, max_end)
}

fn format_window(start: u32, width: u32, max_end: u32) -> String {
    let start = start.min(max_end.saturating_sub(1));
    let end = start.saturating_add(width).min(max_end);
    format!("{start:02}:00-{end:02}:00")
}

/// Historical heuristic: from the first hour, extend until a score falls more
/// than a point below the day's average.
fn legacy_best_time(conditions: &[HourlyCondition], average: f64) -> String {
    let start = conditions
        .first()
        .map_or(*EVALUATION_HOURS.start(), |c| c.hour);
    let mut end = start + DEFAULT_WINDOW_HOURS;

    for condition in conditions {
        if condition.snorkel < average - 1.0 {
            end = condition.hour;
            break;
        }
        end = condition.hour + 1;
    }

    format!("{start:02}:00-{:02}:00", end.min(*EVALUATION_HOURS.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;
    use crate::rating::CompassPoint;
    use chrono::NaiveDateTime;
    use rstest::rstest;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn create_test_location() -> Location {
        Location::new("Mettams Pool", -31.8195, 115.7517, &[Activity::Snorkel])
            .with_shelter(&[CompassPoint::W, CompassPoint::SW, CompassPoint::NW], 0.8)
    }

    fn calm_sample(day: u32, hour: u32) -> HourlySample {
        HourlySample {
            swell_height: Some(0.3),
            swell_direction: Some(270.0),
            wind_wave_height: Some(0.1),
            wind_speed: Some(10.0),
            wind_direction: Some(90.0),
            swell_period: Some(9.0),
            sea_temperature: Some(24.0),
            air_temperature: Some(27.0),
            ..HourlySample::at(ts(day, hour))
        }
    }

    fn condition(hour: u32, snorkel: f64) -> HourlyCondition {
        HourlyCondition {
            hour,
            snorkel,
            beach: 8.0,
            wave: 0.3,
            wind: Some(10.0),
            temp: Some(27.0),
        }
    }

    fn parse_window(window: &str) -> (u32, u32) {
        let (start, end) = window.split_once('-').unwrap();
        (start[..2].parse().unwrap(), end[..2].parse().unwrap())
    }

    #[rstest]
    #[case(6, 1.1)]
    #[case(7, 1.1)]
    #[case(8, 1.25)]
    #[case(9, 1.25)]
    #[case(12, 1.4)]
    #[case(13, 0.9)]
    #[case(14, 0.7)]
    fn test_morning_weight(#[case] hour: u32, #[case] expected: f64) {
        assert_eq!(morning_weight(hour), expected);
    }

    #[test]
    fn test_weighted_average_favours_mornings() {
        let conditions = vec![condition(8, 9.0), condition(14, 5.0)];
        // (9*1.25 + 5*0.7) / 1.95 = 7.56
        assert_eq!(weighted_average(&conditions, |c| c.snorkel, 1), Some(7.6));
        assert_eq!(weighted_average(&[], |c| c.snorkel, 1), None);
    }

    #[test]
    fn test_samples_outside_evaluation_hours_are_ignored() {
        let samples: Vec<HourlySample> = (0..24).map(|h| calm_sample(2, h)).collect();
        let daily = aggregate_location(&create_test_location(), &samples, ScoringMode::Current, 3);

        let day = &daily[&NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()];
        let hours: Vec<u32> = day.conditions.iter().map(|c| c.hour).collect();
        assert_eq!(hours, (6..=14).collect::<Vec<_>>());
        assert_eq!(day.snorkel_avg, 8.9);
        assert_eq!(day.wave_avg, 0.23);
        assert_eq!(day.best_time, "06:00-09:00");
    }

    #[test]
    fn test_dates_without_samples_are_omitted() {
        let samples = vec![calm_sample(2, 8), calm_sample(4, 9), calm_sample(3, 20)];
        let daily = aggregate_location(&create_test_location(), &samples, ScoringMode::Current, 3);

        let dates: Vec<NaiveDate> = daily.keys().copied().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 4).unwrap()
            ]
        );
        assert!(daily.values().all(|d| !d.conditions.is_empty()));
    }

    #[test]
    fn test_best_window_picks_highest_contiguous_mean() {
        let conditions: Vec<HourlyCondition> = [6.0, 7.0, 8.5, 9.0, 8.8, 7.0, 6.0, 5.0, 4.0]
            .iter()
            .enumerate()
            .map(|(i, &score)| condition(6 + i as u32, score))
            .collect();
        assert_eq!(best_time_window(&conditions, 3, 6, 14), "08:00-11:00");
    }

    #[test]
    fn test_best_window_earliest_wins_ties() {
        let conditions: Vec<HourlyCondition> = (6..=14).map(|h| condition(h, 7.0)).collect();
        assert_eq!(best_time_window(&conditions, 3, 6, 14), "06:00-09:00");
    }

    #[test]
    fn test_best_window_skips_gaps() {
        // 10-12 is the only contiguous run even though 6 and 8 score higher
        let conditions = vec![
            condition(6, 10.0),
            condition(8, 10.0),
            condition(10, 5.0),
            condition(11, 5.0),
            condition(12, 5.0),
        ];
        assert_eq!(best_time_window(&conditions, 3, 6, 14), "10:00-13:00");
    }

    #[test]
    fn test_best_window_falls_back_to_first_hour() {
        assert_eq!(best_time_window(&[condition(12, 9.0)], 3, 6, 14), "12:00-14:00");
    }

    #[test]
    fn test_best_window_oversized_width_is_clipped() {
        let conditions: Vec<HourlyCondition> = (6..=14).map(|h| condition(h, 8.0)).collect();
        assert_eq!(best_time_window(&conditions, u32::MAX, 6, 14), "06:00-14:00");
        assert_eq!(best_time_window(&[condition(13, 9.0)], u32::MAX, 6, 14), "13:00-14:00");
        assert_eq!(best_time_window(&[], 3, 6, 14), "06:00-09:00");
        assert_eq!(best_time_window(&[condition(14, 9.0)], 3, 6, 14), "13:00-14:00");
    }

    #[test]
    fn test_best_window_is_well_formed_for_any_hour_subset() {
        for mask in 0u32..(1 << 9) {
            let conditions: Vec<HourlyCondition> = (0..9)
                .filter(|&bit| mask & (1 << bit) != 0)
                .map(|bit| condition(6 + bit, f64::from((bit * 7) % 10)))
                .collect();
            let window = best_time_window(&conditions, 3, 6, 14);
            let (start, end) = parse_window(&window);
            assert!(end > start, "{window}");
            assert!(end <= 14, "{window}");
        }
    }

    #[test]
    fn test_legacy_mode_uses_plain_mean_and_forward_walk() {
        let location = create_test_location();
        let mut samples: Vec<HourlySample> = (6..=14).map(|h| calm_sample(2, h)).collect();
        // Blow out the afternoon: 10 -> 30 km/h onshore from 11:00
        for sample in samples.iter_mut().filter(|s| s.hour() >= 11) {
            sample.wind_speed = Some(30.0);
            sample.wind_direction = Some(250.0);
        }

        let daily = aggregate_location(&location, &samples, ScoringMode::Legacy, 3);
        let day = &daily[&NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()];

        // Five hours at 8.9 and four at 6.2: plain mean 7.7
        assert_eq!(day.snorkel_avg, 7.7);
        // 11:00 is the first hour more than a point below the average
        assert_eq!(day.best_time, "06:00-11:00");
    }

    #[test]
    fn test_hourly_conditions_keep_raw_wind_and_temperature() {
        let sample = HourlySample {
            wind_speed: None,
            ..calm_sample(2, 7)
        };
        let daily = aggregate_location(&create_test_location(), &[sample], ScoringMode::Current, 3);
        let first = daily.values().next().and_then(DailyAggregate::first_condition).unwrap();
        assert_eq!(first.hour, 7);
        assert_eq!(first.wind, None);
        assert_eq!(first.temp, Some(27.0));
    }
}
