//! Per-hour snorkel and beach scores
//!
//! Both scores start at 10.0 and subtract banded penalties. Inputs come
//! straight from an [`HourlySample`]; absent fields fall back to the
//! neutral values in [`defaults`].

use super::{ScoringMode, round_to};
use crate::models::{HourlySample, Location};

/// Neutral values substituted for missing provider fields
pub mod defaults {
    pub const WAVE_HEIGHT_M: f64 = 0.5;
    pub const WIND_SPEED_KMH: f64 = 15.0;
    pub const AIR_TEMPERATURE_C: f64 = 28.0;
    pub const SEA_TEMPERATURE_C: f64 = 24.0;
    pub const SWELL_PERIOD_S: f64 = 8.0;
    pub const CLOUD_COVER_PCT: f64 = 0.0;
    pub const UV_INDEX: f64 = 5.0;
}

const MAX_SCORE: f64 = 10.0;
const SWELL_SHELTER_STRENGTH: f64 = 0.7;

/// Snorkel score for one hour plus the wave height it was judged on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnorkelRating {
    pub score: f64,
    /// Wind-sea plus shelter-attenuated swell, metres
    pub effective_wave: f64,
}

/// Rate one hour of conditions for calm-water snorkelling
#[must_use]
pub fn snorkel_score(sample: &HourlySample, location: &Location, mode: ScoringMode) -> SnorkelRating {
    let effective_wave = effective_wave_height(sample, location, mode);

    let wind = sample.wind_speed.unwrap_or(defaults::WIND_SPEED_KMH);
    let effective_wind = mode.effective_wind(location, wind, sample.wind_direction);
    let offshore = mode.is_offshore(location, sample.wind_direction);

    let score = MAX_SCORE
        - wave_penalty(effective_wave)
        - snorkel_wind_penalty(effective_wind, offshore)
        - swell_period_penalty(sample.swell_period.unwrap_or(defaults::SWELL_PERIOD_S))
        - sea_temperature_penalty(sample.sea_temperature.unwrap_or(defaults::SEA_TEMPERATURE_C))
        - air_temperature_penalty(sample.air_temperature.unwrap_or(defaults::AIR_TEMPERATURE_C));

    SnorkelRating {
        score: finalize(score),
        effective_wave,
    }
}

/// Rate one hour of conditions for sunbathing.
///
/// Humidity is carried on the sample but does not affect the score.
#[must_use]
pub fn beach_score(sample: &HourlySample) -> f64 {
    let wind = sample.wind_speed.unwrap_or(defaults::WIND_SPEED_KMH);
    let gusts = sample.wind_gusts.unwrap_or(wind);
    let feels_like = sample
        .apparent_temperature
        .or(sample.air_temperature)
        .unwrap_or(defaults::AIR_TEMPERATURE_C);

    let score = MAX_SCORE
        - beach_wind_penalty(wind, gusts)
        - beach_temperature_penalty(feels_like)
        - uv_penalty(sample.uv_index.unwrap_or(defaults::UV_INDEX))
        - cloud_penalty(sample.cloud_cover.unwrap_or(defaults::CLOUD_COVER_PCT));

    finalize(score)
}

/// Wind-sea plus swell attenuated by the location's shelter.
///
/// A missing swell or wind-wave component counts as zero. When both are
/// missing the combined wave height stands in, unattenuated.
fn effective_wave_height(sample: &HourlySample, location: &Location, mode: ScoringMode) -> f64 {
    if sample.swell_height.is_none() && sample.wind_wave_height.is_none() {
        return sample.wave_height.unwrap_or(defaults::WAVE_HEIGHT_M);
    }

    let swell = sample.swell_height.unwrap_or(0.0);
    let weight = mode.swell_shelter(location, sample.swell_direction);
    let effective_swell = swell * (1.0 - location.shelter_factor * SWELL_SHELTER_STRENGTH * weight);

    sample.wind_wave_height.unwrap_or(0.0) + effective_swell
}

fn finalize(score: f64) -> f64 {
    round_to(score, 1).clamp(0.0, MAX_SCORE)
}

fn wave_penalty(effective_wave: f64) -> f64 {
    match effective_wave {
        w if w < 0.2 => 0.0,
        w if w < 0.35 => 0.5,
        w if w < 0.5 => 1.0,
        w if w < 0.7 => 2.0,
        w if w < 1.0 => 3.0,
        _ => 4.0,
    }
}

fn snorkel_wind_penalty(wind: f64, offshore: bool) -> f64 {
    let (offshore_penalty, onshore_penalty) = match wind {
        w if w < 8.0 => (0.0, 0.0),
        w if w < 12.0 => (0.3, 0.3),
        w if w < 18.0 => (0.8, 1.5),
        w if w < 25.0 => (1.5, 2.5),
        _ => (2.5, 3.0),
    };
    if offshore { offshore_penalty } else { onshore_penalty }
}

fn swell_period_penalty(period: f64) -> f64 {
    match period {
        p if p >= 10.0 => 0.0,
        p if p >= 8.0 => 0.3,
        p if p >= 6.0 => 0.6,
        _ => 1.0,
    }
}

fn sea_temperature_penalty(sea: f64) -> f64 {
    if (23.0..=27.0).contains(&sea) {
        0.0
    } else if (21.0..=29.0).contains(&sea) {
        0.5
    } else {
        1.0
    }
}

fn air_temperature_penalty(air: f64) -> f64 {
    if (25.0..=32.0).contains(&air) {
        0.0
    } else if (22.0..=35.0).contains(&air) {
        0.3
    } else if (20.0..=38.0).contains(&air) {
        0.6
    } else {
        1.0
    }
}

fn beach_wind_penalty(wind: f64, gusts: f64) -> f64 {
    let base = match wind {
        w if w < 10.0 => 0.0,
        w if w < 15.0 => 0.5,
        w if w < 20.0 => 1.5,
        w if w < 28.0 => 2.5,
        _ => 4.0,
    };
    // Gusty
    if gusts > wind * 1.8 { base + 0.5 } else { base }
}

fn beach_temperature_penalty(feels_like: f64) -> f64 {
    if (26.0..=32.0).contains(&feels_like) {
        0.0
    } else if (24.0..=34.0).contains(&feels_like) {
        0.5
    } else if (22.0..=36.0).contains(&feels_like) {
        1.5
    } else if (20.0..=38.0).contains(&feels_like) {
        2.5
    } else {
        3.0
    }
}

fn uv_penalty(uv: f64) -> f64 {
    match uv {
        u if u <= 6.0 => 0.0,
        u if u <= 8.0 => 0.3,
        u if u <= 10.0 => 0.7,
        _ => 1.5,
    }
}

fn cloud_penalty(cloud: f64) -> f64 {
    if (10.0..=40.0).contains(&cloud) {
        0.0
    } else if cloud <= 60.0 {
        0.5
    } else if cloud <= 80.0 {
        1.0
    } else {
        1.5
    }
}
