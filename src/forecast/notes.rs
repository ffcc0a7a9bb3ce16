//! Explanations attached to picks that miss the viability threshold

/// Waves at or above this height rule out calm snorkelling
pub const ROUGH_WAVE_M: f64 = 0.7;
/// Wind at or above this speed chops up the water
pub const STRONG_SNORKEL_WIND_KMH: f64 = 18.0;
/// Wind at or above this speed makes the beach uncomfortable
pub const STRONG_BEACH_WIND_KMH: f64 = 25.0;
pub const COMFORT_TEMP_MIN_C: f64 = 22.0;
pub const COMFORT_TEMP_MAX_C: f64 = 36.0;

fn detail(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!(" ({})", items.join(", "))
    }
}

/// Why the best snorkel candidate was not worth recommending
#[must_use]
pub fn snorkel_note(wave_avg: Option<f64>, wind: Option<f64>) -> String {
    if wave_avg.is_none() && wind.is_none() {
        return "Forecast data is limited, so snorkelling conditions are uncertain.".to_string();
    }

    let mut items = Vec::new();
    if let Some(wave) = wave_avg {
        items.push(format!("waves ~{wave:.1}m"));
    }
    if let Some(wind) = wind {
        items.push(format!("winds ~{wind:.0} km/h"));
    }
    let detail = detail(&items);

    let rough = wave_avg.is_some_and(|w| w >= ROUGH_WAVE_M);
    let windy = wind.is_some_and(|w| w >= STRONG_SNORKEL_WIND_KMH);

    match (rough, windy) {
        (true, true) => {
            format!("Waves and wind are strong, making the water choppy and visibility poor{detail}.")
        }
        (true, false) => format!("Waves are too large for calm snorkelling{detail}."),
        (false, true) => {
            format!("Winds are strong, so the water will be choppy and less clear{detail}.")
        }
        (false, false) => {
            format!("Conditions are below the calm-water threshold for snorkelling{detail}.")
        }
    }
}

/// Why the best beach candidate was not worth recommending
#[must_use]
pub fn beach_note(wind: Option<f64>, temp: Option<f64>) -> String {
    if wind.is_none() && temp.is_none() {
        return "Forecast data is limited, so beach comfort is uncertain.".to_string();
    }

    let mut items = Vec::new();
    if let Some(temp) = temp {
        items.push(format!("air ~{temp:.0}°C"));
    }
    if let Some(wind) = wind {
        items.push(format!("wind ~{wind:.0} km/h"));
    }
    let detail = detail(&items);

    if wind.is_some_and(|w| w >= STRONG_BEACH_WIND_KMH) {
        format!("Strong winds will make it uncomfortable on the beach{detail}.")
    } else if temp.is_some_and(|t| !(COMFORT_TEMP_MIN_C..=COMFORT_TEMP_MAX_C).contains(&t)) {
        format!("Temperatures are outside the comfortable range for sunbathing{detail}.")
    } else {
        format!("Conditions are below the comfortable range for sunbathing{detail}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snorkel_note_variants() {
        assert_eq!(
            snorkel_note(Some(0.8), Some(20.0)),
            "Waves and wind are strong, making the water choppy and visibility poor (waves ~0.8m, winds ~20 km/h)."
        );
        assert!(snorkel_note(Some(1.2), Some(5.0)).starts_with("Waves are too large"));
        assert!(snorkel_note(Some(0.3), Some(26.0)).starts_with("Winds are strong"));
        assert!(snorkel_note(Some(0.5), Some(12.0)).starts_with("Conditions are below"));
        assert!(snorkel_note(None, None).contains("limited"));
    }

    #[test]
    fn test_snorkel_note_with_partial_data() {
        assert_eq!(
            snorkel_note(Some(0.9), None),
            "Waves are too large for calm snorkelling (waves ~0.9m)."
        );
    }

    #[test]
    fn test_beach_note_variants() {
        assert_eq!(
            beach_note(Some(30.0), Some(19.0)),
            "Strong winds will make it uncomfortable on the beach (air ~19°C, wind ~30 km/h)."
        );
        assert!(beach_note(Some(10.0), Some(18.0)).starts_with("Temperatures are outside"));
        assert!(beach_note(Some(10.0), Some(38.0)).starts_with("Temperatures are outside"));
        assert!(beach_note(Some(18.0), Some(27.0)).starts_with("Conditions are below"));
        assert!(beach_note(None, None).contains("limited"));
    }
}
