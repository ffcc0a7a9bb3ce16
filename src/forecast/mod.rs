//! Forecast assembly, pick explanations, narrative summary and regression comparison

pub mod assembler;
pub mod compare;
pub mod notes;
pub mod summary;

pub use assembler::{
    AssemblyInput, AssemblySettings, DEFAULT_FORECAST_DAYS, ForecastAssembler, VIABILITY_THRESHOLD,
    date_label,
};
pub use compare::{ComparisonReport, ScoreDelta, compare_documents};
pub use summary::{Summarizer, SummaryPrompt, fallback_summary};
