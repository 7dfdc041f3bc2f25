//! Command-line interface.

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use jeomgong_ranker::PredictionInput;

#[derive(Debug, Parser)]
#[command(name = "jeomgong", version, about = "Predict a final admission rank from score-reveal data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict optimistic / realistic / pessimistic ranks
    Predict(PredictArgs),
    /// List, show or remove saved predictions
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Print the saved entry for INSTITUTION/DEPARTMENT
    #[arg(long, value_name = "INSTITUTION/DEPARTMENT", conflicts_with = "remove")]
    pub show: Option<String>,
    /// Delete the saved entry for INSTITUTION/DEPARTMENT
    #[arg(long, value_name = "INSTITUTION/DEPARTMENT")]
    pub remove: Option<String>,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Seats offered before additional passes
    #[arg(long)]
    pub quota: u32,
    /// Total number of applicants
    #[arg(long)]
    pub applicants: u32,
    /// Applicants who revealed their scores
    #[arg(long)]
    pub revealed: u32,
    /// Your rank among revealers
    #[arg(long)]
    pub rank: u32,
    /// Manual weight in [0.1, 1.0]; skips the automatic derivation
    #[arg(long)]
    pub weight: Option<f64>,
    /// Expected seats filled from the waiting list (default: half the quota)
    #[arg(long)]
    pub additional_passes: Option<u32>,
    /// Analysis time, "YYYY-MM-DD HH" (default: now)
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,
    /// Skip the AI adjustment
    #[arg(long)]
    pub no_ai: bool,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Save the result under INSTITUTION/DEPARTMENT
    #[arg(long, value_name = "INSTITUTION/DEPARTMENT")]
    pub save: Option<String>,
}

impl PredictArgs {
    pub fn to_input(&self) -> PredictionInput {
        PredictionInput {
            quota:              self.quota,
            real_applicants:    self.applicants,
            revealed_count:     self.revealed,
            my_rank:            self.rank,
            manual_weight:      self.weight,
            additional_passes:  self.additional_passes,
            analysis_timestamp: self.at,
        }
    }

    /// Split `--save` into (institution, department).
    pub fn save_target(&self) -> Option<(String, String)> {
        let raw = self.save.as_deref()?;
        let (inst, dept) = raw.split_once('/')?;
        let (inst, dept) = (inst.trim(), dept.trim());
        if inst.is_empty() || dept.is_empty() {
            return None;
        }
        Some((inst.to_string(), dept.to_string()))
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&format!("{s}:00"), "%Y-%m-%d %H:%M"))
        .map_err(|_| format!("expected \"YYYY-MM-DD HH\" or \"YYYY-MM-DD HH:MM\", got {s:?}"))
}
