//! Jeomgong — score-reveal admission rank predictor.
//! Entry point for the `jeomgong` binary.

mod cli;
mod config;
mod history;
mod session;

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use jeomgong_llm::{build_backend, LlmAdjustmentProvider};
use jeomgong_ranker::{ExternalAdjustmentProvider, NoAdjustment, PredictionEngine, PredictionResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, HistoryArgs, PredictArgs};
use history::{HistoryEntry, HistoryStore};
use session::{PredictionSession, SessionState};

/// Pick the adjustment strategy. Any configuration problem degrades to
/// `NoAdjustment` instead of failing.
fn build_adjustment_provider(config: &config::Config) -> Arc<dyn ExternalAdjustmentProvider> {
    let spec = config.llm.backend_spec(std::env::var(config::API_KEY_ENV).ok());
    match build_backend(&spec) {
        Ok(Some(backend)) => Arc::new(LlmAdjustmentProvider::new(
            backend,
            spec.kind.as_str(),
            config.llm.timeout(),
        )),
        Ok(None) => Arc::new(NoAdjustment),
        Err(e) => {
            warn!(
                "LLM provider {} unavailable ({e}); set llm.api_key or {}. Continuing without AI adjustment.",
                spec.kind.as_str(),
                config::API_KEY_ENV
            );
            Arc::new(NoAdjustment)
        }
    }
}

fn print_result(title: &str, r: &PredictionResult) {
    println!("── {title} ──");
    println!(
        "  competition {:.2}:1 · revealed {:.1}% · cutoff rank {} ({} additional passes)",
        r.metrics.competition_rate,
        r.metrics.revealed_ratio * 100.0,
        r.metrics.max_rank,
        r.metrics.additional_passes,
    );
    let rows = [
        ("optimistic", r.ranks.optimistic, r.weights.optimistic, &r.probabilities.optimistic),
        ("realistic", r.ranks.realistic, r.weights.realistic, &r.probabilities.realistic),
        ("pessimistic", r.ranks.pessimistic, r.weights.pessimistic, &r.probabilities.pessimistic),
    ];
    for (name, rank, weight, p) in rows {
        let waitlist = if p.waiting_number > 0 {
            format!("waitlist #{}", p.waiting_number)
        } else {
            "within quota".to_string()
        };
        println!(
            "  {name:<11} rank {rank:>5}  w={weight:.3}  {:<22} ({}, {}%)  {waitlist}",
            p.label,
            p.tier.label_ko(),
            p.score,
        );
    }
    let b = &r.breakdown;
    println!(
        "  base weight {:.4}{} · decay {:.1}% after {}d {}h · ratio corr {:+.4} · AI {:+.3}",
        b.base_weight,
        if b.manual_weight { " (manual)" } else { "" },
        b.time_decay_percent,
        b.days_passed,
        b.hours_left,
        b.ratio_correction,
        b.ai_factor,
    );
    if !b.ai_reason.is_empty() {
        println!("  AI: {}", b.ai_reason);
    }
}

async fn run_predict(config: &config::Config, args: PredictArgs) -> anyhow::Result<()> {
    let provider: Arc<dyn ExternalAdjustmentProvider> = if args.no_ai {
        Arc::new(NoAdjustment)
    } else {
        build_adjustment_provider(config)
    };
    let session = PredictionSession::new(PredictionEngine::new(config.scoring.clone()), provider);
    info!(provider = session.provider_name(), policy = config.scoring.classification_policy.as_str(), "Session ready");

    let (institution, department) = args.save_target().unwrap_or_default();
    let state = SessionState { institution, department, input: args.to_input() };
    let now = chrono::Local::now().naive_local();

    let (ticket, instant) = match session.instant(&state, now) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if !args.json {
        print_result("Instant estimate", &instant);
    }

    let last = match session.refine(ticket, &state, now).await? {
        Some(refined) => {
            if !args.json && refined.ranks != instant.ranks {
                print_result("AI-adjusted estimate", &refined);
            } else if !args.json && !refined.breakdown.ai_reason.is_empty() {
                println!("  AI: {}", refined.breakdown.ai_reason);
            }
            refined
        }
        None => instant,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&last)?);
    }

    if args.save_target().is_some() {
        let mut store = HistoryStore::open(&config.history.path)?;
        let key = state.key();
        store.save(key.clone(), HistoryEntry {
            institution: state.institution,
            department: state.department,
            input: state.input,
            result: last,
            saved_at: Utc::now(),
        })?;
        info!(key = %key, path = %store.path().display(), "Prediction saved");
    } else if args.save.is_some() {
        warn!("--save expects INSTITUTION/DEPARTMENT; result not saved");
    }
    Ok(())
}

fn run_history(config: &config::Config, args: HistoryArgs) -> anyhow::Result<()> {
    let mut store = HistoryStore::open(&config.history.path)?;

    if let Some(key) = args.remove {
        match store.remove(&key)? {
            Some(_) => println!("Removed {key}"),
            None => println!("No saved prediction for {key}"),
        }
        return Ok(());
    }

    if let Some(key) = args.show {
        match store.get(&key) {
            Some(e) => {
                println!("{}/{} · saved {}", e.institution, e.department, e.saved_at.format("%Y-%m-%d %H:%M"));
                print_result("Saved estimate", &e.result);
            }
            None => println!("No saved prediction for {key}"),
        }
        return Ok(());
    }

    if store.is_empty() {
        println!("No saved predictions in {}", store.path().display());
        return Ok(());
    }
    println!("{} saved predictions in {}", store.len(), store.path().display());
    for (key, e) in store.list() {
        let p = &e.result.probabilities.realistic;
        println!(
            "{key:<30} rank {:>4}/{:<4} → realistic {:>5}  {} ({})  saved {}",
            e.input.my_rank,
            e.input.revealed_count,
            e.result.ranks.realistic,
            p.label,
            p.tier.label_ko(),
            e.saved_at.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jeomgong=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;
    info!("Jeomgong {} · LLM provider: {}", env!("CARGO_PKG_VERSION"), config.llm.provider.as_str());

    match cli.command {
        Command::Predict(args) => run_predict(&config, args).await,
        Command::History(args) => run_history(&config, args),
    }
}
