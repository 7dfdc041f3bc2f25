//! Prompt construction and reply parsing for the weight adjustment.

use chrono::NaiveDateTime;
use jeomgong_ranker::adjustment::MAX_ADJUSTMENT;
use jeomgong_ranker::timing::TimeReference;
use jeomgong_ranker::PredictionInput;
use serde::Deserialize;

use crate::backend::{LlmError, LlmRequest, Message};

const SYSTEM_PROMPT: &str = "You are an analyst of Korean university regular-admission \
score reveals (jeomgong). Applicants who reveal their scores early tend to be stronger \
than those who never reveal. Given a snapshot of one department, estimate how much the \
share of hidden applicants who outrank the user should be nudged. Reply with a single \
JSON object and nothing else.";

/// Expected reply shape.
#[derive(Debug, Deserialize)]
struct AdjustmentReply {
    factor: f64,
    #[serde(default)]
    reason: String,
}

/// Build the completion request describing `input`.
pub fn build_request(input: &PredictionInput, now: NaiveDateTime) -> LlmRequest {
    let analyzed_at = input.analysis_timestamp.unwrap_or(now);
    let time = TimeReference::at(analyzed_at);
    let competition_rate = input.real_applicants as f64 / input.quota.max(1) as f64;
    let revealed_pct = input.revealed_count as f64 / input.real_applicants.max(1) as f64 * 100.0;

    let user = format!(
        "Quota: {quota}\n\
         Total applicants: {applicants} (competition rate {rate:.2}:1)\n\
         Revealed applicants: {revealed} ({revealed_pct:.1}%)\n\
         User rank among revealers: {rank}\n\
         Reveal period elapsed: {days} days {hours} hours\n\n\
         Return {{\"factor\": <number between -{max} and {max}>, \"reason\": \"<one sentence>\"}}. \
         A positive factor means more hidden applicants are likely above the user; \
         negative means fewer.",
        quota = input.quota,
        applicants = input.real_applicants,
        rate = competition_rate,
        revealed = input.revealed_count,
        rank = input.my_rank,
        days = time.days_passed,
        hours = time.hours_left,
        max = MAX_ADJUSTMENT,
    );

    LlmRequest {
        messages: vec![Message::system(SYSTEM_PROMPT), Message::user(user)],
        model: None,
        max_tokens: Some(256),
        temperature: Some(0.2),
    }
}

/// Extract `(factor, reason)` from a model reply.
///
/// Models often wrap the object in prose or code fences, so the outermost
/// `{ … }` span is parsed. The factor is returned unclamped.
pub fn parse_reply(content: &str) -> Result<(f64, String), LlmError> {
    let start = content.find('{');
    let end = content.rfind('}');
    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &content[s..=e],
        _ => return Err(LlmError::MalformedReply(format!("no JSON object in {:?}", truncate(content)))),
    };

    let reply: AdjustmentReply = serde_json::from_str(json)?;
    if !reply.factor.is_finite() {
        return Err(LlmError::MalformedReply(format!("non-finite factor {}", reply.factor)));
    }
    Ok((reply.factor, reply.reason.trim().to_string()))
}

fn truncate(s: &str) -> String {
    s.chars().take(80).collect()
}
