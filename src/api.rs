use crate::config::CalcParams;
use crate::engine::{CalculationResult, Calculator};
use crate::input::{referral_counts_from_multiplier, CalculationInput};
use crate::loader;
use crate::plan::{PlanIssue, PlanSnapshot};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{info, warn};

/// Snapshot loaded for one screen, read-only until reloaded.
pub struct PayForgeSession {
    pub calculator: Calculator,
    pub issues: Vec<PlanIssue>,
}

pub struct PayForgeState {
    pub sessions: RwLock<HashMap<String, PayForgeSession>>,
}

impl Default for PayForgeState {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

/// Registers an already-fetched snapshot under `session_id`, replacing any
/// previous one. Returns the snapshot's data-quality issues.
pub fn install_snapshot(
    state: &PayForgeState,
    session_id: &str,
    snapshot: PlanSnapshot,
    params: Option<CalcParams>,
) -> Result<Vec<PlanIssue>, String> {
    let issues = snapshot.validate();
    for issue in &issues {
        warn!("API: session '{}': {}", session_id, issue.message);
    }

    let calculator = Calculator::new(snapshot, params.unwrap_or_default());
    let mut sessions = state.sessions.write().map_err(|e| e.to_string())?;
    sessions.insert(
        session_id.to_string(),
        PayForgeSession {
            calculator,
            issues: issues.clone(),
        },
    );
    Ok(issues)
}

/// Reads the rank table and binary settings from disk into a session.
pub fn load_plan(
    state: &PayForgeState,
    session_id: &str,
    ranks_path: Option<&str>,
    binary_path: Option<&str>,
    params: Option<CalcParams>,
) -> Result<String, String> {
    let snapshot = loader::load_snapshot(ranks_path, binary_path)
        .map_err(|e| format!("Plan Load Failed: {}", e))?;
    let step_count = snapshot.ranks.len();
    let issues = install_snapshot(state, session_id, snapshot, params)?;

    info!(
        "API: session '{}' loaded with {} rank steps ({} issues)",
        session_id,
        step_count,
        issues.len()
    );
    Ok(format!("Session '{}' Loaded Successfully", session_id))
}

pub fn calculate(
    state: &PayForgeState,
    session_id: &str,
    input: &CalculationInput,
) -> Result<CalculationResult, String> {
    let sessions = state.sessions.read().map_err(|e| e.to_string())?;
    let session = sessions.get(session_id).ok_or_else(|| {
        format!(
            "Session '{}' not found. Please load a plan first.",
            session_id
        )
    })?;

    session
        .calculator
        .calculate(input)
        .map_err(|e| e.to_string())
}

/// Form convenience: replaces the referral counts with `multiplier^level`.
pub fn autofill_referrals(mut input: CalculationInput, multiplier: f64) -> CalculationInput {
    input.referral_counts = referral_counts_from_multiplier(multiplier);
    input
}
