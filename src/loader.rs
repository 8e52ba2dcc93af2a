use crate::config::BinaryConfig;
use crate::error::{PayForgeError, PfResult};
use crate::input::CalculationInput;
use crate::plan::{PlanSnapshot, RankStep, RankTable};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// One row of the backend's key/value settings table.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingRow {
    pub key: String,
    pub value: serde_json::Value,
}

// Top-level JSON arrays and objects carry different shapes in the same file slot.
fn is_json_array(content: &str) -> bool {
    content.trim_start().starts_with('[')
}

/// Loads a rank table, picking the format from the file extension.
pub fn load_rank_table<P: AsRef<Path>>(path: P) -> PfResult<RankTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("csv") => load_rank_csv(path),
        Some("json") => load_rank_json(path),
        _ => Err(PayForgeError::Config(format!(
            "Unsupported rank table format '{}' (expected .csv or .json)",
            path.display()
        ))),
    }
}

pub fn load_rank_csv<P: AsRef<Path>>(path: P) -> PfResult<RankTable> {
    let path = path.as_ref();
    debug!("Loading rank steps from CSV: {}", path.display());
    let file = File::open(path).map_err(|e| {
        PayForgeError::Config(format!(
            "Could not open rank table at '{}': {}",
            path.display(),
            e
        ))
    })?;
    rank_csv_from_reader(file)
}

/// Reads `step_number,step_name,commission_percentage,sales_quota` rows.
/// Short or unparsable rows are skipped; a missing quota column means 0.
pub fn rank_csv_from_reader<R: Read>(reader: R) -> PfResult<RankTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut steps = Vec::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.len() < 3 {
            skipped_count += 1;
            continue;
        }

        let step_number: u32 = match rec[0].parse() {
            Ok(v) => v,
            Err(_) => {
                debug!("[Row {}] bad step number '{}'", row_idx + 1, &rec[0]);
                skipped_count += 1;
                continue;
            }
        };
        let commission_percentage: f64 = match rec[2].parse() {
            Ok(v) => v,
            Err(_) => {
                debug!("[Row {}] bad commission '{}'", row_idx + 1, &rec[2]);
                skipped_count += 1;
                continue;
            }
        };
        let sales_quota: f64 = match rec.get(3).filter(|s| !s.is_empty()) {
            Some(s) => match s.parse() {
                Ok(v) => v,
                Err(_) => {
                    skipped_count += 1;
                    continue;
                }
            },
            None => 0.0,
        };

        steps.push(RankStep::new(
            step_number,
            &rec[1],
            commission_percentage,
            sales_quota,
        ));
    }

    if skipped_count > 0 {
        warn!("Skipped {} invalid rows in rank table.", skipped_count);
    }
    info!("Loaded {} rank steps", steps.len());

    Ok(steps.into())
}

pub fn load_rank_json<P: AsRef<Path>>(path: P) -> PfResult<RankTable> {
    let content = fs::read_to_string(path)?;
    let table: RankTable = serde_json::from_str(&content)?;
    info!("Loaded {} rank steps", table.len());
    Ok(table)
}

/// Accepts either a settings object or a list of `{key, value}` rows.
/// Anything not supplied keeps its default.
pub fn load_binary_config<P: AsRef<Path>>(path: P) -> PfResult<BinaryConfig> {
    let content = fs::read_to_string(path)?;
    binary_config_from_str(&content)
}

pub fn binary_config_from_str(content: &str) -> PfResult<BinaryConfig> {
    if is_json_array(content) {
        let rows: Vec<SettingRow> = serde_json::from_str(content)?;
        binary_config_from_settings(&rows)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

pub fn binary_config_from_settings(rows: &[SettingRow]) -> PfResult<BinaryConfig> {
    let mut cfg = BinaryConfig::default();
    for row in rows {
        let value = setting_value(row)?;
        if !cfg.apply_setting(&row.key, value)? {
            debug!("ignoring unrelated setting '{}'", row.key);
        }
    }
    Ok(cfg)
}

// The settings table stores numbers either as JSON numbers or as text.
fn setting_value(row: &SettingRow) -> PfResult<f64> {
    let parsed = match &row.value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        PayForgeError::Config(format!(
            "Setting '{}' has non-numeric value {}",
            row.key, row.value
        ))
    })
}

/// Loads one input object or an array of them.
pub fn load_inputs<P: AsRef<Path>>(path: P) -> PfResult<Vec<CalculationInput>> {
    let content = fs::read_to_string(path)?;
    inputs_from_str(&content)
}

pub fn inputs_from_str(content: &str) -> PfResult<Vec<CalculationInput>> {
    if is_json_array(content) {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(vec![serde_json::from_str(content)?])
    }
}

/// Builds the session snapshot. Missing paths fall back to the built-in
/// rank table and default binary settings.
pub fn load_snapshot(ranks: Option<&str>, binary: Option<&str>) -> PfResult<PlanSnapshot> {
    let ranks = match ranks {
        Some(p) => {
            info!("Loading rank table: {}", p);
            load_rank_table(p)?
        }
        None => {
            info!("No rank table given, using the standard seven-step plan");
            RankTable::standard()
        }
    };

    let binary = match binary {
        Some(p) => {
            info!("Loading binary settings: {}", p);
            load_binary_config(p)?
        }
        None => BinaryConfig::default(),
    };

    Ok(PlanSnapshot::new(ranks, binary))
}
