use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DashboardError, Result};

pub const MAX_BATCH_SYMBOLS: usize = 10;
const MAX_SYMBOL_LEN: usize = 5;

/// Ticker symbol: one to five ASCII uppercase letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Trims and uppercases, nothing else is coerced.
    pub fn parse(raw: &str) -> Result<Self> {
        let candidate = raw.trim().to_uppercase();
        let valid = (1..=MAX_SYMBOL_LEN).contains(&candidate.len())
            && candidate.bytes().all(|b| b.is_ascii_uppercase());

        if valid {
            Ok(Self(candidate))
        } else {
            Err(DashboardError::InvalidSymbol(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validates a batch for one pipeline run.
///
/// Any invalid entry rejects the whole batch and every offending entry is
/// reported. Duplicates collapse, keeping first-seen order.
pub fn validate_batch<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Symbol>> {
    let mut symbols: Vec<Symbol> = Vec::new();
    let mut rejected = Vec::new();

    for entry in raw {
        match Symbol::parse(entry.as_ref()) {
            Ok(symbol) if !symbols.contains(&symbol) => symbols.push(symbol),
            Ok(_) => {}
            Err(_) => rejected.push(entry.as_ref().to_string()),
        }
    }

    if !rejected.is_empty() {
        return Err(DashboardError::InvalidBatch {
            reason: format!("{} invalid symbol(s)", rejected.len()),
            rejected,
        });
    }
    if symbols.is_empty() {
        return Err(DashboardError::InvalidBatch {
            reason: "no symbols given".to_string(),
            rejected,
        });
    }
    if symbols.len() > MAX_BATCH_SYMBOLS {
        return Err(DashboardError::InvalidBatch {
            reason: format!(
                "{} symbols given, at most {} allowed",
                symbols.len(),
                MAX_BATCH_SYMBOLS
            ),
            rejected,
        });
    }

    Ok(symbols)
}

/// Comma separated form, e.g. `"AAPL, msft"`. Empty entries are skipped.
pub fn parse_symbol_list(list: &str) -> Result<Vec<Symbol>> {
    let entries: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();
    validate_batch(entries.as_slice())
}

/// Symbols as sent by a client: a JSON list or a comma separated string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolsInput {
    List(Vec<String>),
    Csv(String),
}

impl SymbolsInput {
    pub fn validate(&self) -> Result<Vec<Symbol>> {
        match self {
            SymbolsInput::List(entries) => validate_batch(entries.as_slice()),
            SymbolsInput::Csv(list) => parse_symbol_list(list),
        }
    }
}

/// Body of `POST /api/pipeline`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub symbols: SymbolsInput,
    #[serde(default)]
    pub with_ai: bool,
}
