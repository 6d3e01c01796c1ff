//! Loading and validating rule tile definitions.
//!
//! Rule tiles are authored as JSON or TOML. Every loader validates before
//! returning, so a rule that tests a kind the palette cannot answer is reported
//! here instead of silently never matching.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tilestack_core::Cell;
use tracing::{debug, warn};

use crate::kind::NeighborKind;
use crate::rule::{LookupMode, RuleTile};

/// Errors that can occur when loading or validating a rule tile
#[derive(Debug, Error)]
pub enum RuleTileError {
    #[error("Failed to read rule tile file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported rule tile format: {0}")]
    UnsupportedFormat(String),
    #[error("Rule '{rule}' tests {kind:?}, but the palette has no tile for it")]
    UnconfiguredKind { rule: String, kind: NeighborKind },
    #[error("Rule '{rule}' lists offset {offset} more than once")]
    DuplicateOffset { rule: String, offset: Cell },
    #[error("Rule tile '{0}' uses first-hit lookup with an empty home layer name")]
    EmptyHomeLayer(String),
}

/// Check a rule tile for authoring mistakes.
pub fn validate_rule_tile(tile: &RuleTile) -> Result<(), RuleTileError> {
    if let LookupMode::FirstHit { home } = &tile.lookup {
        if home.as_str().is_empty() {
            return Err(RuleTileError::EmptyHomeLayer(tile.name.clone()));
        }
    }

    for (idx, rule) in tile.rules.iter().enumerate() {
        let label = if rule.name.is_empty() {
            format!("#{idx}")
        } else {
            rule.name.clone()
        };

        let mut seen = HashSet::new();
        for neighbor in &rule.neighbors {
            if !seen.insert(neighbor.offset) {
                return Err(RuleTileError::DuplicateOffset {
                    rule: label,
                    offset: neighbor.offset,
                });
            }
            if neighbor.kind.needs_palette() && tile.palette.tile_for(neighbor.kind).is_none() {
                return Err(RuleTileError::UnconfiguredKind {
                    rule: label,
                    kind: neighbor.kind,
                });
            }
        }

        if rule.neighbors.is_empty() && idx + 1 < tile.rules.len() {
            warn!(
                tile = %tile.name,
                rule = %label,
                "rule has no neighbors and always matches; later rules are unreachable"
            );
        }
    }

    Ok(())
}

impl RuleTile {
    /// Shorthand for [`validate_rule_tile`]
    pub fn validate(&self) -> Result<(), RuleTileError> {
        validate_rule_tile(self)
    }
}

/// Parse and validate a rule tile from a JSON string
pub fn parse_rule_tile_json(json: &str) -> Result<RuleTile, RuleTileError> {
    let tile: RuleTile = serde_json::from_str(json)?;
    validate_rule_tile(&tile)?;
    Ok(tile)
}

/// Parse and validate a rule tile from a TOML string
pub fn parse_rule_tile_toml(source: &str) -> Result<RuleTile, RuleTileError> {
    let tile: RuleTile = toml::from_str(source)?;
    validate_rule_tile(&tile)?;
    Ok(tile)
}

/// Load a rule tile from a `.json` or `.toml` file
pub fn load_rule_tile(path: &Path) -> Result<RuleTile, RuleTileError> {
    let content = std::fs::read_to_string(path)?;
    let tile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_rule_tile_json(&content)?,
        Some("toml") => parse_rule_tile_toml(&content)?,
        other => {
            return Err(RuleTileError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ))
        }
    };
    debug!(path = %path.display(), tile = %tile.name, rules = tile.rules.len(), "loaded rule tile");
    Ok(tile)
}

/// Serialize a rule tile to pretty JSON
pub fn rule_tile_to_json(tile: &RuleTile) -> Result<String, RuleTileError> {
    Ok(serde_json::to_string_pretty(tile)?)
}
