//! Snapshot persistence: the whole simulation as one JSON document.
//!
//! The state is self-contained, so a snapshot taken at any day boundary or
//! mid-day instant resumes bit-for-bit. Only the engine's RNG position is
//! outside the document; a resumed run continues the market, not the exact
//! noise tape.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use types::SimulationState;

use crate::error::Result;

/// Serialize the full state to a JSON string.
pub fn to_json(state: &SimulationState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Rebuild a state from a JSON string.
pub fn from_json(json: &str) -> Result<SimulationState> {
    Ok(serde_json::from_str(json)?)
}

/// Write the full state to `path` as JSON.
pub fn save_state(state: &SimulationState, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, state)?;
    writer.flush()?;
    Ok(())
}

/// Load a state previously written by [`save_state`].
pub fn load_state(path: impl AsRef<Path>) -> Result<SimulationState> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

// =============================================================================
// Tests
// =============================================================================
