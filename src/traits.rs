//! Seams between the allocation core and the outside world.
//!
//! The core only consumes snapshots. Where those snapshots come from (a
//! scenario file, the hosted database, a test fixture) is abstracted here.

use crate::normalize::Normalized;
use crate::scenario::RawScenario;

/// Something that can produce a raw vehicle/task snapshot.
pub trait ScenarioSource {
    type Error;

    /// Fetch the raw, not yet normalized, records.
    fn load_raw(&self) -> Result<RawScenario, Self::Error>;

    /// Fetch and normalize in one step.
    fn load(&self) -> Result<Normalized, Self::Error> {
        Ok(self.load_raw()?.normalize())
    }
}
