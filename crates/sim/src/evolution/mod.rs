//! Evolution module providing the two phases of a generation.
//!
//! Each generation is applied in a fixed order:
//! - **Migration**: asymmetric exchange of individuals between the demes
//! - **Selection**: conversion in heterozygotes, then viability selection,
//!   renormalised by mean fitness in each deme independently

pub mod migration;
pub mod selection;

use crate::base::AlleleState;

pub use migration::MigrationModel;
pub use selection::DriveSelection;

/// A deterministic transformation of both deme frequencies.
///
/// Implementors must be pure: the same input always yields bit-identical
/// output and no state is retained between calls.
pub trait GenerationPhase {
    /// Apply this phase to both demes.
    fn apply(&self, state: AlleleState) -> AlleleState;
}
