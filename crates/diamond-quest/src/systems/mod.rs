pub mod combat;
pub mod effects;

pub use combat::{HitLedger, Hits, Strike, StrikeTable};
pub use effects::{EffectsState, FlashKind, ImpactFlash, Spark};
