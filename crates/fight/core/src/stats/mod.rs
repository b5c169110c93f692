//! Stat system.
//!
//! ```text
//! [ BruteRecord (persisted) ]
//!      ↓
//! [ SkillSet ]
//!      ↓
//! [ BonusStack per stat ]   Σ flat → Clamp
//!      ↓
//! [ EffectiveStats ]        never stored, always recomputed
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: only the brute record is persisted
//! 2. **Deterministic**: pure functions, no I/O or randomness
//! 3. **Order independent**: skill list order never changes the result

pub mod bonus;
pub mod effective;
pub mod resolver;
pub mod skills;

pub use bonus::{BonusStack, StatBounds};
pub use effective::{EffectiveStats, Rate};
pub use resolver::StatsResolver;
pub use skills::{Skill, SkillSet};
