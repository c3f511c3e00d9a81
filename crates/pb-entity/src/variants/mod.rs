//! The workload variant implementations and their construction factory.
//!
//! One capability interface ([`BenchEntity`]), a closed set of variants,
//! selected by the [`VariantKind`] tag — no runtime inheritance.

pub mod alloc;
pub mod bounce;
pub mod memory;
pub mod mix;
pub mod phold;
pub mod sha;
pub mod simple;

use pb_core::{BenchResult, EntityId};

use crate::config::{EntityConfig, VariantKind};
use crate::model::BenchEntity;

/// Build one entity of the configured variant.
///
/// Validates the whole configuration bundle first, so every constructor can
/// assume in-range parameters.  An unrecognized variant string never reaches
/// here — [`VariantKind`]'s `FromStr` already rejects it.
pub fn build_entity(
    id: EntityId,
    name: String,
    cfg: &EntityConfig,
) -> BenchResult<Box<dyn BenchEntity>> {
    cfg.validate()?;
    Ok(match cfg.variant {
        VariantKind::Simple => Box::new(simple::Simple::new(id, name, cfg)?),
        VariantKind::Alloc => Box::new(alloc::Alloc::new(id, name, cfg)?),
        VariantKind::Memory => Box::new(memory::MemoryMove::new(id, name, cfg)?),
        VariantKind::Sha => Box::new(sha::ShaDigest::new(id, name, cfg)?),
        VariantKind::Phold => Box::new(phold::Phold::new(id, name, cfg)?),
        VariantKind::Mix => Box::new(mix::Mix::new(id, name, cfg)?),
        VariantKind::Bounce => Box::new(bounce::Bounce::new(id, name, cfg)?),
    })
}
