pub mod genomic_range;
pub mod policy;

// re-export for cleaner imports
pub use self::genomic_range::{GenomicRange, RegionResolver, resolve};
pub use self::policy::BoundaryPolicy;
