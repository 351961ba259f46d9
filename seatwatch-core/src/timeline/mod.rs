/// Folding anchor-ordered window results into per-seat witness lists.
pub mod aggregate;
/// Densify and decode witness lists into per-slot timelines.
pub mod reconstruct;
