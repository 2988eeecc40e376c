//! The layouts the plotting pipeline reaches for when the caller supplies none.

use crate::algo::{ForceAtlas2, FruchtermanReingold, WithFallback};

/// Whole-network layout: strong-gravity ForceAtlas2, falling back to a spring layout when the
/// simulation degenerates.
pub fn network_layout(
    weight_attr: Option<&str>,
    seed: u64,
) -> WithFallback<ForceAtlas2, FruchtermanReingold> {
    let mut fa2 = ForceAtlas2::strong_gravity().with_seed(seed);
    fa2.weight_attr = weight_attr.map(str::to_string);
    WithFallback::new(fa2, spring_layout(weight_attr, seed))
}

/// Layout of each combo's members.
pub fn intra_combo_layout(
    weight_attr: Option<&str>,
    seed: u64,
) -> WithFallback<ForceAtlas2, FruchtermanReingold> {
    network_layout(weight_attr, seed)
}

/// Layout of the graph between combos.
pub fn inter_combo_layout(weight_attr: Option<&str>, seed: u64) -> FruchtermanReingold {
    spring_layout(weight_attr, seed)
}

fn spring_layout(weight_attr: Option<&str>, seed: u64) -> FruchtermanReingold {
    let mut fr = FruchtermanReingold::default().with_seed(seed);
    fr.weight_attr = weight_attr.map(str::to_string);
    fr
}
