//! The XP/level curve.
//!
//! Quadratic progression: each level costs 100 more XP than the previous
//! jump, giving cumulative totals 0, 100, 300, 600, 1000, ...

/// `xp_for_level` without saturation; `None` when the total exceeds u64.
fn checked_xp_for_level(level: u32) -> Option<u64> {
    if level <= 1 {
        return Some(0);
    }
    let l = u64::from(level);
    50u64.checked_mul(l - 1)?.checked_mul(l)
}

/// Total cumulative XP required to reach `level`.
///
/// The jump from level L-1 to L costs `100 * (L-1)`; summing the jumps
/// gives `50 * (L-1) * L`. Saturates at `u64::MAX` for the astronomically
/// high levels whose total no longer fits.
pub fn xp_for_level(level: u32) -> u64 {
    checked_xp_for_level(level).unwrap_or(u64::MAX)
}

/// The level reached with `xp` total experience points; inverse of
/// [`xp_for_level`].
///
/// Solves `50L^2 - 50L - xp = 0` for the positive root and floors it. The
/// float result is nudged so the round trip
/// `xp_for_level(level_for_xp(xp)) <= xp < xp_for_level(level_for_xp(xp) + 1)`
/// holds for every input.
pub fn level_for_xp(xp: u64) -> u32 {
    if xp < 100 {
        return 1;
    }
    let root = (2500.0 + 200.0 * xp as f64).sqrt();
    let mut level = ((50.0 + root) / 100.0).floor() as u32;
    while checked_xp_for_level(level + 1).is_some_and(|next| next <= xp) {
        level += 1;
    }
    while level > 1 && xp_for_level(level) > xp {
        level -= 1;
    }
    level
}
