//! Cleanliness filter

use crate::db::models::Outfit;

/// Keep only outfits whose every item is currently clean
///
/// Relative order is preserved. An outfit without items is vacuously
/// wearable. When nothing qualifies the result is simply empty; deciding
/// what that means for the user is left to the caller.
pub fn wearable_outfits(outfits: Vec<Outfit>) -> Vec<Outfit> {
    outfits.into_iter().filter(Outfit::is_wearable).collect()
}
