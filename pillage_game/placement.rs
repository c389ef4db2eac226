use pillage_types::{buildings::BuildingKind, map::Position};

use crate::models::village::BuildPosition;

/// Checks whether `kind` may stand on `position`.
///
/// A tile dedicated to a building kind only accepts that kind. A kind that
/// owns dedicated tiles (Wall, Harbor...) can only be placed on one of them.
pub fn is_placement_allowed(
    positions: &[BuildPosition],
    kind: BuildingKind,
    position: Position,
) -> bool {
    let has_dedicated_tile = positions
        .iter()
        .any(|bp| bp.allowed_building == Some(kind));

    positions
        .iter()
        .filter(|bp| bp.position == position)
        .any(|bp| match bp.allowed_building {
            Some(allowed) => allowed == kind,
            None => !has_dedicated_tile,
        })
}
