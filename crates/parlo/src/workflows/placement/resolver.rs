use super::domain::{Band, SelfReportTier};

const LEVELS_PER_BAND: u8 = 3;
const MAX_OFFSET: u8 = 2;
const NEUTRAL_OFFSET: u8 = 1;
const LEVEL_FLOOR: u8 = 0;
const LEVEL_CEILING: u8 = 8;

/// Maps a band plus the self-report tier onto the 0..=8 level scale.
///
/// Each band spans three levels; the tier picks the position inside the
/// band. A missing tier lands mid-band. The optional `hint` band, when it
/// disagrees with the scored band, moves the scored band one step toward
/// it before the level is computed.
pub fn resolve_level(band: Band, tier: Option<SelfReportTier>, hint: Option<Band>) -> u8 {
    let band = nudge_band(band, hint);
    let offset = tier.map(SelfReportTier::offset).unwrap_or(NEUTRAL_OFFSET);
    (band.index() * LEVELS_PER_BAND + offset.min(MAX_OFFSET)).clamp(LEVEL_FLOOR, LEVEL_CEILING)
}

fn nudge_band(band: Band, hint: Option<Band>) -> Band {
    match hint {
        Some(hint) if hint > band => band.step_up(),
        Some(hint) if hint < band => band.step_down(),
        _ => band,
    }
}
