//! The built-in eight-phase display table.

use echoes_types::{PHASE_NAMES, PhaseCard, PhaseName};

const NEW_MOON_IMAGE: &str =
    "https://tse2.mm.bing.net/th?id=OIP.eCSzQqyDdJMd7BSG2aaCKwHaHa&pid=Api&P=0&h=220";
const WAXING_CRESCENT_IMAGE: &str = "https://images.rawpixel.com/image_800/czNmcy1wcml2YXRlL3Jhd3BpeGVsX2ltYWdlcy93ZWJzaXRlX2NvbnRlbnQvbHIvcGQzNi0xLWdzZmNfMjAxNzEyMDhfYXJjaGl2ZV9lMDAwODY1LmpwZw.jpg";
const QUARTER_IMAGE: &str = "https://images-assets.nasa.gov/image/PIA00302/PIA00302~medium.jpg";
const GIBBOUS_IMAGE: &str = "https://images-assets.nasa.gov/image/PIA00304/PIA00304~medium.jpg";
const WANING_CRESCENT_IMAGE: &str = "https://live.staticflickr.com/7084/6880158358_fddfdcfb8f_b.jpg";

/// Image URL for a phase.
pub const fn image_for(phase: PhaseName) -> &'static str {
    match phase {
        PhaseName::NewMoon => NEW_MOON_IMAGE,
        PhaseName::WaxingCrescent => WAXING_CRESCENT_IMAGE,
        PhaseName::FirstQuarter | PhaseName::FullMoon | PhaseName::LastQuarter => QUARTER_IMAGE,
        PhaseName::WaxingGibbous | PhaseName::WaningGibbous => GIBBOUS_IMAGE,
        PhaseName::WaningCrescent => WANING_CRESCENT_IMAGE,
    }
}

/// Single-glyph emoji for a phase.
pub const fn emoji_for(phase: PhaseName) -> &'static str {
    match phase {
        PhaseName::NewMoon => "\u{1F311}",
        PhaseName::WaxingCrescent => "\u{1F312}",
        PhaseName::FirstQuarter => "\u{1F313}",
        PhaseName::WaxingGibbous => "\u{1F314}",
        PhaseName::FullMoon => "\u{1F315}",
        PhaseName::WaningGibbous => "\u{1F316}",
        PhaseName::LastQuarter => "\u{1F317}",
        PhaseName::WaningCrescent => "\u{1F318}",
    }
}

/// The display card for one phase.
pub fn card(phase: PhaseName) -> PhaseCard {
    PhaseCard {
        phase,
        label: phase.label().to_owned(),
        emoji: emoji_for(phase).to_owned(),
        image_url: image_for(phase).to_owned(),
    }
}

/// All eight cards in cycle order.
pub fn cards() -> Vec<PhaseCard> {
    PHASE_NAMES.iter().copied().map(card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_cards_in_cycle_order() {
        let cards = cards();
        assert_eq!(cards.len(), 8);
        for (card, phase) in cards.iter().zip(PHASE_NAMES) {
            assert_eq!(card.phase, phase);
            assert_eq!(card.label, phase.label());
            assert!(card.image_url.starts_with("https://"));
        }
    }

    #[test]
    fn emojis_are_distinct() {
        let emojis: std::collections::BTreeSet<_> = PHASE_NAMES.iter().map(|p| emoji_for(*p)).collect();
        assert_eq!(emojis.len(), PhaseName::COUNT);
    }
}
