//! Quality selection logic.
//!
//! Centralizes the rules for picking one download link per episode so the
//! resolver and any future adapter agree on fallback behavior.
//!
//! # Selection Rules
//!
//! 1. If the preferred tier was discovered, pick it
//! 2. Otherwise walk the tiers below the preferred one, best first, and pick
//!    the first discovered tier (a fallback)
//! 3. Never pick a tier above the preferred one; if nothing at or below it
//!    exists, select nothing
//!
//! # Example
//!
//! ```
//! use anidl_core::{QualityCandidates, QualityTier};
//! use anidl_download::select_quality;
//!
//! let candidates: QualityCandidates = [(QualityTier::Sd480, "https://cdn/480.mp4")]
//!     .into_iter()
//!     .collect();
//! let selection = select_quality(&candidates, QualityTier::Fhd1080).unwrap();
//! assert_eq!(selection.tier, QualityTier::Sd480);
//! assert!(selection.fallback);
//! ```

use anidl_core::{QualityCandidates, QualityTier};

/// Result of quality selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualitySelection {
    /// The selected tier.
    pub tier: QualityTier,
    /// Download URL of the selected tier.
    pub url: String,
    /// Whether a lower tier was substituted for the preferred one.
    pub fallback: bool,
}

/// Select a download link for the preferred tier, falling back downward.
pub fn select_quality(
    candidates: &QualityCandidates,
    preferred: QualityTier,
) -> Option<QualitySelection> {
    scan_from(candidates, preferred).map(|(tier, url)| QualitySelection {
        tier,
        url: url.to_string(),
        fallback: tier != preferred,
    })
}

/// Select using a preference given as free text (e.g. `"720p"`).
///
/// An unrecognized label is logged and treated as a request for the highest
/// tier; any result is then reported as a fallback.
pub fn select_quality_label(
    candidates: &QualityCandidates,
    preferred: &str,
) -> Option<QualitySelection> {
    match preferred.parse::<QualityTier>() {
        Ok(tier) => select_quality(candidates, tier),
        Err(err) => {
            tracing::warn!(
                preferred,
                error = %err,
                "Invalid quality preference, assuming highest quality for fallback"
            );
            scan_from(candidates, QualityTier::Fhd1080).map(|(tier, url)| QualitySelection {
                tier,
                url: url.to_string(),
                fallback: true,
            })
        }
    }
}

fn scan_from(candidates: &QualityCandidates, start: QualityTier) -> Option<(QualityTier, &str)> {
    start
        .at_or_below()
        .find_map(|tier| candidates.get(tier).map(|url| (tier, url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(tiers: &[QualityTier]) -> QualityCandidates {
        tiers
            .iter()
            .map(|tier| (*tier, format!("https://cdn.example/{}.mp4", tier.as_str())))
            .collect()
    }

    #[test]
    fn test_exact_match_has_priority() {
        let all = candidates(&QualityTier::ALL);

        let selected = select_quality(&all, QualityTier::Sd480).unwrap();
        assert_eq!(selected.tier, QualityTier::Sd480);
        assert_eq!(selected.url, "https://cdn.example/480.mp4");
        assert!(!selected.fallback);

        let selected = select_quality(&all, QualityTier::Fhd1080).unwrap();
        assert_eq!(selected.tier, QualityTier::Fhd1080);
        assert!(!selected.fallback);
    }

    #[test]
    fn test_falls_back_to_next_lower_tier() {
        let available = candidates(&[QualityTier::Hd720, QualityTier::Sd480]);

        let selected = select_quality(&available, QualityTier::Fhd1080).unwrap();
        assert_eq!(selected.tier, QualityTier::Hd720);
        assert!(selected.fallback);
    }

    #[test]
    fn test_only_480_substitutes_for_1080() {
        let mut available = QualityCandidates::new();
        available.insert(QualityTier::Sd480, "X");

        let selected = select_quality(&available, QualityTier::Fhd1080).unwrap();
        assert_eq!(selected.url, "X");
        assert!(selected.fallback);
    }

    #[test]
    fn test_never_picks_a_higher_tier() {
        let available = candidates(&[QualityTier::Fhd1080, QualityTier::Hd720]);
        assert_eq!(select_quality(&available, QualityTier::Sd480), None);

        let available = candidates(&[QualityTier::Fhd1080]);
        assert_eq!(select_quality(&available, QualityTier::Hd720), None);
    }

    #[test]
    fn test_empty_candidates_select_nothing() {
        let empty = QualityCandidates::new();
        for tier in QualityTier::ALL {
            assert_eq!(select_quality(&empty, tier), None);
        }
    }

    #[test]
    fn test_selection_is_preferred_or_best_lower() {
        // Every non-empty subset of tiers against every preference.
        for mask in 1u8..8 {
            let tiers: Vec<_> = QualityTier::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, tier)| tier)
                .collect();
            let available = candidates(&tiers);

            for preferred in QualityTier::ALL {
                let expected = tiers.iter().copied().find(|tier| *tier >= preferred);
                let selected = select_quality(&available, preferred).map(|s| s.tier);
                assert_eq!(selected, expected, "tiers {tiers:?}, preferred {preferred}");
            }
        }
    }

    #[test]
    fn test_label_preference() {
        let available = candidates(&[QualityTier::Hd720]);

        let selected = select_quality_label(&available, "720p").unwrap();
        assert_eq!(selected.tier, QualityTier::Hd720);
        assert!(!selected.fallback);
    }

    #[test]
    fn test_unranked_label_scans_from_highest() {
        let available = candidates(&[QualityTier::Hd720, QualityTier::Sd480]);

        let selected = select_quality_label(&available, "4k").unwrap();
        assert_eq!(selected.tier, QualityTier::Hd720);
        assert!(selected.fallback);
    }
}
