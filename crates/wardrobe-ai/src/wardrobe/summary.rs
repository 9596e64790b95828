use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{round_to, ConfidenceBand, GarmentProfile};

/// Headline counts shown alongside a wardrobe listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WardrobeSummary {
    pub total: usize,
    pub by_category: BTreeMap<&'static str, usize>,
    pub by_confidence: BTreeMap<&'static str, usize>,
    pub needs_review: usize,
}

impl WardrobeSummary {
    pub fn from_garments<G: AsRef<GarmentProfile>>(garments: &[G]) -> Self {
        let mut by_category = BTreeMap::new();
        let mut by_confidence: BTreeMap<&'static str, usize> = [
            ConfidenceBand::High,
            ConfidenceBand::Medium,
            ConfidenceBand::Low,
        ]
        .into_iter()
        .map(|band| (band.label(), 0))
        .collect();
        let mut needs_review = 0;

        for garment in garments {
            let profile = garment.as_ref();
            *by_category.entry(profile.primary_category.label()).or_insert(0) += 1;
            *by_confidence.entry(profile.confidence_band.label()).or_insert(0) += 1;
            if profile.needs_review {
                needs_review += 1;
            }
        }

        Self {
            total: garments.len(),
            by_category,
            by_confidence,
            needs_review,
        }
    }
}

/// Full breakdown of a non-empty wardrobe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardrobeStats {
    pub total_items: usize,
    pub by_category: BTreeMap<&'static str, usize>,
    pub by_formality: BTreeMap<&'static str, usize>,
    pub by_seasonality: BTreeMap<&'static str, usize>,
    pub by_confidence_band: BTreeMap<&'static str, usize>,
    pub avg_confidence: f64,
    pub needs_review_count: usize,
}

impl WardrobeStats {
    /// `None` for an empty wardrobe.
    pub fn from_garments<G: AsRef<GarmentProfile>>(garments: &[G]) -> Option<Self> {
        if garments.is_empty() {
            return None;
        }

        let mut stats = Self {
            total_items: garments.len(),
            by_category: BTreeMap::new(),
            by_formality: BTreeMap::new(),
            by_seasonality: BTreeMap::new(),
            by_confidence_band: BTreeMap::new(),
            avg_confidence: 0.0,
            needs_review_count: 0,
        };
        let mut total_confidence = 0.0;

        for garment in garments {
            let profile = garment.as_ref();
            *stats.by_category.entry(profile.primary_category.label()).or_insert(0) += 1;
            *stats.by_formality.entry(profile.formality_level.label()).or_insert(0) += 1;
            for season in &profile.seasonality {
                *stats.by_seasonality.entry(season.label()).or_insert(0) += 1;
            }
            *stats
                .by_confidence_band
                .entry(profile.confidence_band.label())
                .or_insert(0) += 1;
            total_confidence += profile.confidence_score;
            if profile.needs_review {
                stats.needs_review_count += 1;
            }
        }

        stats.avg_confidence = round_to(total_confidence / garments.len() as f64, 2);
        Some(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wardrobe::domain::{PrimaryCategory, Season};

    fn profile(category: PrimaryCategory, confidence: f64) -> GarmentProfile {
        let mut profile = GarmentProfile {
            primary_category: category,
            seasonality: vec![Season::Spring, Season::Fall],
            ..GarmentProfile::default()
        };
        profile.rebase_confidence(confidence);
        profile
    }

    #[test]
    fn summary_always_reports_every_confidence_band() {
        let summary = WardrobeSummary::from_garments::<GarmentProfile>(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.by_confidence.len(), 3);
        assert!(summary.by_confidence.values().all(|count| *count == 0));
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn summary_counts_categories_and_reviews() {
        let garments = vec![
            profile(PrimaryCategory::Top, 0.9),
            profile(PrimaryCategory::Top, 0.1),
            profile(PrimaryCategory::Bottom, 0.3),
        ];
        let summary = WardrobeSummary::from_garments(&garments);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_category.get("Top"), Some(&2));
        assert_eq!(summary.by_category.get("Bottom"), Some(&1));
        assert_eq!(summary.by_confidence.get("High"), Some(&1));
        assert_eq!(summary.by_confidence.get("Medium"), Some(&1));
        assert_eq!(summary.by_confidence.get("Low"), Some(&1));
        assert_eq!(summary.needs_review, 1);
    }

    #[test]
    fn stats_reject_empty_wardrobe() {
        assert!(WardrobeStats::from_garments::<GarmentProfile>(&[]).is_none());
    }

    #[test]
    fn stats_average_confidence_and_seasons() {
        let garments = vec![
            profile(PrimaryCategory::Top, 0.9),
            profile(PrimaryCategory::Outerwear, 0.4),
        ];
        let stats = WardrobeStats::from_garments(&garments).expect("non-empty wardrobe");

        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.avg_confidence, 0.65);
        assert_eq!(stats.by_seasonality.get("Spring"), Some(&2));
        assert_eq!(stats.by_seasonality.get("Fall"), Some(&2));
        assert_eq!(stats.by_formality.get("Casual"), Some(&2));
        assert_eq!(stats.needs_review_count, 0);
    }
}
