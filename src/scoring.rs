//! Preference-based filtering and ranking of a POI pool
//!
//! Scoring is a pure function over in-memory collections: the pool goes in,
//! a filtered and deterministically ordered sequence comes out. The greedy
//! builder draws its quality entirely from this ordering.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{PhysicalTier, Poi, PoiCategory, PriceTier, Season, TravelStyle, TravelerProfile};

/// Categories that earn the style bonus for each travel style
#[must_use]
pub fn style_categories(style: TravelStyle) -> &'static [PoiCategory] {
    match style {
        TravelStyle::Active => &[PoiCategory::Nature, PoiCategory::Other],
        TravelStyle::Cultural => &[PoiCategory::Culture, PoiCategory::Museum],
        TravelStyle::Relax => &[PoiCategory::Guesthouse, PoiCategory::Food],
        TravelStyle::Mixed => &[],
    }
}

/// Physical difficulties a traveler can take on.
///
/// Traveling with children caps the trip at easy visits regardless of the
/// traveler's own fitness tier.
#[must_use]
pub fn allowed_physical(profile: &TravelerProfile) -> &'static [PhysicalTier] {
    if profile.with_children {
        return &[PhysicalTier::Easy];
    }
    match profile.physical_level {
        PhysicalTier::Easy => &[PhysicalTier::Easy],
        PhysicalTier::Medium => &[PhysicalTier::Easy, PhysicalTier::Medium],
        PhysicalTier::Hard => &[
            PhysicalTier::Easy,
            PhysicalTier::Medium,
            PhysicalTier::Hard,
        ],
    }
}

/// Extract up to three lowercase search tokens from the free-text interests.
///
/// Tokens are split on whitespace and commas; anything shorter than three
/// characters is noise and dropped.
fn interest_tokens(interests: &str) -> Vec<String> {
    interests
        .replace(',', " ")
        .split_whitespace()
        .filter(|t| t.chars().count() >= 3)
        .take(3)
        .map(str::to_lowercase)
        .collect()
}

fn matches_interests(poi: &Poi, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let haystack = format!(
        "{} {} {} {}",
        poi.name, poi.short_description, poi.detailed_description, poi.region
    )
    .to_lowercase();
    tokens.iter().any(|t| haystack.contains(t.as_str()))
}

fn passes_filters(poi: &Poi, profile: &TravelerProfile) -> bool {
    if poi.season != Season::YearRound && poi.season != profile.preferred_season {
        return false;
    }
    if !allowed_physical(profile).contains(&poi.physical_level) {
        return false;
    }
    if profile.budget_level == PriceTier::Low && poi.price_level == PriceTier::High {
        return false;
    }
    true
}

/// Preference score of a single POI against a profile; scores never filter
#[must_use]
pub fn preference_score(poi: &Poi, profile: &TravelerProfile) -> u32 {
    let style_score = if style_categories(profile.travel_style).contains(&poi.category) {
        3
    } else {
        0
    };
    let interest_score = if matches_interests(poi, &interest_tokens(&profile.interests)) {
        1
    } else {
        0
    };
    style_score + interest_score
}

/// Deterministic tiebreak chain shared by both rankings:
/// rating desc (missing = 0), base cost asc (missing after all present costs),
/// name asc.
fn rating_cost_name(a: &Poi, b: &Poi) -> Ordering {
    b.rating_or_zero()
        .total_cmp(&a.rating_or_zero())
        .then_with(|| match (a.base_cost, b.base_cost) {
            (Some(ca), Some(cb)) => ca.cmp(&cb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.name.cmp(&b.name))
}

/// Filter and rank a POI pool for a traveler.
///
/// POIs failing the season, physical, or budget filters are dropped; the
/// survivors are ordered by combined preference score descending, then the
/// shared tiebreak chain.
#[must_use]
pub fn rank_pois(pool: &[Poi], profile: &TravelerProfile) -> Vec<Poi> {
    let tokens = interest_tokens(&profile.interests);
    let style = style_categories(profile.travel_style);

    let mut scored: Vec<(u32, Poi)> = pool
        .iter()
        .filter(|poi| passes_filters(poi, profile))
        .map(|poi| {
            let style_score = if style.contains(&poi.category) { 3 } else { 0 };
            let interest_score = u32::from(matches_interests(poi, &tokens));
            (style_score + interest_score, poi.clone())
        })
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| rating_cost_name(a, b)));

    debug!(
        pool = pool.len(),
        ranked = scored.len(),
        "ranked POI pool against profile"
    );
    scored.into_iter().map(|(_, poi)| poi).collect()
}

/// Ranking used when no profile is available: no filtering, no preference.
#[must_use]
pub fn rank_unfiltered(pool: &[Poi]) -> Vec<Poi> {
    let mut ranked = pool.to_vec();
    ranked.sort_by(rating_cost_name);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cultural_low_easy_summer() -> TravelerProfile {
        TravelerProfile {
            travel_style: TravelStyle::Cultural,
            budget_level: PriceTier::Low,
            physical_level: PhysicalTier::Easy,
            preferred_season: Season::Summer,
            with_children: false,
            interests: "шаман музей".to_string(),
        }
    }

    #[test]
    fn test_filters_drop_hard_and_high_price() {
        let museum = Poi::new(1, "National Museum", PoiCategory::Museum)
            .with_season(Season::Summer)
            .with_physical_level(PhysicalTier::Easy)
            .with_price_level(PriceTier::Low)
            .with_rating(4.5);
        let clinic = Poi::new(2, "Шаманская клиника", PoiCategory::ShamanClinic)
            .with_season(Season::YearRound)
            .with_physical_level(PhysicalTier::Easy)
            .with_price_level(PriceTier::High);
        let ridge = Poi::new(3, "Mountain ridge", PoiCategory::Nature)
            .with_season(Season::Summer)
            .with_physical_level(PhysicalTier::Hard)
            .with_price_level(PriceTier::Medium);

        let ranked = rank_pois(&[museum, clinic, ridge], &cultural_low_easy_summer());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "National Museum");
    }

    #[test]
    fn test_season_filter_admits_year_round() {
        let profile = TravelerProfile {
            preferred_season: Season::Winter,
            ..TravelerProfile::default()
        };
        let winter = Poi::new(1, "Ice festival", PoiCategory::Culture).with_season(Season::Winter);
        let year_round = Poi::new(2, "Museum", PoiCategory::Museum);
        let summer = Poi::new(3, "River rafting", PoiCategory::Nature).with_season(Season::Summer);

        let ranked = rank_pois(&[winter, year_round, summer], &profile);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Ice festival"));
        assert!(names.contains(&"Museum"));
        assert!(!names.contains(&"River rafting"));
    }

    #[test]
    fn test_children_force_easy_only() {
        let profile = TravelerProfile {
            physical_level: PhysicalTier::Hard,
            with_children: true,
            ..TravelerProfile::default()
        };
        assert_eq!(allowed_physical(&profile), &[PhysicalTier::Easy]);

        let medium = Poi::new(1, "Canyon walk", PoiCategory::Nature)
            .with_physical_level(PhysicalTier::Medium);
        assert!(rank_pois(&[medium], &profile).is_empty());
    }

    #[rstest]
    #[case(TravelStyle::Active, PoiCategory::Nature, 3)]
    #[case(TravelStyle::Active, PoiCategory::Museum, 0)]
    #[case(TravelStyle::Cultural, PoiCategory::Museum, 3)]
    #[case(TravelStyle::Relax, PoiCategory::Food, 3)]
    #[case(TravelStyle::Mixed, PoiCategory::Nature, 0)]
    fn test_style_score(
        #[case] style: TravelStyle,
        #[case] category: PoiCategory,
        #[case] expected: u32,
    ) {
        let profile = TravelerProfile {
            travel_style: style,
            ..TravelerProfile::default()
        };
        let poi = Poi::new(1, "P", category);
        assert_eq!(preference_score(&poi, &profile), expected);
    }

    #[test]
    fn test_interest_tokens_split_and_limits() {
        assert_eq!(
            interest_tokens("шаманизм, археология юрты  ar"),
            vec!["шаманизм", "археология", "юрты"]
        );
        // at most three tokens are considered
        assert_eq!(interest_tokens("one two three four").len(), 3);
        assert!(interest_tokens("a, b").is_empty());
    }

    #[test]
    fn test_interest_match_is_case_insensitive_substring() {
        let profile = TravelerProfile {
            interests: "МУЗЕЙ".to_string(),
            ..TravelerProfile::default()
        };
        let poi = Poi::new(1, "Национальный музей Тувы", PoiCategory::Museum);
        assert_eq!(preference_score(&poi, &profile), 1);

        let miss = Poi::new(2, "Юрточный лагерь", PoiCategory::Guesthouse);
        assert_eq!(preference_score(&miss, &profile), 0);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let profile = TravelerProfile {
            travel_style: TravelStyle::Cultural,
            ..TravelerProfile::default()
        };
        // Same combined score; ordered by rating desc, cost asc (missing last), name.
        let a = Poi::new(1, "B site", PoiCategory::Museum).with_rating(4.0).with_base_cost(100);
        let b = Poi::new(2, "A site", PoiCategory::Museum).with_rating(4.0).with_base_cost(100);
        let c = Poi::new(3, "C site", PoiCategory::Museum).with_rating(4.0);
        let d = Poi::new(4, "D site", PoiCategory::Museum).with_rating(4.5);

        let ranked = rank_pois(&[a, b, c, d], &profile);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["D site", "A site", "B site", "C site"]);
    }

    #[test]
    fn test_unfiltered_ranking_orders_by_rating_then_cost() {
        let a = Poi::new(1, "A", PoiCategory::Nature).with_rating(3.0).with_base_cost(200);
        let b = Poi::new(2, "B", PoiCategory::Nature).with_rating(4.8);
        let c = Poi::new(3, "C", PoiCategory::Nature).with_rating(3.0).with_base_cost(50);

        let ranked = rank_unfiltered(&[a, b, c]);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
