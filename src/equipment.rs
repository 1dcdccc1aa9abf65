//! Packing checklist derived from the selected visits and profile

use std::collections::HashSet;

use crate::models::{PhysicalTier, PoiCategory, Season, TravelerProfile, Visit};

const BASE_ITEMS: &[&str] = &[
    "ID, bank card, and some cash",
    "Phone and power bank, chargers",
    "Water and snacks",
    "First-aid kit (plasters, painkiller, antiseptic)",
];

const WINTER_ITEMS: &[&str] = &[
    "Layered warm clothing, thermal underwear",
    "Gloves, hat, warm socks",
];

const SHOULDER_SEASON_ITEMS: &[&str] = &[
    "Windbreaker or rain jacket",
    "Warm mid-layer (fleece)",
];

const SUN_ITEMS: &[&str] = &["Sun hat", "Sunscreen", "Insect repellent"];

const TREKKING_ITEMS: &[&str] = &[
    "Sturdy trekking footwear",
    "Small daypack",
    "Headlamp or torch",
];

const OVERNIGHT_ITEMS: &[&str] = &["Change of clothes", "Indoor footwear"];

const CHILDREN_ITEMS: &[&str] = &[
    "Snacks and water for kids",
    "Children's first-aid kit, wet wipes",
];

/// Derive the packing checklist for a set of visits.
///
/// Seasons are the distinct non-year-round seasons among visited POIs,
/// falling back to the profile's preferred season when the visits are all
/// year-round. Winter gear wins over shoulder-season gear, which wins over
/// the sun kit. Duplicates keep their first occurrence.
#[must_use]
pub fn build_equipment<'a>(
    visits: impl IntoIterator<Item = &'a Visit>,
    profile: Option<&TravelerProfile>,
) -> Vec<String> {
    let mut seasons: HashSet<Season> = HashSet::new();
    let mut has_nature = false;
    let mut has_guesthouse = false;
    let mut has_hard = false;

    for visit in visits {
        let poi = &visit.poi;
        if poi.season != Season::YearRound {
            seasons.insert(poi.season);
        }
        if poi.category == PoiCategory::Nature {
            has_nature = true;
        }
        if poi.category == PoiCategory::Guesthouse {
            has_guesthouse = true;
        }
        if poi.physical_level == PhysicalTier::Hard {
            has_hard = true;
        }
    }

    if seasons.is_empty() {
        if let Some(p) = profile {
            seasons.insert(p.preferred_season);
        }
    }

    let mut items: Vec<&str> = BASE_ITEMS.to_vec();

    if seasons.contains(&Season::Winter) {
        items.extend(WINTER_ITEMS);
    } else if seasons.contains(&Season::Spring) || seasons.contains(&Season::Autumn) {
        items.extend(SHOULDER_SEASON_ITEMS);
    } else {
        items.extend(SUN_ITEMS);
    }

    if has_nature || has_hard {
        items.extend(TREKKING_ITEMS);
    }
    if has_guesthouse {
        items.extend(OVERNIGHT_ITEMS);
    }
    if profile.is_some_and(|p| p.with_children) {
        items.extend(CHILDREN_ITEMS);
    }

    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

/// Render a checklist as a bulleted list
#[must_use]
pub fn render_checklist(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Poi;

    fn visit_of(poi: Poi) -> Visit {
        Visit {
            id: poi.id,
            day_number: 1,
            order_index: 1,
            duration_hours: poi.visit_hours(),
            note: None,
            poi,
        }
    }

    fn count_matching(items: &[String], needle: &str) -> usize {
        items.iter().filter(|i| i.contains(needle)).count()
    }

    #[test]
    fn test_summer_nature_guesthouse_with_children() {
        let visits = vec![
            visit_of(Poi::new(1, "Taiga trail", PoiCategory::Nature).with_season(Season::Summer)),
            visit_of(
                Poi::new(2, "Yurt camp", PoiCategory::Guesthouse).with_season(Season::Summer),
            ),
        ];
        let profile = TravelerProfile {
            with_children: true,
            ..TravelerProfile::default()
        };

        let items = build_equipment(visits.iter(), Some(&profile));

        // exactly one of each situational group, plus the base items
        assert_eq!(count_matching(&items, "Sunscreen"), 1);
        assert_eq!(count_matching(&items, "trekking footwear"), 1);
        assert_eq!(count_matching(&items, "Indoor footwear"), 1);
        assert_eq!(count_matching(&items, "for kids"), 1);
        for base in BASE_ITEMS {
            assert_eq!(count_matching(&items, base), 1);
        }
        // no duplicates at all
        let unique: HashSet<&String> = items.iter().collect();
        assert_eq!(unique.len(), items.len());
    }

    #[test]
    fn test_winter_wins_over_other_seasons() {
        let visits = vec![
            visit_of(Poi::new(1, "Ski base", PoiCategory::Nature).with_season(Season::Winter)),
            visit_of(Poi::new(2, "Museum", PoiCategory::Museum).with_season(Season::Summer)),
        ];
        let items = build_equipment(visits.iter(), None);
        assert_eq!(count_matching(&items, "warm socks"), 1);
        assert_eq!(count_matching(&items, "Sunscreen"), 0);
    }

    #[test]
    fn test_shoulder_season_items() {
        let visits = vec![visit_of(
            Poi::new(1, "Larch valley", PoiCategory::Nature).with_season(Season::Autumn),
        )];
        let items = build_equipment(visits.iter(), None);
        assert_eq!(count_matching(&items, "rain jacket"), 1);
        assert_eq!(count_matching(&items, "Sunscreen"), 0);
    }

    #[test]
    fn test_falls_back_to_profile_season_when_all_year_round() {
        let visits = vec![visit_of(Poi::new(1, "Museum", PoiCategory::Museum))];
        let profile = TravelerProfile {
            preferred_season: Season::Winter,
            ..TravelerProfile::default()
        };
        let items = build_equipment(visits.iter(), Some(&profile));
        assert_eq!(count_matching(&items, "warm socks"), 1);
    }

    #[test]
    fn test_hard_visit_triggers_trekking_items() {
        let visits = vec![visit_of(
            Poi::new(1, "Summit", PoiCategory::Other).with_physical_level(PhysicalTier::Hard),
        )];
        let items = build_equipment(visits.iter(), None);
        assert_eq!(count_matching(&items, "Headlamp"), 1);
    }

    #[test]
    fn test_render_checklist_bullets() {
        let items = vec!["Water and snacks".to_string(), "Sun hat".to_string()];
        assert_eq!(render_checklist(&items), "• Water and snacks\n• Sun hat");
    }
}
