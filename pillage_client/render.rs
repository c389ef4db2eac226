use std::fmt::Write;

use pillage_app::api::{VillageSummary, WorldMap};
use pillage_game::models::village::Village;

pub fn villages(list: &[VillageSummary]) -> String {
    if list.is_empty() {
        return "No villages.\n".to_string();
    }
    let mut out = String::new();
    for v in list {
        let _ = writeln!(out, "{:>6}  {}", v.village_id, v.name);
    }
    out
}

pub fn village(village: &Village) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", village.name, village.id);

    let stocks: Vec<String> = village
        .resources
        .iter()
        .map(|(kind, amount)| format!("{kind} {amount}"))
        .collect();
    let limit = village
        .resource_limit
        .map(|l| format!(" / {l}"))
        .unwrap_or_default();
    let _ = writeln!(out, "Resources: {}{limit}", stocks.join(", "));
    let _ = writeln!(
        out,
        "Population: {} free of {}",
        village.population_left, village.population
    );

    let _ = writeln!(out, "\nBuildings:");
    for b in &village.buildings {
        let state = if b.is_under_construction {
            " (under construction)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  [{}] {} lvl {} at {}{state}",
            b.building_id, b.name, b.level, b.position
        );

        let preview = b.next_level_preview();
        if let Some((kind, per_hour)) = preview.resources_per_hour {
            let _ = writeln!(out, "      lvl {}: {per_hour} {kind}/h", preview.level);
        }
        if let Some(capacity) = preview.population_capacity {
            let _ = writeln!(out, "      lvl {}: room for {capacity}", preview.level);
        }

        if b.name.is_production_building() {
            for unit in b.unlocked_units() {
                match village.unit_definition(unit) {
                    Some(data) => {
                        let max = village.max_trainable(data);
                        let _ = writeln!(
                            out,
                            "      trains {unit} (max {max}, {} each)",
                            data.production_time(1)
                        );
                    }
                    None => {
                        let _ = writeln!(out, "      trains {unit}");
                    }
                }
            }
        }
        if b.name.is_research_building() {
            match &b.current_research {
                Some(r) if b.is_research_in_progress => {
                    let left = b.research_time_left.unwrap_or_default();
                    let _ = writeln!(out, "      researching {} ({left} left)", r.research_name);
                }
                _ => {
                    let _ = writeln!(out, "      idle");
                }
            }
        }
    }

    let _ = writeln!(out, "\nUnits:");
    if village.units_in_village.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for (unit, amount) in &village.units_in_village {
        let _ = writeln!(out, "  {unit}: {amount}");
    }

    let free: Vec<String> = village
        .valid_build_positions
        .iter()
        .map(|bp| match bp.allowed_building {
            Some(kind) => format!("{} [{kind}]", bp.position),
            None => bp.position.to_string(),
        })
        .collect();
    let _ = writeln!(out, "\nFree tiles: {}", free.join(" "));

    out
}

pub fn world(map: &WorldMap) -> String {
    let mut out = String::new();
    for v in &map.villages {
        let position = v.position.map(|p| p.to_string()).unwrap_or_default();
        let owner = v.player_name.as_deref().unwrap_or("-");
        let _ = writeln!(out, "{:>6}  {:<20} {:<10} {owner}", v.village_id, v.name, position);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillage_game::test_utils::{
        BuildingFactoryOptions, IdSequence, UnitFactoryOptions, VillageFactoryOptions,
        building_factory, unit_factory, village_factory,
    };
    use pillage_types::{
        buildings::BuildingKind, common::ResourceGroup, map::Position, units::UnitName,
    };

    #[test]
    fn test_village_lists_trainable_units() {
        let mut ids = IdSequence::default();
        let barracks = building_factory(
            BuildingFactoryOptions {
                id: Some(7),
                kind: Some(BuildingKind::Barracks),
                level: Some(2),
                position: Some(Position::new(5, 5)),
                unlocked_units: vec![(unit_factory(UnitFactoryOptions::default()), 1)],
                ..Default::default()
            },
            &mut ids,
        );
        let birka = village_factory(
            VillageFactoryOptions {
                name: Some("Birka".to_string()),
                resources: Some(ResourceGroup::new(150, 0, 0, 45)),
                extra_buildings: vec![barracks],
                ..Default::default()
            },
            &mut ids,
        );

        let text = village(&birka);
        assert!(text.starts_with("Birka (#1)"));
        assert!(text.contains("Resources: Wood 150, Stone 0, Hop 0, Beer 45"));
        assert!(text.contains("[7] Barracks lvl 2 at (5, 5)"));
        assert!(text.contains("trains Spear (max 3, 00:00:10 each)"));
        assert!(text.contains(&format!("{}: 10", UnitName::Spear)));
    }

    #[test]
    fn test_empty_village_list() {
        assert_eq!(villages(&[]), "No villages.\n");
    }
}
