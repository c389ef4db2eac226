use std::{collections::BTreeMap, str::FromStr};

use clap::{Parser, Subcommand};

use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::VillageId,
    research::ResearchName,
    units::UnitName,
};

/// Command-line client for a Pint & Pillage game server.
///
/// The server address and token come from `PILLAGE_API_URL` and
/// `PILLAGE_API_TOKEN` (a `.env` file is read too).
#[derive(Parser, Debug)]
#[command(name = "pillage", version)]
pub struct Cli {
    /// Village to act on. Defaults to `PILLAGE_VILLAGE_ID`, then to the
    /// first village of the session.
    #[arg(long, short = 'v', global = true)]
    pub village: Option<VillageId>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// List the villages of the session
    Villages,
    /// Show the village: stocks, buildings, units and what can be trained
    Show,
    /// Place a new building on a free tile
    Build {
        kind: BuildingKind,
        x: i32,
        y: i32,
    },
    /// Raise a building by one level
    LevelUp { building_id: BuildingId },
    /// Train units in a production building
    Train {
        building_id: BuildingId,
        unit: UnitName,
        amount: u32,
    },
    /// Start a research in a research building
    Research {
        building_id: BuildingId,
        research: ResearchName,
    },
    /// Show the world map villages
    World,
    /// Send units against another village, e.g. `attack 12 Spear=10 Axe=2`
    Attack {
        target: VillageId,
        #[arg(required = true, value_parser = parse_unit_amount)]
        units: Vec<(UnitName, u32)>,
    },
}

/// Parses `Unit=amount`.
pub fn parse_unit_amount(s: &str) -> Result<(UnitName, u32), String> {
    let (unit, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected UNIT=AMOUNT, got {s:?}"))?;
    let unit = UnitName::from_str(unit.trim()).map_err(|_| format!("unknown unit {unit:?}"))?;
    let amount = amount
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid amount {amount:?}"))?;
    Ok((unit, amount))
}

/// Merges repeated units into one amount each.
pub fn units_to_send(pairs: &[(UnitName, u32)]) -> BTreeMap<UnitName, u32> {
    let mut units = BTreeMap::new();
    for (unit, amount) in pairs {
        let total = units.entry(*unit).or_insert(0u32);
        *total = total.saturating_add(*amount);
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_amount() {
        assert_eq!(parse_unit_amount("Spear=10"), Ok((UnitName::Spear, 10)));
        assert_eq!(
            parse_unit_amount(" BattleShip = 2 "),
            Ok((UnitName::BattleShip, 2))
        );
        assert!(parse_unit_amount("Spear").is_err());
        assert!(parse_unit_amount("Catapult=1").is_err());
        assert!(parse_unit_amount("Spear=-1").is_err());
    }

    #[test]
    fn test_units_to_send_sums_repeats() {
        let units = units_to_send(&[(UnitName::Spear, 3), (UnitName::Axe, 1), (UnitName::Spear, 2)]);
        assert_eq!(units, BTreeMap::from([(UnitName::Spear, 5), (UnitName::Axe, 1)]));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["pillage", "-v", "3", "build", "Tavern", "2", "4"]).unwrap();
        assert_eq!(cli.village, Some(3));
        assert_eq!(
            cli.command,
            CliCommand::Build {
                kind: BuildingKind::Tavern,
                x: 2,
                y: 4,
            }
        );

        let cli = Cli::try_parse_from(["pillage", "attack", "9", "Spear=4"]).unwrap();
        assert_eq!(
            cli.command,
            CliCommand::Attack {
                target: 9,
                units: vec![(UnitName::Spear, 4)],
            }
        );

        assert!(Cli::try_parse_from(["pillage", "train", "1", "Dragon", "1"]).is_err());
        assert!(Cli::try_parse_from(["pillage", "attack", "9"]).is_err());
    }
}
