//! Scenario files: who fights, where they stand and what they carry
//!
//! ```json
//! {
//!   "name": "Training grounds",
//!   "seed": 7,
//!   "duration": 30.0,
//!   "party": [
//!     { "class": "warrior", "x": 100, "y": 300, "bag": [1, 103], "equip": [0] },
//!     { "class": "priest", "x": 50, "y": 400 }
//!   ],
//!   "enemies": [{ "class": "training_dummy", "x": 600, "y": 300 }],
//!   "player_target": 0
//! }
//! ```

use combat_core::unit::{Unit, UnitClass, BAG_SIZE};
use combat_core::{EquipError, UnitId, World, WorldError};
use item_core::{ItemRegistry, RegistryError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Error loading, validating or building a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Failed to parse scenario '{path}': {error}")]
    Parse {
        error: serde_json::Error,
        path: PathBuf,
    },
    #[error("Invalid scenario: {0}")]
    Invalid(String),
    #[error(transparent)]
    Item(#[from] RegistryError),
    #[error("Cannot equip {unit}'s bag slot {bag_index}: {error}")]
    Equip {
        unit: String,
        bag_index: usize,
        error: EquipError,
    },
    #[error(transparent)]
    World(#[from] WorldError),
}

/// One combatant in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub class: UnitClass,
    /// Top-left corner
    pub x: f64,
    pub y: f64,
    /// Item template ids placed in the bag, in order
    #[serde(default)]
    pub bag: Vec<u32>,
    /// Bag indices equipped before the fight starts
    #[serde(default)]
    pub equip: Vec<usize>,
}

impl UnitSpec {
    pub fn new(class: UnitClass, x: f64, y: f64) -> Self {
        UnitSpec {
            class,
            x,
            y,
            bag: Vec::new(),
            equip: Vec::new(),
        }
    }
}

/// A full skirmish setup loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub seed: u64,
    /// Simulated seconds to run
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Fixed tick length in seconds
    #[serde(default = "default_dt")]
    pub dt: f64,
    pub party: Vec<UnitSpec>,
    #[serde(default)]
    pub enemies: Vec<UnitSpec>,
    /// Index into `party` of the player-controlled unit
    #[serde(default)]
    pub player: usize,
    /// Index into `enemies` the player starts targeting
    #[serde(default)]
    pub player_target: Option<usize>,
    /// Point every enemy at the player before the first tick
    #[serde(default = "default_true")]
    pub enemies_target_player: bool,
}

fn default_name() -> String {
    "Skirmish".to_string()
}

fn default_duration() -> f64 {
    30.0
}

fn default_dt() -> f64 {
    1.0 / 60.0
}

fn default_true() -> bool {
    true
}

impl Scenario {
    /// Load and parse a scenario file. Call [`Scenario::validate`] before building.
    pub fn load_from_file(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path).map_err(|error| ScenarioError::Io {
            error,
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&contents).map_err(|error| ScenarioError::Parse {
            error,
            path: path.to_path_buf(),
        })
    }

    /// The training-ground demo: a five-class party against three dummies
    pub fn demo() -> Self {
        let mut warrior = UnitSpec::new(UnitClass::Warrior, 100.0, 300.0);
        // Worn Shortsword, Plate Helm, Tattered Shirt, Sword of Fortitude
        warrior.bag = vec![1, 103, 4, 101];
        warrior.equip = vec![1];

        Scenario {
            name: "Training grounds".to_string(),
            seed: 0,
            duration: default_duration(),
            dt: default_dt(),
            party: vec![
                warrior,
                UnitSpec::new(UnitClass::Mage, 50.0, 200.0),
                UnitSpec::new(UnitClass::Priest, 50.0, 400.0),
                UnitSpec::new(UnitClass::Rogue, 0.0, 300.0),
                UnitSpec::new(UnitClass::Hunter, 0.0, 250.0),
            ],
            enemies: vec![
                UnitSpec::new(UnitClass::TrainingDummy, 600.0, 200.0),
                UnitSpec::new(UnitClass::TrainingDummy, 650.0, 300.0),
                UnitSpec::new(UnitClass::TrainingDummy, 600.0, 400.0),
            ],
            player: 0,
            player_target: Some(1),
            enemies_target_player: true,
        }
    }

    /// Check the scenario against itself and the item database
    pub fn validate(&self, registry: &ItemRegistry) -> Result<(), ScenarioError> {
        if self.party.is_empty() {
            return Err(invalid("party must have at least one member"));
        }
        if self.player >= self.party.len() {
            return Err(invalid(format!(
                "player {} is out of range (party has {} members)",
                self.player,
                self.party.len()
            )));
        }
        if let Some(target) = self.player_target {
            if target >= self.enemies.len() {
                return Err(invalid(format!(
                    "player_target {} is out of range ({} enemies)",
                    target,
                    self.enemies.len()
                )));
            }
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(invalid("duration must be positive"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid("dt must be positive"));
        }

        for (index, entry) in self.party.iter().enumerate() {
            if entry.class == UnitClass::TrainingDummy {
                return Err(invalid(format!("party member {} is a training dummy", index)));
            }
        }

        for entry in self.party.iter().chain(self.enemies.iter()) {
            if entry.bag.len() > BAG_SIZE {
                return Err(invalid(format!(
                    "{} carries {} items (bag holds {})",
                    entry.class,
                    entry.bag.len(),
                    BAG_SIZE
                )));
            }
            if let Some(&id) = entry.bag.iter().find(|&&id| !registry.contains(id)) {
                return Err(ScenarioError::Item(RegistryError::UnknownItem(id)));
            }
            if let Some(&index) = entry.equip.iter().find(|&&i| i >= entry.bag.len()) {
                return Err(invalid(format!(
                    "{} equips bag slot {} but carries {} items",
                    entry.class,
                    index,
                    entry.bag.len()
                )));
            }
        }

        Ok(())
    }

    /// Build a ready-to-run world
    pub fn build(&self, registry: &ItemRegistry) -> Result<World, ScenarioError> {
        self.validate(registry)?;

        let mut world = World::new(self.seed);
        // Item uids come from their own stream so gear never shifts combat rolls
        let mut item_rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(1));

        let mut party = Vec::with_capacity(self.party.len());
        for entry in &self.party {
            let unit = spawn(entry, registry, &mut item_rng)?;
            party.push(world.add_party_member(unit));
        }
        let mut enemies = Vec::with_capacity(self.enemies.len());
        for entry in &self.enemies {
            let unit = spawn(entry, registry, &mut item_rng)?;
            enemies.push(world.add_enemy(unit));
        }

        let player = party[self.player];
        world.set_player(player)?;

        for (entry, &id) in self.party.iter().zip(&party).chain(self.enemies.iter().zip(&enemies)) {
            equip_all(&mut world, id, entry)?;
        }

        if let Some(target) = self.player_target {
            world.set_target(player, Some(enemies[target]))?;
        }
        if self.enemies_target_player {
            world.enemies_target_player();
        }

        info!(
            scenario = %self.name,
            party = party.len(),
            enemies = enemies.len(),
            seed = self.seed,
            "scenario built"
        );
        Ok(world)
    }
}

fn invalid(message: impl Into<String>) -> ScenarioError {
    ScenarioError::Invalid(message.into())
}

fn spawn(entry: &UnitSpec, registry: &ItemRegistry, rng: &mut ChaCha8Rng) -> Result<Unit, ScenarioError> {
    let mut unit = Unit::new(entry.class, entry.x, entry.y);
    for &id in &entry.bag {
        let item = registry.create(id, rng)?;
        unit.give_item(item).map_err(|error| ScenarioError::Equip {
            unit: unit.name.clone(),
            bag_index: unit.inventory.len(),
            error,
        })?;
    }
    Ok(unit)
}

fn equip_all(world: &mut World, id: UnitId, entry: &UnitSpec) -> Result<(), ScenarioError> {
    for &bag_index in &entry.equip {
        world.equip_from_bag(id, bag_index).map_err(|error| ScenarioError::Equip {
            unit: entry.class.to_string(),
            bag_index,
            error,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::EquipSlot;
    use std::io::Write;
    use tempfile::TempDir;

    fn setup() -> ItemRegistry {
        combat_core::config::ensure_constants_initialized();
        ItemRegistry::builtin()
    }

    #[test]
    fn test_demo_builds() {
        let registry = setup();
        let scenario = Scenario::demo();
        scenario.validate(&registry).unwrap();

        let world = scenario.build(&registry).unwrap();
        assert_eq!(world.party().len(), 5);
        assert_eq!(world.enemies().len(), 3);

        let player = world.player().unwrap();
        let warrior = world.unit(player).unwrap();
        assert_eq!(warrior.class, UnitClass::Warrior);
        assert_eq!(warrior.target, Some(world.enemies()[1]));
        assert!(warrior.equipment.get(EquipSlot::Head).is_some());

        for &enemy in world.enemies() {
            assert_eq!(world.unit(enemy).unwrap().target, Some(player));
        }
    }

    #[test]
    fn test_parse_applies_defaults() {
        let json = r#"{
            "party": [{ "class": "mage", "x": 10, "y": 20 }],
            "enemies": [{ "class": "training_dummy", "x": 300, "y": 20 }]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.name, "Skirmish");
        assert_eq!(scenario.duration, 30.0);
        assert_eq!(scenario.player, 0);
        assert!(scenario.enemies_target_player);
        assert!(scenario.party[0].bag.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("duel.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(&Scenario::demo()).unwrap().as_bytes())
            .unwrap();

        let loaded = Scenario::load_from_file(&path).unwrap();
        assert_eq!(loaded, Scenario::demo());
    }

    #[test]
    fn test_shipped_scenarios_validate() {
        let registry = setup();
        let demo: Scenario = serde_json::from_str(include_str!("../scenarios/demo.json")).unwrap();
        assert_eq!(demo, Scenario::demo());

        let duel: Scenario = serde_json::from_str(include_str!("../scenarios/duel.json")).unwrap();
        let world = duel.build(&registry).unwrap();
        let player = world.player().unwrap();
        assert_eq!(world.unit(player).unwrap().class, UnitClass::Priest);
    }

    #[test]
    fn test_missing_file() {
        let result = Scenario::load_from_file(Path::new("/nonexistent/scenario.json"));
        assert!(matches!(result, Err(ScenarioError::Io { .. })));
    }

    #[test]
    fn test_rejects_bad_indices() {
        let registry = setup();

        let mut scenario = Scenario::demo();
        scenario.player = 5;
        assert!(matches!(scenario.validate(&registry), Err(ScenarioError::Invalid(_))));

        let mut scenario = Scenario::demo();
        scenario.player_target = Some(3);
        assert!(matches!(scenario.validate(&registry), Err(ScenarioError::Invalid(_))));

        let mut scenario = Scenario::demo();
        scenario.party[0].equip = vec![9];
        assert!(matches!(scenario.validate(&registry), Err(ScenarioError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_item() {
        let registry = setup();
        let mut scenario = Scenario::demo();
        scenario.party[1].bag = vec![9999];
        assert!(matches!(
            scenario.validate(&registry),
            Err(ScenarioError::Item(RegistryError::UnknownItem(9999)))
        ));
    }

    #[test]
    fn test_rejects_dummy_in_party_and_bad_timing() {
        let registry = setup();

        let mut scenario = Scenario::demo();
        scenario.party.push(UnitSpec::new(UnitClass::TrainingDummy, 0.0, 0.0));
        assert!(scenario.validate(&registry).is_err());

        let mut scenario = Scenario::demo();
        scenario.dt = 0.0;
        assert!(scenario.validate(&registry).is_err());

        let mut scenario = Scenario::demo();
        scenario.duration = f64::NAN;
        assert!(scenario.validate(&registry).is_err());

        let mut scenario = Scenario::demo();
        scenario.party.clear();
        assert!(scenario.validate(&registry).is_err());
    }

    #[test]
    fn test_same_seed_same_items() {
        let registry = setup();
        let a = Scenario::demo().build(&registry).unwrap();
        let b = Scenario::demo().build(&registry).unwrap();
        let uid = |w: &World| {
            let player = w.player().unwrap();
            w.unit(player).unwrap().inventory.get(0).map(|item| item.uid)
        };
        assert_eq!(uid(&a), uid(&b));
    }
}
