use crate::item::ItemTemplate;
use crate::types::{EquipSlot, ItemKind};
use crate::RegistryError;
use serde::Deserialize;

/// TOML configuration for an item database file
#[derive(Debug, Deserialize)]
pub struct ItemFileConfig {
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
}

impl ItemFileConfig {
    /// Check every template in the file for internal consistency
    pub fn validate(&self) -> Result<(), RegistryError> {
        for template in &self.items {
            validate_template(template)?;
        }
        Ok(())
    }
}

/// Reject templates that could never be equipped or rolled sensibly
pub fn validate_template(template: &ItemTemplate) -> Result<(), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidTemplate {
        id: template.id,
        reason: reason.to_string(),
    };

    if template.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if template.stats.min_dmg > template.stats.max_dmg {
        return Err(invalid("min_dmg exceeds max_dmg"));
    }
    match (template.kind, template.slot) {
        (ItemKind::Weapon, Some(EquipSlot::MainHand | EquipSlot::OffHand | EquipSlot::Ranged)) => {}
        (ItemKind::Weapon, _) => return Err(invalid("weapons must use a hand or ranged slot")),
        (ItemKind::Misc, Some(_)) => return Err(invalid("misc items cannot be equipped")),
        (ItemKind::Armor | ItemKind::Jewelry, None) => {
            return Err(invalid("armor and jewelry need a slot"))
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_item() {
        let config: ItemFileConfig = toml::from_str(
            r#"
[[items]]
id = 9
name = "Pebble"
kind = "misc"
"#,
        )
        .unwrap();

        assert_eq!(config.items.len(), 1);
        let pebble = &config.items[0];
        assert_eq!(pebble.slot, None);
        assert_eq!(pebble.item_level, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weapon_without_hand_slot_rejected() {
        let config: ItemFileConfig = toml::from_str(
            r#"
[[items]]
id = 10
name = "Helmet Sword"
kind = "weapon"
slot = "head"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(RegistryError::InvalidTemplate { id: 10, .. })
        ));
    }

    #[test]
    fn test_inverted_damage_rejected() {
        let config: ItemFileConfig = toml::from_str(
            r#"
[[items]]
id = 11
name = "Backwards Blade"
kind = "weapon"
slot = "main_hand"
stats = { min_dmg = 10, max_dmg = 2 }
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
