use crate::config::{validate_template, ItemFileConfig};
use crate::item::{Item, ItemTemplate};
use crate::{ConfigError, RegistryError};
use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_ITEMS: &str = include_str!("../data/items.toml");

/// Item database keyed by template id, loaded from TOML
#[derive(Debug, Default, Clone)]
pub struct ItemRegistry {
    templates: BTreeMap<u32, ItemTemplate>,
}

impl ItemRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in item database
    pub fn builtin() -> Self {
        // The embedded file is checked by `test_builtin_parses`
        Self::parse_toml(BUILTIN_ITEMS, Path::new("data/items.toml")).unwrap_or_default()
    }

    /// Load all item files from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Parse a single TOML document into a fresh registry
    pub fn parse_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.merge_toml(content, origin)?;
        Ok(registry)
    }

    /// Merge every `.toml` file under `dir` into this registry
    pub fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        // Later files override earlier ones, so keep the order stable
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single item file, adding or replacing its templates
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        self.merge_toml(&content, path)
    }

    fn merge_toml(&mut self, content: &str, origin: &Path) -> Result<(), ConfigError> {
        let config: ItemFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: origin.to_path_buf(),
        })?;

        config.validate().map_err(|e| ConfigError::Validation {
            message: e.to_string(),
            path: origin.to_path_buf(),
        })?;

        for template in config.items {
            self.templates.insert(template.id, template);
        }
        Ok(())
    }

    /// Add a single template after validating it
    pub fn insert(&mut self, template: ItemTemplate) -> Result<(), RegistryError> {
        validate_template(&template)?;
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Get a template by ID
    pub fn get(&self, id: u32) -> Option<&ItemTemplate> {
        self.templates.get(&id)
    }

    /// Check if a template exists
    pub fn contains(&self, id: u32) -> bool {
        self.templates.contains_key(&id)
    }

    /// All templates in id order
    pub fn templates(&self) -> impl Iterator<Item = &ItemTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Materialize a fresh item from the template with the given id
    pub fn create<R: Rng + ?Sized>(&self, id: u32, rng: &mut R) -> Result<Item, RegistryError> {
        let template = self.get(id).ok_or(RegistryError::UnknownItem(id))?;
        Ok(Item::with_uid(template, rng.gen()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EquipSlot, ItemKind, Rarity};
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(format!("{}.toml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_builtin_parses() {
        let registry = ItemRegistry::parse_toml(BUILTIN_ITEMS, Path::new("items.toml")).unwrap();
        assert_eq!(registry.len(), 17);
        assert_eq!(ItemRegistry::builtin().len(), 17);
    }

    #[test]
    fn test_builtin_contents() {
        let registry = ItemRegistry::builtin();

        let sword = registry.get(1).unwrap();
        assert_eq!(sword.name, "Worn Shortsword");
        assert_eq!(sword.kind, ItemKind::Weapon);
        assert_eq!(sword.slot, Some(EquipSlot::MainHand));
        assert_eq!(sword.stats.min_dmg, 5);
        assert_eq!(sword.stats.max_dmg, 10);

        let amulet = registry.get(204).unwrap();
        assert_eq!(amulet.slot, Some(EquipSlot::Neck));
        assert_eq!(amulet.rarity, Rarity::Rare);

        let thunderfury = registry.get(1001).unwrap();
        assert_eq!(thunderfury.rarity, Rarity::Legendary);
        assert_eq!(thunderfury.stats.agi, 30);
    }

    #[test]
    fn test_create_unknown_item() {
        let registry = ItemRegistry::builtin();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            registry.create(9999, &mut rng),
            Err(RegistryError::UnknownItem(9999))
        ));
    }

    #[test]
    fn test_create_copies_template() {
        let registry = ItemRegistry::builtin();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        let item = registry.create(101, &mut rng).unwrap();
        assert_eq!(item.template_id, 101);
        assert_eq!(item.name, "Sword of Fortitude");
        assert!(item.is_weapon());
    }

    #[test]
    fn test_load_directory_recursive() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        create_test_file(
            dir.path(),
            "base",
            r#"
[[items]]
id = 500
name = "Copper Band"
kind = "jewelry"
slot = "finger1"
stats = { sta = 1 }
"#,
        );
        create_test_file(
            &nested,
            "more",
            r#"
[[items]]
id = 501
name = "Iron Cleaver"
kind = "weapon"
slot = "main_hand"
stats = { min_dmg = 3, max_dmg = 9 }
"#,
        );
        create_test_file(dir.path(), "ignored", "");
        std::fs::write(dir.path().join("notes.txt"), "not an item file").unwrap();

        let registry = ItemRegistry::load(dir.path()).unwrap();
        assert!(registry.contains(500));
        assert!(registry.contains(501));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = ItemRegistry::load(&dir.path().join("nope")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "broken", "[[items]]\nid = \"abc\"\n");

        let err = ItemRegistry::load(dir.path()).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert!(path.ends_with("broken.toml")),
            other => panic!("Expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_validation_error() {
        let dir = TempDir::new().unwrap();
        create_test_file(
            dir.path(),
            "bad",
            r#"
[[items]]
id = 7
name = "Floating Ring"
kind = "jewelry"
"#,
        );

        assert!(matches!(
            ItemRegistry::load(dir.path()),
            Err(ConfigError::Validation { .. })
        ));
    }
}
