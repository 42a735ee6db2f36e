use std::error::Error;
use std::path::{Path, PathBuf};

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::creature::Creature;

/// Label shown for the dropdown row after the real variants.
pub const NONE_LABEL: &str = "None";

const SPRITE_EXT: &str = "png";
// Reserved folder holding the always-present tintable base sprites.
const BASE_DIR_NAME: &str = "base";
// The head category gets special treatment during portrait composition.
const HEAD_CATEGORY_NAME: &str = "head";

#[derive(Clone, Debug)]
pub struct PartVariant {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct PartCategory {
    pub name: String,
    pub variants: Vec<PartVariant>,
}

/// The static library of body-part sprites, loaded once at startup and
/// read-only afterwards. Each subdirectory of the parts folder is one
/// category; its `.png` files (sorted by name) are the selectable variants.
#[derive(Clone, Debug)]
pub struct PartsCatalog {
    pub categories: Vec<PartCategory>,
    pub base_sprites: Vec<PathBuf>,
    pub head_category: Option<usize>,
}

/// A creature's pick for one category. "No part" is an explicit value rather
/// than an out-of-range index, so readers never have to bounds-check stored
/// selections against the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartChoice {
    Chosen(usize),
    None,
}

/// One live sprite occupying a category slot on the creature card.
#[derive(Clone, Debug)]
pub struct PartInstance {
    pub category: usize,
    pub variant: usize,
    pub sprite: PathBuf,
}

/// Fixed arena of category slots, each owning at most one live instance.
#[derive(Clone, Debug, Default)]
pub struct PartSlots {
    slots: Vec<Option<PartInstance>>,
}

impl PartSlots {
    pub fn new(categories: usize) -> Self {
        Self {
            slots: vec![None; categories],
        }
    }

    /// Swaps in the new occupant for a slot. The previous instance is always
    /// dropped first, including when the replacement is `None`, so repeated
    /// reassignment can never stack two instances in one slot.
    pub fn replace(&mut self, slot: usize, instance: Option<PartInstance>) {
        self.slots[slot] = instance;
    }

    pub fn get(&self, slot: usize) -> Option<&PartInstance> {
        self.slots[slot].as_ref()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl PartsCatalog {
    /// Scans the parts folder once at startup. An unreadable root directory is
    /// a startup failure the caller treats as fatal; individual unreadable
    /// entries are skipped like any other non-sprite file.
    pub fn load(dir: &Path) -> Result<Self, Box<dyn Error>> {
        let mut categories: Vec<PartCategory> = Vec::new();
        let mut base_sprites: Vec<PathBuf> = Vec::new();

        for entry_result in std::fs::read_dir(dir)? {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(_) => continue,
            };
            if !file_type.is_dir() {
                continue;
            }
            let name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => continue,
            };
            let variants = scan_sprites(&entry.path());
            if name.eq_ignore_ascii_case(BASE_DIR_NAME) {
                base_sprites = variants.into_iter().map(|v| v.path).collect();
                continue;
            }
            categories.push(PartCategory { name, variants });
        }

        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        let head_category = categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(HEAD_CATEGORY_NAME));

        println!(
            "[MONSTER MAKER] Loaded {} part categories from {}",
            categories.len(),
            dir.display()
        );

        Ok(Self {
            categories,
            base_sprites,
            head_category,
        })
    }

    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, index: usize) -> &PartCategory {
        &self.categories[index]
    }

    /// Replaces the creature's part in one category slot. The slot's previous
    /// instance is released unconditionally, then a new one is materialized
    /// only for an in-range pick; the recorded choice is sanitized so the
    /// selection array never holds an index the catalog can't render.
    pub fn assign(&self, creature: &mut Creature, category: usize, choice: PartChoice) {
        assert!(category < self.categories.len(), "part category out of range");

        let (sanitized, instance) = match choice {
            PartChoice::Chosen(variant) if variant < self.categories[category].variants.len() => (
                PartChoice::Chosen(variant),
                Some(PartInstance {
                    category,
                    variant,
                    sprite: self.categories[category].variants[variant].path.clone(),
                }),
            ),
            _ => (PartChoice::None, None),
        };

        creature.slots.replace(category, instance);
        creature.part_choices[category] = sanitized;
    }

    /// Materializes slot instances for every recorded choice. Used when a
    /// saved creature enters the screen and after a bulk randomize.
    pub fn apply_all(&self, creature: &mut Creature) {
        for category in 0..self.categories.len() {
            let choice = creature.part_choices[category];
            self.assign(creature, category, choice);
        }
    }

    /// Picks one uniformly random real variant per category; the "none" row is
    /// never rolled. A category with no sprites on disk yields no part.
    pub fn randomize_selection(&self) -> Vec<PartChoice> {
        let mut rng = rand::rng();
        self.categories
            .iter()
            .map(|category| {
                if category.variants.is_empty() {
                    PartChoice::None
                } else {
                    PartChoice::Chosen(rng.random_range(0..category.variants.len()))
                }
            })
            .collect()
    }
}

/// A uniformly random base tint at full opacity.
pub fn randomize_base_color() -> [f32; 3] {
    let mut rng = rand::rng();
    [rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()]
}

// Collects the sprite files of one category folder, sorted by name so the
// dropdown order is stable across platforms.
fn scan_sprites(dir: &Path) -> Vec<PartVariant> {
    let mut out: Vec<PartVariant> = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return out,
    };

    for entry_result in entries {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        if !file_type.is_file() {
            continue;
        }
        let path = entry.path();
        let is_sprite = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(SPRITE_EXT))
            .unwrap_or(false);
        if !is_sprite {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        out.push(PartVariant { name, path });
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::creature::Creature;
    use std::fs;

    pub(crate) fn fixture_catalog() -> (tempfile::TempDir, PartsCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let tree: &[(&str, &[&str])] = &[
            ("body", &["round.png", "square.png", "tall.png"]),
            ("head", &["halo.png", "horns.png"]),
            ("tail", &[]),
            ("base", &["card.png"]),
        ];
        for (category, files) in tree {
            let path = dir.path().join(category);
            fs::create_dir_all(&path).unwrap();
            for file in *files {
                fs::write(path.join(file), b"not a real sprite").unwrap();
            }
        }
        // A stray file at the top level must not become a category.
        fs::write(dir.path().join("readme.txt"), b"notes").unwrap();

        let catalog = PartsCatalog::load(dir.path()).unwrap();
        (dir, catalog)
    }

    #[test]
    fn load_discovers_categories_and_reserves_base() {
        let (_dir, catalog) = fixture_catalog();

        let names: Vec<&str> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["body", "head", "tail"]);
        assert_eq!(catalog.head_category, Some(1));
        assert_eq!(catalog.base_sprites.len(), 1);

        // Variants come back sorted by file name.
        let heads: Vec<&str> = catalog.categories[1]
            .variants
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(heads, vec!["halo", "horns"]);
    }

    #[test]
    fn load_fails_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        assert!(PartsCatalog::load(&missing).is_err());
    }

    #[test]
    fn assign_replaces_the_previous_instance() {
        let (_dir, catalog) = fixture_catalog();
        let mut creature = Creature::random(&catalog, 4);

        catalog.assign(&mut creature, 0, PartChoice::Chosen(0));
        catalog.assign(&mut creature, 0, PartChoice::Chosen(2));

        let instance = creature.slots.get(0).unwrap();
        assert_eq!(instance.variant, 2);
        assert_eq!(creature.part_choices[0], PartChoice::Chosen(2));
    }

    #[test]
    fn assign_none_clears_the_slot() {
        let (_dir, catalog) = fixture_catalog();
        let mut creature = Creature::random(&catalog, 4);

        catalog.assign(&mut creature, 0, PartChoice::Chosen(1));
        catalog.assign(&mut creature, 0, PartChoice::None);

        assert!(creature.slots.get(0).is_none());
        assert_eq!(creature.part_choices[0], PartChoice::None);
    }

    #[test]
    fn assign_sanitizes_out_of_range_picks() {
        let (_dir, catalog) = fixture_catalog();
        let mut creature = Creature::random(&catalog, 4);

        // The "none" dropdown row sits at the variant count; anything at or
        // past it must record as an explicit no-part.
        catalog.assign(&mut creature, 0, PartChoice::Chosen(3));

        assert!(creature.slots.get(0).is_none());
        assert_eq!(creature.part_choices[0], PartChoice::None);

        catalog.assign(&mut creature, 0, PartChoice::Chosen(1));
        let instance = creature.slots.get(0).unwrap();
        assert_eq!(instance.variant, 1);
    }

    #[test]
    fn randomize_selection_stays_in_range() {
        let (_dir, catalog) = fixture_catalog();

        for _ in 0..64 {
            let picks = catalog.randomize_selection();
            assert_eq!(picks.len(), catalog.num_categories());
            for (i, pick) in picks.iter().enumerate() {
                match pick {
                    PartChoice::Chosen(v) => assert!(*v < catalog.category(i).variants.len()),
                    PartChoice::None => assert!(catalog.category(i).variants.is_empty()),
                }
            }
        }
    }

    #[test]
    fn randomized_base_color_is_normalized() {
        for _ in 0..64 {
            let color = randomize_base_color();
            for channel in color {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }
}
