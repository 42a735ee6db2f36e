use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parts::{PartChoice, PartSlots, PartsCatalog, randomize_base_color};
use crate::traits::{TRAIT_NAMES, TraitState};

/// The character record being customized. Created once per session, mutated
/// by user input, and handed off intact when the screen is finalized. The
/// slot arena is runtime-only and gets rebuilt from the recorded choices.
pub struct Creature {
    pub name: String,
    pub age: String,
    pub traits: TraitState,
    pub base_color: [f32; 3],
    pub part_choices: Vec<PartChoice>,
    pub slots: PartSlots,
}

// On-disk shape of a saved creature. Every field is optional so a hand-edited
// or older file still loads; anything missing falls back to a sane default.
#[derive(Serialize, Deserialize, Default)]
struct SavedCreature {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    traits: Vec<usize>,
    #[serde(default = "default_base_color")]
    base_color: [f32; 3],
    #[serde(default)]
    part_choices: Vec<PartChoice>,
}

fn default_base_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Creature {
    /// A fresh creature with randomized parts and tint, used when no save
    /// exists yet so the preview never starts as a blank card.
    pub fn random(catalog: &PartsCatalog, quota: usize) -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            traits: TraitState::new(TRAIT_NAMES.len(), quota),
            base_color: randomize_base_color(),
            part_choices: catalog.randomize_selection(),
            slots: PartSlots::new(catalog.num_categories()),
        }
    }

    /// Reads a saved creature, reconciling it against the current catalog:
    /// trait indices are rebuilt through the selection rules, part picks that
    /// no longer exist collapse to "none", and the choice array is resized to
    /// the current category count.
    pub fn load(path: &Path, catalog: &PartsCatalog, quota: usize) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let saved: SavedCreature = serde_json::from_str(&text)?;

        let mut part_choices = saved.part_choices;
        part_choices.resize(catalog.num_categories(), PartChoice::None);
        for (category, choice) in part_choices.iter_mut().enumerate() {
            if let PartChoice::Chosen(variant) = choice {
                if *variant >= catalog.category(category).variants.len() {
                    *choice = PartChoice::None;
                }
            }
        }

        let mut base_color = saved.base_color;
        for channel in &mut base_color {
            *channel = channel.clamp(0.0, 1.0);
        }

        Ok(Self {
            name: saved.name,
            age: saved.age,
            traits: TraitState::from_saved(&saved.traits, TRAIT_NAMES.len(), quota),
            base_color,
            part_choices,
            slots: PartSlots::new(catalog.num_categories()),
        })
    }

    /// Loads the saved creature if one exists, otherwise rolls a random one.
    pub fn load_or_random(path: &Path, catalog: &PartsCatalog, quota: usize) -> Self {
        if !path.exists() {
            return Self::random(catalog, quota);
        }
        match Self::load(path, catalog, quota) {
            Ok(creature) => creature,
            Err(err) => {
                println!(
                    "[MONSTER MAKER] Couldn't read saved creature {}: {err}",
                    path.display()
                );
                Self::random(catalog, quota)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let saved = SavedCreature {
            name: self.name.clone(),
            age: self.age.clone(),
            traits: self.traits.selected().to_vec(),
            base_color: self.base_color,
            part_choices: self.part_choices.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&saved)?)?;
        Ok(())
    }

    /// Whether the record may leave the screen: name and age filled in and
    /// the trait quota fully used. Pure; the finish button renders from this.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.age.is_empty() && self.traits.quota_met()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::tests::fixture_catalog;

    #[test]
    fn validity_requires_name_age_and_full_traits() {
        let (_dir, catalog) = fixture_catalog();
        let mut creature = Creature::random(&catalog, 2);
        assert!(!creature.is_valid());

        creature.name = "Grub".to_string();
        creature.age = "7".to_string();
        assert!(!creature.is_valid());

        creature.traits.toggle(0);
        assert!(!creature.is_valid());
        creature.traits.toggle(1);
        assert!(creature.is_valid());

        creature.name.clear();
        assert!(!creature.is_valid());
    }

    #[test]
    fn save_and_load_round_trip() {
        let (_dir, catalog) = fixture_catalog();
        let store = tempfile::tempdir().unwrap();
        let path = store.path().join("creature.json");

        let mut creature = Creature::random(&catalog, 4);
        creature.name = "Fizz".to_string();
        creature.age = "12".to_string();
        creature.traits.toggle(3);
        creature.base_color = [0.25, 0.5, 0.75];
        catalog.assign(&mut creature, 0, PartChoice::Chosen(1));
        catalog.assign(&mut creature, 1, PartChoice::None);
        creature.save(&path).unwrap();

        let loaded = Creature::load(&path, &catalog, 4).unwrap();
        assert_eq!(loaded.name, "Fizz");
        assert_eq!(loaded.age, "12");
        assert_eq!(loaded.traits.selected(), &[3]);
        assert_eq!(loaded.base_color, [0.25, 0.5, 0.75]);
        assert_eq!(loaded.part_choices[0], PartChoice::Chosen(1));
        assert_eq!(loaded.part_choices[1], PartChoice::None);
    }

    #[test]
    fn load_reconciles_stale_saves() {
        let (_dir, catalog) = fixture_catalog();
        let store = tempfile::tempdir().unwrap();
        let path = store.path().join("creature.json");

        // A file from an older install: too few part entries, a variant that
        // no longer exists, an impossible trait list, and a blown-out tint.
        fs::write(
            &path,
            r#"{
                "name": "Mold",
                "traits": [0, 8, 1, 2, 3, 4],
                "base_color": [2.0, -1.0, 0.5],
                "part_choices": [{"Chosen": 99}]
            }"#,
        )
        .unwrap();

        let loaded = Creature::load(&path, &catalog, 4).unwrap();
        assert_eq!(loaded.age, "");
        // 8 opposes 0 and is dropped; the quota caps the rest at four.
        assert_eq!(loaded.traits.selected(), &[0, 1, 2, 3]);
        assert_eq!(loaded.base_color, [1.0, 0.0, 0.5]);
        assert_eq!(loaded.part_choices.len(), catalog.num_categories());
        assert_eq!(loaded.part_choices[0], PartChoice::None);
        assert_eq!(loaded.part_choices[1], PartChoice::None);
    }

    #[test]
    fn missing_save_rolls_a_random_creature() {
        let (_dir, catalog) = fixture_catalog();
        let store = tempfile::tempdir().unwrap();

        let creature = Creature::load_or_random(&store.path().join("absent.json"), &catalog, 4);
        assert_eq!(creature.part_choices.len(), catalog.num_categories());
        assert!(!creature.is_valid());
    }
}
