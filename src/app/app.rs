use std::path::PathBuf;

use super::config::*;
use crate::creature::Creature;
use crate::parts::{PartsCatalog, randomize_base_color};
use crate::paths::PATH_APP;
use crate::portrait;
use crate::util::*;

use eframe::egui;

#[derive(Eq, PartialEq)]
pub enum MenuPage {
    Creator,
    Summary,
}

pub struct MakerApp {
    pub options: MakerConfig,
    pub cur_page: MenuPage,
    pub infotext: String,

    pub catalog: PartsCatalog,
    pub creature: Creature,

    pub saved_to: Option<PathBuf>,
    pub portrait_file: Option<PathBuf>,
}

impl MakerApp {
    pub fn new(options: MakerConfig, catalog: PartsCatalog, mut creature: Creature) -> Self {
        // Materialize the live part instances for whatever the record says
        // before the first frame renders.
        catalog.apply_all(&mut creature);
        Self {
            options,
            cur_page: MenuPage::Creator,
            infotext: String::new(),
            catalog,
            creature,
            saved_to: None,
            portrait_file: None,
        }
    }

    pub fn creature_path() -> PathBuf {
        PATH_APP.join("creature.json")
    }

    /// Finishes the screen. Does nothing while the record is invalid; on
    /// success the creature is persisted, the portrait exported, and the
    /// summary page takes over.
    pub fn finalize_creature(&mut self) {
        if !self.creature.is_valid() {
            return;
        }

        let save_path = Self::creature_path();
        if let Err(err) = self.creature.save(&save_path) {
            println!("Couldn't save creature: {err}");
            msg("Error", &format!("Couldn't save creature: {err}"));
            return;
        }
        println!("[MONSTER MAKER] Saved creature to {}", save_path.display());
        self.saved_to = Some(save_path);

        if self.options.export_portrait {
            let portrait_path = PATH_APP.join("portrait.png");
            let layers = portrait::compose(&self.catalog, &self.creature, false);
            match portrait::export(&layers, &portrait_path) {
                Ok(()) => self.portrait_file = Some(portrait_path),
                Err(err) => {
                    println!("Couldn't export portrait: {err}");
                    msg("Error", &format!("Couldn't export portrait: {err}"));
                }
            }
        }

        let _ = save_cfg(&self.options);
        self.cur_page = MenuPage::Summary;
    }

    /// Rolls a fresh set of parts and a new tint for the whole card.
    pub fn randomize_creature(&mut self) {
        if !yesno(
            "Randomize?",
            "Replace the current parts and color with a random set?",
        ) {
            return;
        }
        let picks = self.catalog.randomize_selection();
        for (category, choice) in picks.into_iter().enumerate() {
            self.catalog.assign(&mut self.creature, category, choice);
        }
        self.creature.base_color = randomize_base_color();
    }
}

impl eframe::App for MakerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_nav_panel").show(ctx, |ui| {
            self.display_panel_top(ui);
        });

        self.display_panel_bottom(ctx);

        egui::SidePanel::right("portrait_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                self.display_panel_portrait(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.cur_page {
            MenuPage::Creator => self.display_page_creator(ui),
            MenuPage::Summary => self.display_page_summary(ui),
        });
    }
}
