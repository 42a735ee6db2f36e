use super::app::{MakerApp, MenuPage};
use super::theme::{TRAIT_SELECTED_COLOR, color32};
use crate::parts::{NONE_LABEL, PartChoice};
use crate::traits::{TRAIT_NAMES, TraitVisual, paired_index};

use eframe::egui::{self, RichText, Ui};

impl MakerApp {
    pub fn display_page_creator(&mut self, ui: &mut Ui) {
        self.infotext.clear();
        egui::ScrollArea::vertical()
            .auto_shrink(false)
            .show(ui, |ui| {
                self.display_info_section(ui);
                ui.separator();
                self.display_traits_section(ui);
                ui.separator();
                self.display_appearance_section(ui);
                ui.separator();
                self.display_color_section(ui);
                ui.separator();
                self.display_finish_row(ui);
            });
    }

    fn display_info_section(&mut self, ui: &mut Ui) {
        ui.heading("Info");
        ui.horizontal(|ui| {
            ui.label("Name");
            let name_edit = ui.add(
                egui::TextEdit::singleline(&mut self.creature.name)
                    .desired_width(160.0)
                    .hint_text("Name"),
            );
            ui.label("Age");
            let age_edit = ui.add(
                egui::TextEdit::singleline(&mut self.creature.age)
                    .desired_width(80.0)
                    .hint_text("Age"),
            );
            if name_edit.hovered() || age_edit.hovered() {
                self.infotext =
                    "Both fields are required before the creature can be finished.".to_string();
            }
        });
    }

    fn display_traits_section(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Traits");
            ui.label(format!(
                "{} of {} chosen",
                self.creature.traits.selected().len(),
                self.creature.traits.quota()
            ));
        });

        // Opposing pairs sit side by side, one half of the catalog per column.
        let half = TRAIT_NAMES.len() / 2;
        ui.columns(2, |columns| {
            for row in 0..half {
                self.display_trait_toggle(&mut columns[0], row);
                self.display_trait_toggle(&mut columns[1], row + half);
            }
        });
    }

    fn display_trait_toggle(&mut self, ui: &mut Ui, index: usize) {
        let traits = &self.creature.traits;
        let mut on = traits.is_selected(index);
        let text = match traits.visual(index) {
            TraitVisual::Selected => RichText::new(TRAIT_NAMES[index]).color(TRAIT_SELECTED_COLOR),
            TraitVisual::Locked => {
                RichText::new(TRAIT_NAMES[index]).color(ui.visuals().weak_text_color())
            }
            TraitVisual::Default => RichText::new(TRAIT_NAMES[index]),
        };
        let interactable = traits.interactable(index);

        let response = ui.add_enabled(interactable, egui::Checkbox::new(&mut on, text));
        if response.clicked() {
            self.creature.traits.toggle(index);
        }
        if response.hovered() {
            self.infotext = format!(
                "Opposes {}. A toggle locks when its opposite is picked or the quota is full.",
                TRAIT_NAMES[paired_index(index, TRAIT_NAMES.len())]
            );
        }
    }

    fn display_appearance_section(&mut self, ui: &mut Ui) {
        ui.heading("Appearance");
        for category in 0..self.catalog.num_categories() {
            let variant_count = self.catalog.category(category).variants.len();
            // The dropdown row after the real variants is the "no part" pick.
            let mut selection = match self.creature.part_choices[category] {
                PartChoice::Chosen(variant) => variant,
                PartChoice::None => variant_count,
            };
            let previous = selection;

            ui.horizontal(|ui| {
                ui.label(&self.catalog.category(category).name);
                egui::ComboBox::from_id_salt(format!("part{category}"))
                    .width(160.0)
                    .show_index(ui, &mut selection, variant_count + 1, |i| {
                        if i < variant_count {
                            self.catalog.category(category).variants[i].name.clone()
                        } else {
                            NONE_LABEL.to_string()
                        }
                    });
            });

            if selection != previous {
                let choice = if selection < variant_count {
                    PartChoice::Chosen(selection)
                } else {
                    PartChoice::None
                };
                self.catalog.assign(&mut self.creature, category, choice);
            }
        }
    }

    fn display_color_section(&mut self, ui: &mut Ui) {
        ui.heading("Base Color");
        for (channel, label) in ["Red", "Green", "Blue"].iter().enumerate() {
            ui.add(egui::Slider::new(
                &mut self.creature.base_color[channel],
                0.0..=1.0,
            )
            .text(*label));
        }
        let (rect, _) = ui.allocate_exact_size(egui::vec2(64.0, 20.0), egui::Sense::hover());
        ui.painter().rect_filled(
            rect,
            egui::CornerRadius::same(4),
            color32(self.creature.base_color),
        );
    }

    fn display_finish_row(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("🎲 Randomize").clicked() {
                self.randomize_creature();
            }

            let valid = self.creature.is_valid();
            if ui
                .add_enabled(valid, egui::Button::new("Finish"))
                .clicked()
            {
                self.finalize_creature();
            }
            if !valid {
                ui.label(
                    RichText::new("Needs a name, an age, and a full set of traits.")
                        .color(ui.visuals().weak_text_color()),
                );
            }
        });
    }

    pub fn display_page_summary(&mut self, ui: &mut Ui) {
        ui.heading("All done!");
        ui.separator();

        let Some(saved_to) = &self.saved_to else {
            ui.label("Nothing has been finished yet. Head back to the creator.");
            if ui.button("Back to the creator").clicked() {
                self.cur_page = MenuPage::Creator;
            }
            return;
        };

        ui.label(format!(
            "{} was saved to {}.",
            self.creature.name,
            saved_to.display()
        ));

        if let Some(portrait) = &self.portrait_file {
            ui.add(
                egui::Image::new(format!("file://{}", portrait.display()))
                    .fit_to_exact_size(egui::vec2(220.0, 220.0))
                    .maintain_aspect_ratio(true),
            );
            ui.label(format!("Portrait exported to {}.", portrait.display()));
        }

        if ui.button("Keep editing").clicked() {
            self.cur_page = MenuPage::Creator;
        }
    }
}
