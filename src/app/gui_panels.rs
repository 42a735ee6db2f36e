use super::app::{MakerApp, MenuPage};
use super::theme::color32;
use crate::traits::TRAIT_NAMES;

use eframe::egui::{self, RichText, Ui};

impl MakerApp {
    pub fn display_panel_top(&mut self, ui: &mut Ui) {
        egui::Frame::new()
            .fill(ui.visuals().panel_fill)
            .inner_margin(egui::Margin::symmetric(16, 10))
            .show(ui, |bar| {
                bar.horizontal(|row| {
                    row.label(
                        RichText::new("Monster Maker")
                            .heading()
                            .color(row.visuals().strong_text_color()),
                    );
                    row.separator();
                    row.selectable_value(&mut self.cur_page, MenuPage::Creator, "Creator");
                    row.selectable_value(&mut self.cur_page, MenuPage::Summary, "Summary");

                    row.with_layout(egui::Layout::right_to_left(egui::Align::Center), |right| {
                        if right.button("Quit").clicked() {
                            right.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                        right.label(
                            RichText::new(format!("v{}", env!("CARGO_PKG_VERSION"))).small(),
                        );
                    });
                });
            });
    }

    pub fn display_panel_bottom(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("info_panel")
            .exact_height(56.0)
            .show(ctx, |ui| {
                if self.infotext.is_empty() {
                    self.infotext = match self.cur_page {
                        MenuPage::Creator => {
                            "Fill in the card, pick traits, and dress up the creature. Finish unlocks once everything is set.".to_string()
                        }
                        MenuPage::Summary => "The finished creature has been saved.".to_string(),
                    };
                }
                ui.label(&self.infotext);
            });
    }

    /// Live preview of the creature card: tinted base sprites underneath, the
    /// slot arena's part instances stacked on top, redrawn from the record
    /// every frame.
    pub fn display_panel_portrait(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.heading("Portrait");
        ui.separator();

        let name = if self.creature.name.is_empty() {
            "???"
        } else {
            self.creature.name.as_str()
        };
        let age = if self.creature.age.is_empty() {
            "?"
        } else {
            self.creature.age.as_str()
        };
        ui.label(RichText::new(format!("{name}, {age}")).strong());

        let side = ui.available_width().min(240.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
        ui.painter().rect_filled(
            rect,
            egui::CornerRadius::same(8),
            ui.visuals().extreme_bg_color,
        );
        let card = rect.shrink(8.0);

        let base_tint = color32(self.creature.base_color);
        for sprite in &self.catalog.base_sprites {
            egui::Image::new(format!("file://{}", sprite.display()))
                .tint(base_tint)
                .paint_at(ui, card);
        }
        for category in 0..self.creature.slots.len() {
            if let Some(instance) = self.creature.slots.get(category) {
                egui::Image::new(format!("file://{}", instance.sprite.display()))
                    .paint_at(ui, card);
            }
        }

        ui.add_space(4.0);
        for &index in self.creature.traits.selected() {
            ui.label(TRAIT_NAMES[index]);
        }
        ui.separator();
        for category in 0..self.creature.slots.len() {
            if let Some(instance) = self.creature.slots.get(category) {
                let label = format!(
                    "{}: {}",
                    self.catalog.category(instance.category).name,
                    self.catalog.category(instance.category).variants[instance.variant].name
                );
                ui.label(RichText::new(label).small());
            }
        }
    }
}
