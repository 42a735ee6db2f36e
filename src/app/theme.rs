use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};

/// Trait toggles the player has picked light up in this warm gold.
pub const TRAIT_SELECTED_COLOR: Color32 = Color32::from_rgb(255, 203, 107);

/// Converts the creature's normalized base color into an egui tint.
pub fn color32(channels: [f32; 3]) -> Color32 {
    Color32::from_rgb(
        (channels[0] * 255.0).round() as u8,
        (channels[1] * 255.0).round() as u8,
        (channels[2] * 255.0).round() as u8,
    )
}

/// Applies a dark laboratory theme so the creature card and its tinted
/// sprites stay the brightest things on screen.
pub fn apply_monster_maker_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = Color32::from_rgb(24, 18, 30);
    visuals.panel_fill = Color32::from_rgb(29, 22, 37);
    visuals.extreme_bg_color = Color32::from_rgb(19, 14, 24);
    visuals.hyperlink_color = Color32::from_rgb(197, 160, 255);

    // A violet accent for interactive states.
    let accent = Color32::from_rgb(138, 94, 201);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(43, 33, 55);
    visuals.widgets.inactive.bg_stroke.color = Color32::from_rgba_premultiplied(138, 94, 201, 64);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(56, 43, 72);
    visuals.widgets.hovered.bg_stroke.color = Color32::from_rgba_premultiplied(197, 160, 255, 160);
    visuals.widgets.active.bg_fill = Color32::from_rgb(84, 60, 120);
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke.color = Color32::from_rgb(221, 197, 255);

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.slider_width = 180.0;

    style.text_styles.insert(
        TextStyle::Heading,
        FontId::new(24.0, FontFamily::Proportional),
    );
    style
        .text_styles
        .insert(TextStyle::Body, FontId::new(16.0, FontFamily::Proportional));
    style.text_styles.insert(
        TextStyle::Button,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style
        .text_styles
        .insert(TextStyle::Small, FontId::new(13.0, FontFamily::Proportional));

    ctx.set_style(style);
}
