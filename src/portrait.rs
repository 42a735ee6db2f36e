use std::error::Error;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage, imageops};

use crate::creature::Creature;
use crate::parts::{PartChoice, PartsCatalog};

/// Where a layer hangs in the portrait hierarchy. `Base` layers always carry
/// the creature's base tint; `Figure` layers only when composition says so.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    Figure,
    Base,
}

/// One sprite in the composed portrait, bottom-up draw order.
#[derive(Clone, Debug)]
pub struct PortraitLayer {
    pub sprite: PathBuf,
    pub attachment: Attachment,
    pub tint: Option<[f32; 3]>,
}

/// Builds the draw list for a creature portrait: base sprites first, then one
/// layer per chosen category in catalog order. The head is special-cased:
/// with `move_head` it joins the base group (and picks up the base tint with
/// it), otherwise it is tinted directly. Returns a fresh list every call, so
/// recomposing can never duplicate layers.
pub fn compose(catalog: &PartsCatalog, creature: &Creature, move_head: bool) -> Vec<PortraitLayer> {
    let mut layers: Vec<PortraitLayer> = catalog
        .base_sprites
        .iter()
        .map(|sprite| PortraitLayer {
            sprite: sprite.clone(),
            attachment: Attachment::Base,
            tint: None,
        })
        .collect();

    for (index, category) in catalog.categories.iter().enumerate() {
        let PartChoice::Chosen(variant) = creature.part_choices[index] else {
            continue;
        };

        let mut attachment = Attachment::Figure;
        let mut tint = None;
        if catalog.head_category == Some(index) {
            if move_head {
                attachment = Attachment::Base;
            } else {
                tint = Some(creature.base_color);
            }
        }

        layers.push(PortraitLayer {
            sprite: category.variants[variant].path.clone(),
            attachment,
            tint,
        });
    }

    // Everything hanging under the base group gets the base tint, including a
    // head that was just moved there.
    for layer in &mut layers {
        if layer.attachment == Attachment::Base {
            layer.tint = Some(creature.base_color);
        }
    }

    layers
}

/// Flattens the layer list into a single PNG. Sprites are tinted with a
/// per-channel multiply, centered, and stacked bottom-up onto a canvas sized
/// to the largest sprite.
pub fn export(layers: &[PortraitLayer], out: &Path) -> Result<(), Box<dyn Error>> {
    if layers.is_empty() {
        return Err("nothing to export".into());
    }

    let mut decoded: Vec<(RgbaImage, Option<[f32; 3]>)> = Vec::new();
    for layer in layers {
        let sprite = image::open(&layer.sprite)?.to_rgba8();
        decoded.push((sprite, layer.tint));
    }

    let width = decoded.iter().map(|(img, _)| img.width()).max().unwrap_or(1);
    let height = decoded.iter().map(|(img, _)| img.height()).max().unwrap_or(1);
    let mut canvas = RgbaImage::new(width, height);

    for (mut sprite, tint) in decoded {
        if let Some(tint) = tint {
            apply_tint(&mut sprite, tint);
        }
        let x = (width - sprite.width()) / 2;
        let y = (height - sprite.height()) / 2;
        imageops::overlay(&mut canvas, &sprite, x as i64, y as i64);
    }

    canvas.save(out)?;
    println!("[MONSTER MAKER] Exported portrait to {}", out.display());
    Ok(())
}

fn apply_tint(sprite: &mut RgbaImage, tint: [f32; 3]) {
    for pixel in sprite.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([
            (r as f32 * tint[0]).round() as u8,
            (g as f32 * tint[1]).round() as u8,
            (b as f32 * tint[2]).round() as u8,
            a,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use crate::parts::tests::fixture_catalog;

    fn creature_with(catalog: &PartsCatalog, picks: &[PartChoice]) -> Creature {
        let mut creature = Creature::random(catalog, 4);
        for (category, &choice) in picks.iter().enumerate() {
            catalog.assign(&mut creature, category, choice);
        }
        creature.base_color = [0.5, 1.0, 0.0];
        creature
    }

    #[test]
    fn compose_layers_base_first_and_skips_none() {
        let (_dir, catalog) = fixture_catalog();
        let creature = creature_with(
            &catalog,
            &[PartChoice::Chosen(0), PartChoice::None, PartChoice::None],
        );

        let layers = compose(&catalog, &creature, false);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].attachment, Attachment::Base);
        assert_eq!(layers[0].tint, Some([0.5, 1.0, 0.0]));
        assert_eq!(layers[1].attachment, Attachment::Figure);
        assert_eq!(layers[1].tint, None);
    }

    #[test]
    fn head_is_tinted_or_moved_to_base() {
        let (_dir, catalog) = fixture_catalog();
        let creature = creature_with(
            &catalog,
            &[PartChoice::None, PartChoice::Chosen(1), PartChoice::None],
        );

        let tinted = compose(&catalog, &creature, false);
        let head = tinted.last().unwrap();
        assert_eq!(head.attachment, Attachment::Figure);
        assert_eq!(head.tint, Some([0.5, 1.0, 0.0]));

        let moved = compose(&catalog, &creature, true);
        let head = moved.last().unwrap();
        assert_eq!(head.attachment, Attachment::Base);
        // The base pass tints the moved head along with the rest of the group.
        assert_eq!(head.tint, Some([0.5, 1.0, 0.0]));
    }

    #[test]
    fn recomposing_never_duplicates_layers() {
        let (_dir, catalog) = fixture_catalog();
        let creature = creature_with(
            &catalog,
            &[
                PartChoice::Chosen(0),
                PartChoice::Chosen(0),
                PartChoice::None,
            ],
        );

        let first = compose(&catalog, &creature, false).len();
        let second = compose(&catalog, &creature, false).len();
        assert_eq!(first, second);
    }

    #[test]
    fn export_flattens_layers_with_tint() {
        let sprites = tempfile::tempdir().unwrap();
        let white = sprites.path().join("white.png");
        RgbaImage::from_pixel(4, 4, Rgba([200, 200, 200, 255]))
            .save(&white)
            .unwrap();

        let layers = vec![PortraitLayer {
            sprite: white,
            attachment: Attachment::Base,
            tint: Some([0.5, 1.0, 0.0]),
        }];

        let out = sprites.path().join("portrait.png");
        export(&layers, &out).unwrap();

        let flattened = image::open(&out).unwrap().to_rgba8();
        assert_eq!(flattened.dimensions(), (4, 4));
        let pixel = flattened.get_pixel(1, 1);
        assert_eq!(pixel[0], 100);
        assert_eq!(pixel[1], 200);
        assert_eq!(pixel[2], 0);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn export_with_no_layers_is_an_error() {
        let out = std::env::temp_dir().join("never-written.png");
        assert!(export(&[], &out).is_err());
    }
}
