mod app;
mod creature;
mod parts;
mod paths;
mod portrait;
mod traits;
mod util;

use std::path::PathBuf;

use crate::app::*;
use crate::creature::Creature;
use crate::parts::PartsCatalog;
use crate::paths::*;

fn main() -> eframe::Result {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        std::process::exit(0);
    }

    let fullscreen = args.iter().any(|arg| arg == "--fullscreen");

    let mut parts_override: Option<PathBuf> = None;
    if let Some(parts_index) = args.iter().position(|arg| arg == "--parts") {
        if let Some(next_arg) = args.get(parts_index + 1) {
            parts_override = Some(PathBuf::from(next_arg));
        } else {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }

    let options = load_cfg();

    let parts_dir = parts_override
        .or_else(|| options.parts_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PATH_PARTS.clone());

    std::fs::create_dir_all(&*PATH_APP).expect("Failed to create data directory");
    std::fs::create_dir_all(&parts_dir).expect("Failed to create parts directory");

    println!("\n[MONSTER MAKER] starting...\n");

    // The sprite library is a startup precondition; without it there is
    // nothing to customize.
    let catalog = match PartsCatalog::load(&parts_dir) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!(
                "[MONSTER MAKER] Couldn't read the parts library at {}: {err}",
                parts_dir.display()
            );
            std::process::exit(1);
        }
    };

    let creature = Creature::load_or_random(&MakerApp::creature_path(), &catalog, options.max_traits);

    let mut native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 640.0])
            .with_min_inner_size([760.0, 480.0])
            .with_fullscreen(fullscreen),
        ..Default::default()
    };
    native_options.vsync = true;

    eframe::run_native(
        "Monster Maker",
        native_options,
        Box::new(move |cc| {
            // This gives us image support for the part sprites:
            egui_extras::install_image_loaders(&cc.egui_ctx);
            apply_monster_maker_theme(&cc.egui_ctx);
            Ok(Box::new(MakerApp::new(options, catalog, creature)))
        }),
    )
}

static USAGE_TEXT: &str = r#"
Usage: monster-maker [OPTIONS]

Options:
    --parts <dir>    Load the body-part sprite library from the given directory.
    --fullscreen     Start the window in fullscreen mode
"#;
