//=========================================================================
// Lumen Scene — Demo Binary
//
// Builds the engine, installs the showcase world (the train on its
// circular track, dinosaurs, floor, backpack and the tessellated patch)
// and runs until the window closes or Escape is pressed.
//
// Logging is controlled through RUST_LOG; try RUST_LOG=debug to watch
// actions and scene toggles, or RUST_LOG=trace for draw submissions.
//
//=========================================================================

use log::error;
use lumen_engine::EngineBuilder;

fn main() {
    env_logger::init();

    let result = EngineBuilder::new()
        .build()
        .init(|core| core.load_showcase())
        .run();

    if let Err(e) = result {
        error!("Fatal: {}", e);
        std::process::exit(1);
    }
}
