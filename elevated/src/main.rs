mod scene;

use anyhow::Result;
use backend::config::Config;
use backend::system::System;
use log::{error, info};
use scene::{setup_scene, Scene};

fn run() -> Result<()> {
    let cfg = Config::from_env()?;
    let mut system = System::new(&cfg)?;

    let scene = Scene::load()?;
    setup_scene(&cfg);

    let mut frames = 0u64;
    loop {
        if !system.process_io_events() {
            break;
        }
        system.clear_screen();
        scene.draw();
        system.draw_to_screen();
        frames += 1;
    }
    info!("closing after {frames} frames");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}
