use std::{thread, time::Duration};

use anyhow::Result;
use log::info;

use lamp_display::{
    config::Config,
    demo::Demo,
    grid::LampGrid,
    renderer::Renderer,
    window::{Input, SdlScreen},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = Config::from_env()?;
    info!("{:?}", config);

    let geometry = config.geometry();
    let screen = SdlScreen::open(
        &config.title,
        geometry.surface_size(),
        &config.texture_pack,
        geometry.atlas_side(),
    )?;
    let mut renderer = Renderer::new(
        LampGrid::new(config.width, config.height),
        geometry,
        screen,
        config.repaint,
    )?;

    let mut demo = Demo::new(config.demo);
    let mut rng = rand::thread_rng();
    let frame_delay = Duration::from_millis(config.frame_delay_ms);

    'running: loop {
        for input in renderer.screen_mut().poll() {
            match input {
                Input::Quit => break 'running,
                Input::Screenshot => {
                    renderer.screenshot(&config.screenshot_dir)?;
                }
                Input::Exposed => renderer.refresh()?,
            }
        }

        demo.step(renderer.grid_mut(), &mut rng);
        renderer.push_buffer()?;

        if !frame_delay.is_zero() {
            thread::sleep(frame_delay);
        }
    }

    info!("window closed");
    Ok(())
}
