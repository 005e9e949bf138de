use std::path::Path;

use anyhow::{anyhow, Context, Result};
use sdl2::{
    event::{Event, WindowEvent},
    image::{InitFlag, SaveSurface, Sdl2ImageContext},
    keyboard::Keycode,
    rect::Rect,
    video::Window,
    EventPump, Sdl,
};

use crate::{
    atlas::{Tile, TileAtlas},
    renderer::Screen,
};

/// What the frame loop should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    Screenshot,
    /// The window was uncovered and needs its surface pushed again.
    Exposed,
}

fn input_for(event: &Event) -> Option<Input> {
    match event {
        Event::Quit { .. }
        | Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => Some(Input::Quit),
        Event::KeyDown {
            keycode: Some(Keycode::S),
            ..
        } => Some(Input::Screenshot),
        Event::Window {
            win_event: WindowEvent::Exposed,
            ..
        } => Some(Input::Exposed),
        _ => None,
    }
}

/// The SDL window and its software surface.
pub struct SdlScreen {
    window: Window,
    event_pump: EventPump,
    atlas: TileAtlas,
    _image: Sdl2ImageContext,
    _sdl: Sdl,
}

impl SdlScreen {
    pub fn open(
        title: &str,
        (width, height): (u32, u32),
        pack: &Path,
        tile_side: u32,
    ) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let image_context = sdl2::image::init(InitFlag::PNG).map_err(|e| anyhow!(e))?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .context("failed to create window")?;
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
        let atlas = TileAtlas::load(pack, tile_side)?;
        log::info!("opened {}x{} window", width, height);

        Ok(Self {
            window,
            event_pump,
            atlas,
            _image: image_context,
            _sdl: sdl_context,
        })
    }

    /// Drains pending events without waiting for new ones.
    pub fn poll(&mut self) -> Vec<Input> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| input_for(&event))
            .collect()
    }
}

impl Screen for SdlScreen {
    fn blit(&mut self, tile: Tile, dst: Rect) -> Result<()> {
        let mut surface = self.window.surface(&self.event_pump).map_err(|e| anyhow!(e))?;
        self.atlas
            .tile(tile)
            .blit_scaled(None, &mut surface, dst)
            .map_err(|e| anyhow!(e))?;
        Ok(())
    }

    fn update_rects(&mut self, rects: &[Rect]) -> Result<()> {
        let surface = self.window.surface(&self.event_pump).map_err(|e| anyhow!(e))?;
        surface.update_window_rects(rects).map_err(|e| anyhow!(e))
    }

    fn update_all(&mut self) -> Result<()> {
        let surface = self.window.surface(&self.event_pump).map_err(|e| anyhow!(e))?;
        surface.update_window().map_err(|e| anyhow!(e))
    }

    fn save(&self, path: &Path) -> Result<()> {
        let surface = self.window.surface(&self.event_pump).map_err(|e| anyhow!(e))?;
        let copy = surface
            .convert(&surface.pixel_format())
            .map_err(|e| anyhow!(e))?;
        copy.save(path)
            .map_err(|e| anyhow!("failed to save {}: {}", path.display(), e))
    }
}
