use std::path::Path;

use anyhow::{anyhow, Result};
use sdl2::{image::LoadSurface, pixels::PixelFormatEnum, render::BlendMode, surface::Surface};

pub const LAMP_OFF_TEXTURE: &str = "redstone_lamp.png";
pub const LAMP_ON_TEXTURE: &str = "redstone_lamp_on.png";

/// Visual state of one replicated tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Off,
    On,
}

impl From<bool> for Tile {
    fn from(lit: bool) -> Self {
        if lit {
            Tile::On
        } else {
            Tile::Off
        }
    }
}

/// The two lamp images, scaled once to the on-screen tile side.
pub struct TileAtlas {
    off: Surface<'static>,
    on: Surface<'static>,
}

impl TileAtlas {
    pub fn load(pack: &Path, side: u32) -> Result<Self> {
        Ok(Self {
            off: load_scaled(&pack.join(LAMP_OFF_TEXTURE), side)?,
            on: load_scaled(&pack.join(LAMP_ON_TEXTURE), side)?,
        })
    }

    pub fn tile(&self, tile: Tile) -> &Surface<'static> {
        match tile {
            Tile::Off => &self.off,
            Tile::On => &self.on,
        }
    }
}

fn load_scaled(path: &Path, side: u32) -> Result<Surface<'static>> {
    let mut image: Surface<'static> = Surface::from_file(path)
        .map_err(|e| anyhow!("failed to load texture {}: {}", path.display(), e))?;
    // Copy the pixels as-is, alpha included.
    image.set_blend_mode(BlendMode::None).map_err(|e| anyhow!(e))?;

    let mut scaled = Surface::new(side, side, PixelFormatEnum::RGBA8888).map_err(|e| anyhow!(e))?;
    image
        .blit_scaled(None, &mut scaled, None)
        .map_err(|e| anyhow!("failed to scale texture {}: {}", path.display(), e))?;
    scaled.set_blend_mode(BlendMode::None).map_err(|e| anyhow!(e))?;
    log::debug!("loaded {} at {}x{}", path.display(), side, side);
    Ok(scaled)
}
