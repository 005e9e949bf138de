use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};
use sdl2::rect::Rect;
use serde::{Deserialize, Serialize};

use crate::{atlas::Tile, geometry::Geometry, grid::LampGrid, screenshot};

/// The window surface the renderer paints on.
pub trait Screen {
    /// Copies the atlas image for `tile` onto `dst`.
    fn blit(&mut self, tile: Tile, dst: Rect) -> Result<()>;
    /// Pushes the given regions of the surface to the display.
    fn update_rects(&mut self, rects: &[Rect]) -> Result<()>;
    /// Pushes the whole surface to the display.
    fn update_all(&mut self) -> Result<()>;
    /// Writes the whole surface to an image file.
    fn save(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaintStrategy {
    /// Repaint and update every cell on every pass.
    Full,
    /// Repaint only cells in the change tracker.
    #[default]
    Incremental,
}

/// Owns the grid and the screen. Construction paints the whole grid, so a
/// `Renderer` that exists has always been painted at least once.
pub struct Renderer<S: Screen> {
    grid: LampGrid,
    geometry: Geometry,
    screen: S,
    strategy: RepaintStrategy,
}

impl<S: Screen> Renderer<S> {
    pub fn new(
        grid: LampGrid,
        geometry: Geometry,
        screen: S,
        strategy: RepaintStrategy,
    ) -> Result<Self> {
        let mut renderer = Self {
            grid,
            geometry,
            screen,
            strategy,
        };
        renderer.repaint_all()?;
        info!(
            "painted {}x{} lamps ({:?} repaint)",
            renderer.grid.width(),
            renderer.grid.height(),
            strategy
        );
        Ok(renderer)
    }

    pub fn grid(&self) -> &LampGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut LampGrid {
        &mut self.grid
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Brings the screen up to date with the grid.
    pub fn push_buffer(&mut self) -> Result<()> {
        match self.strategy {
            RepaintStrategy::Full => self.repaint_all(),
            RepaintStrategy::Incremental => self.repaint_changed(),
        }
    }

    fn repaint_all(&mut self) -> Result<()> {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let tile = Tile::from(self.grid.lamp(x, y));
                for rect in self.geometry.cell_rects(x, y) {
                    self.screen.blit(tile, rect)?;
                }
            }
        }
        self.screen.update_all()?;
        self.grid.commit_all();
        Ok(())
    }

    fn repaint_changed(&mut self) -> Result<()> {
        let changes = self.grid.changes();
        if changes.is_empty() {
            return Ok(());
        }

        let per_cell = (self.geometry.lamps_per_pixel() as usize).pow(2);
        let mut touched = Vec::with_capacity(changes.len() * per_cell);
        for (x, y) in changes.iter() {
            let tile = Tile::from(self.grid.lamp(x, y));
            for rect in self.geometry.cell_rects(x, y) {
                self.screen.blit(tile, rect)?;
                touched.push(rect);
            }
        }
        self.screen.update_rects(&touched)?;
        debug!("repainted {} lamps", changes.len());
        self.grid.commit();
        Ok(())
    }

    /// Pushes the whole surface again without repainting, e.g. after the
    /// window was uncovered.
    pub fn refresh(&mut self) -> Result<()> {
        self.screen.update_all()
    }

    /// Saves the current surface under `dir`, creating it if needed.
    pub fn screenshot(&self, dir: &Path) -> Result<PathBuf> {
        let path = screenshot::prepare_path(dir, chrono::Local::now())?;
        self.screen.save(&path)?;
        info!("Screenshot saved as: {}", path.display());
        Ok(path)
    }
}
