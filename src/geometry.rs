use std::{fmt, str::FromStr};

use anyhow::bail;
use sdl2::rect::Rect;
use serde::{Deserialize, Serialize};

/// Which screen row logical row 0 lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Origin {
    TopLeft,
    BottomLeft,
}

impl FromStr for Origin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TL" | "TOPLEFT" => Ok(Origin::TopLeft),
            "BL" | "BOTTOMLEFT" => Ok(Origin::BottomLeft),
            _ => bail!("origin {:?} is not either 'TL' or 'BL'", s),
        }
    }
}

impl TryFrom<String> for Origin {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.to_string()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::TopLeft => write!(f, "TL"),
            Origin::BottomLeft => write!(f, "BL"),
        }
    }
}

/// Maps logical cells to window pixels.
///
/// Every cell covers `lamps_per_pixel`² atlas tiles. Tile edges are placed at
/// `round(k * tile_size * scale)` for global tile index `k`, so neighbouring
/// rectangles always share an edge, fractional scales included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    width: usize,
    height: usize,
    origin: Origin,
    lamps_per_pixel: u32,
    tile_size: u32,
    scale: f64,
}

impl Geometry {
    pub fn new(
        width: usize,
        height: usize,
        origin: Origin,
        lamps_per_pixel: u32,
        tile_size: u32,
        scale: f64,
    ) -> Self {
        Self {
            width,
            height,
            origin,
            lamps_per_pixel,
            tile_size,
            scale,
        }
    }

    pub fn lamps_per_pixel(&self) -> u32 {
        self.lamps_per_pixel
    }

    /// Side of one atlas tile in (possibly fractional) screen pixels.
    pub fn tile_side(&self) -> f64 {
        self.tile_size as f64 * self.scale
    }

    /// Side the atlas images are scaled to once at load time.
    pub fn atlas_side(&self) -> u32 {
        self.tile_side().round().max(1.0) as u32
    }

    /// `y` must be below the grid height.
    pub fn screen_row(&self, y: usize) -> usize {
        debug_assert!(y < self.height, "row {} outside a {}-row grid", y, self.height);
        match self.origin {
            Origin::BottomLeft => self.height - 1 - y,
            Origin::TopLeft => y,
        }
    }

    fn edge(&self, tile: usize) -> i32 {
        (tile as f64 * self.tile_side()).round() as i32
    }

    fn span(&self, tile: usize) -> (i32, u32) {
        let start = self.edge(tile);
        (start, (self.edge(tile + 1) - start) as u32)
    }

    /// Window size in pixels needed to show the whole grid.
    pub fn surface_size(&self) -> (u32, u32) {
        let r = self.lamps_per_pixel as usize;
        (
            self.edge(self.width * r) as u32,
            self.edge(self.height * r) as u32,
        )
    }

    /// Destination rectangles of cell `(x, y)`, one per replicated tile,
    /// row by row from the top-left sub-tile.
    pub fn cell_rects(&self, x: usize, y: usize) -> impl Iterator<Item = Rect> + '_ {
        let r = self.lamps_per_pixel as usize;
        let first_col = x * r;
        let first_row = self.screen_row(y) * r;
        (0..r).flat_map(move |j| {
            let (top, h) = self.span(first_row + j);
            (0..r).map(move |i| {
                let (left, w) = self.span(first_col + i);
                Rect::new(left, top, w, h)
            })
        })
    }
}
