use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::LampGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    #[default]
    Random,
    Bounce,
}

/// Drives the grid once per frame.
pub enum Demo {
    /// Lights one random lamp and darkens another every tick.
    Random,
    /// A single lit lamp moving diagonally and bouncing off the edges.
    Bounce { x: i32, y: i32, dx: i32, dy: i32 },
}

impl Demo {
    pub fn new(kind: DemoKind) -> Self {
        match kind {
            DemoKind::Random => Demo::Random,
            DemoKind::Bounce => Demo::Bounce {
                x: 0,
                y: 0,
                dx: 1,
                dy: 1,
            },
        }
    }

    pub fn step<R: Rng>(&mut self, grid: &mut LampGrid, rng: &mut R) {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        match self {
            Demo::Random => {
                grid.set(rng.gen_range(0..width), rng.gen_range(0..height), true);
                grid.set(rng.gen_range(0..width), rng.gen_range(0..height), false);
            }
            Demo::Bounce { x, y, dx, dy } => {
                grid.clear();
                *x += *dx;
                *y += *dy;
                // Overshoots one frame past an edge; the write is dropped.
                grid.set(*x, *y, true);
                if *x < 0 || *x >= width {
                    *dx = -*dx;
                    *x = (*x + *dx).clamp(0, width - 1);
                }
                if *y < 0 || *y >= height {
                    *dy = -*dy;
                    *y = (*y + *dy).clamp(0, height - 1);
                }
            }
        }
    }
}
