//! ASCII map of the simulation grid

use std::fmt::Write;

use crate::core::types::{MAP_HEIGHT, MAP_WIDTH};
use crate::entity::NpcHandle;
use crate::render::{collect_markers, Marker};

const EMPTY: char = '.';

/// Render the 100 x 100 grid.
///
/// Living NPCs are drawn with their species symbol; the first NPC on a cell
/// wins. NPCs outside the grid (editor coordinates) are counted but not
/// drawn.
pub fn render_map(npcs: &[NpcHandle], elapsed_secs: u64) -> String {
    let mut markers = Vec::with_capacity(npcs.len());
    collect_markers(npcs, &mut markers);
    render_markers(&markers, elapsed_secs)
}

pub fn render_markers(markers: &[Marker], elapsed_secs: u64) -> String {
    let width = MAP_WIDTH as usize;
    let height = MAP_HEIGHT as usize;
    let mut grid = vec![EMPTY; width * height];

    for marker in markers.iter().filter(|m| m.alive) {
        let (x, y) = (marker.position.x, marker.position.y);
        if !(0..MAP_WIDTH).contains(&x) || !(0..MAP_HEIGHT).contains(&y) {
            continue;
        }
        let cell = &mut grid[y as usize * width + x as usize];
        if *cell == EMPTY {
            *cell = marker.species.symbol();
        }
    }

    let alive = markers.iter().filter(|m| m.alive).count();
    let dead = markers.len() - alive;
    let rule = "=".repeat(width);

    let mut out = String::with_capacity((width + 1) * (height + 6));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "MAP (time: {elapsed_secs}s)");
    let _ = writeln!(out, "{rule}");
    for row in grid.chunks(width) {
        out.extend(row.iter());
        out.push('\n');
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Alive: {alive} | Dead: {dead} | Total: {}", markers.len());
    let _ = write!(out, "{rule}");
    out
}
