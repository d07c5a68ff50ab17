//! Built-in level: the default map and its ten waves.
//!
//! The road enters at the bottom right of the 12x12 board, winds up the
//! map and ends at the castle in the top-left corner.

use glam::DVec2;

use rampart_core::level::{LevelDefinition, WaveRow};
use rampart_core::types::CellCoord;

/// The default level.
pub fn default_level() -> LevelDefinition {
    LevelDefinition {
        name: "Greenmarch".to_string(),
        path: vec![
            DVec2::new(736.0, 704.0),
            DVec2::new(416.0, 704.0),
            DVec2::new(416.0, 480.0),
            DVec2::new(160.0, 480.0),
            DVec2::new(160.0, 288.0),
            DVec2::new(544.0, 288.0),
            DVec2::new(544.0, 160.0),
            DVec2::new(224.0, 160.0),
            DVec2::new(224.0, 32.0),
        ],
        waves: default_waves(),
        castle_cells: vec![CellCoord::new(2, 0), CellCoord::new(3, 0)],
        safe_zone: (0..2)
            .flat_map(|row| (0..6).map(move |column| CellCoord::new(column, row)))
            .collect(),
    }
}

/// Ten waves with escalating composition.
fn default_waves() -> Vec<WaveRow> {
    let mut rows = Vec::new();

    // Wave 1: goblins only
    burst(&mut rows, 1, "goblin", 6, 0.0, 1.0);
    // Wave 2: a rat swarm behind two goblins
    burst(&mut rows, 2, "goblin", 2, 0.0, 1.0);
    burst(&mut rows, 2, "rat", 8, 2.0, 0.6);
    // Wave 3: wolves
    burst(&mut rows, 3, "goblin", 4, 0.0, 0.8);
    burst(&mut rows, 3, "wolf", 5, 3.0, 1.2);
    // Wave 4: first mages, who shoot down stones
    burst(&mut rows, 4, "goblin", 6, 0.0, 0.8);
    burst(&mut rows, 4, "mage", 2, 2.5, 2.0);
    // Wave 5: shielded knights
    burst(&mut rows, 5, "rat", 6, 0.0, 0.5);
    burst(&mut rows, 5, "knight", 3, 2.0, 2.0);
    // Wave 6: the first ogre
    burst(&mut rows, 6, "wolf", 5, 0.0, 1.0);
    burst(&mut rows, 6, "ogre", 1, 6.0, 0.0);
    // Wave 7
    burst(&mut rows, 7, "goblin", 4, 0.0, 0.7);
    burst(&mut rows, 7, "knight", 4, 2.0, 1.5);
    burst(&mut rows, 7, "mage", 2, 4.0, 2.0);
    // Wave 8
    burst(&mut rows, 8, "rat", 10, 0.0, 0.4);
    burst(&mut rows, 8, "ogre", 2, 4.0, 3.0);
    // Wave 9
    burst(&mut rows, 9, "wolf", 6, 0.0, 0.8);
    burst(&mut rows, 9, "knight", 5, 3.0, 1.2);
    burst(&mut rows, 9, "mage", 3, 5.0, 1.5);
    // Wave 10: everything
    burst(&mut rows, 10, "wolf", 4, 0.0, 0.8);
    burst(&mut rows, 10, "knight", 4, 2.0, 1.2);
    burst(&mut rows, 10, "mage", 3, 4.0, 1.5);
    burst(&mut rows, 10, "ogre", 3, 6.0, 3.0);

    rows
}

/// `count` enemies of one kind, `interval` seconds apart from `start`.
fn burst(rows: &mut Vec<WaveRow>, wave: u32, enemy: &str, count: u32, start: f64, interval: f64) {
    for i in 0..count {
        rows.push(WaveRow {
            enemy: enemy.to_string(),
            wave,
            spawn_delay_secs: start + interval * i as f64,
        });
    }
}
