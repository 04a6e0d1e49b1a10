use std::fmt::Write;

use crate::entity::NpcHandle;

/// Living NPCs, one info line each, then the total
pub fn survivors_report(npcs: &[NpcHandle]) -> String {
    let survivors: Vec<&NpcHandle> = npcs.iter().filter(|npc| npc.is_alive()).collect();

    let mut out = String::from("=== SURVIVORS ===\n");
    if survivors.is_empty() {
        out.push_str("No survivors!\n");
    } else {
        for npc in &survivors {
            let _ = writeln!(out, "  {}", npc.info());
        }
    }
    let _ = write!(out, "Total survivors: {}", survivors.len());
    out
}

/// Numbered list of every registered NPC
pub fn npc_listing(npcs: &[NpcHandle]) -> String {
    let mut out = format!("=== NPC List ({}) ===", npcs.len());
    if npcs.is_empty() {
        out.push_str("\n(empty)");
    }
    for (i, npc) in npcs.iter().enumerate() {
        let _ = write!(out, "\n{:>3}. {}", i + 1, npc.info());
    }
    out
}
