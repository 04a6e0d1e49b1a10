//! Roster file format
//!
//! ```text
//! 2
//! dragon 10 20 "Smaug"
//! frog 3 4 "Kermit"
//! ```
//!
//! The first line holds the number of entries that follow. Each entry is
//! `<species> <x> <y> "<name>"`. Only living NPCs are written. Names end
//! at the next `"`, so the factory refuses names containing one.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::core::error::{ArenaError, Result};
use crate::core::types::Position;
use crate::entity::{NpcHandle, Species};
use crate::factory::NpcFactory;

/// One parsed roster line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub species: Species,
    pub position: Position,
    pub name: String,
}

impl RosterEntry {
    pub fn from_npc(npc: &NpcHandle) -> Self {
        Self {
            species: npc.species(),
            position: npc.position(),
            name: npc.name().to_string(),
        }
    }

    /// Serialized form, without the trailing newline
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} \"{}\"",
            self.species, self.position.x, self.position.y, self.name
        )
    }
}

/// Parse one entry line. `line_no` is only used for error reporting.
pub fn parse_entry(line: &str, line_no: usize) -> Result<RosterEntry> {
    let bad = |reason: &str| ArenaError::Roster {
        line: line_no,
        reason: reason.to_string(),
    };

    let mut rest = line.trim();
    let species: Species = next_token(&mut rest)
        .ok_or_else(|| bad("missing species"))?
        .parse()?;
    let x = next_token(&mut rest)
        .ok_or_else(|| bad("missing x"))?
        .parse::<i32>()
        .map_err(|e| bad(&format!("bad x coordinate: {e}")))?;
    let y = next_token(&mut rest)
        .ok_or_else(|| bad("missing y"))?
        .parse::<i32>()
        .map_err(|e| bad(&format!("bad y coordinate: {e}")))?;

    let quoted = rest
        .trim_start()
        .strip_prefix('"')
        .ok_or_else(|| bad("name must be quoted"))?;
    let close = quoted.find('"').ok_or_else(|| bad("unterminated name"))?;

    Ok(RosterEntry {
        species,
        position: Position::new(x, y),
        name: quoted[..close].to_string(),
    })
}

/// Split the next whitespace-delimited token off the front of `rest`
fn next_token<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    let (token, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(token)
}

/// Parse a whole roster.
///
/// A missing or unparsable count header is an error. Entry lines that fail
/// to parse are skipped with a warning. At most `count` non-blank entry lines
/// are read.
pub fn parse_roster(content: &str) -> Result<Vec<RosterEntry>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_no, header) = lines.next().ok_or_else(|| ArenaError::Roster {
        line: 1,
        reason: "missing count header".to_string(),
    })?;
    let count: usize = header.trim().parse().map_err(|e| ArenaError::Roster {
        line: header_no,
        reason: format!("bad count header: {e}"),
    })?;

    // The header is untrusted; `take(count)` is the only budget.
    let mut entries = Vec::new();
    for (line_no, line) in lines.take(count) {
        match parse_entry(line, line_no) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!("Skipping roster entry: {}", e),
        }
    }
    if entries.len() < count {
        tracing::warn!(expected = count, loaded = entries.len(), "Roster shorter than its header");
    }
    Ok(entries)
}

/// Read a roster and rebuild its NPCs through `factory`.
///
/// Never fails: read or header errors are logged and yield no NPCs.
pub fn load<R: Read>(mut reader: R, factory: &mut NpcFactory) -> Vec<NpcHandle> {
    let mut content = String::new();
    if let Err(e) = reader.read_to_string(&mut content) {
        tracing::warn!("Failed to read roster: {}", e);
        return Vec::new();
    }
    match parse_roster(&content) {
        Ok(entries) => entries.iter().map(|entry| factory.restore(entry)).collect(),
        Err(e) => {
            tracing::warn!("Failed to parse roster: {}", e);
            Vec::new()
        }
    }
}

/// Write the living NPCs of `npcs`; returns how many were written
pub fn save<W: Write>(mut writer: W, npcs: &[NpcHandle]) -> Result<usize> {
    let living: Vec<RosterEntry> = npcs
        .iter()
        .filter(|npc| npc.is_alive())
        .map(RosterEntry::from_npc)
        .collect();

    writeln!(writer, "{}", living.len())?;
    for entry in &living {
        writeln!(writer, "{}", entry.to_line())?;
    }
    writer.flush()?;
    Ok(living.len())
}

pub fn load_file(path: &Path, factory: &mut NpcFactory) -> Vec<NpcHandle> {
    match File::open(path) {
        Ok(file) => load(file, factory),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Cannot open roster: {}", e);
            Vec::new()
        }
    }
}

pub fn save_file(path: &Path, npcs: &[NpcHandle]) -> Result<usize> {
    let file = File::create(path)?;
    save(BufWriter::new(file), npcs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Bounds;
    use crate::entity::Npc;

    #[test]
    fn test_parse_entry_with_spaces_in_name() {
        let entry = parse_entry("dragon 10 20 \"Old Smaug\"", 2).unwrap();
        assert_eq!(entry.species, Species::Dragon);
        assert_eq!(entry.position, Position::new(10, 20));
        assert_eq!(entry.name, "Old Smaug");
    }

    #[test]
    fn test_parse_entry_rejections() {
        assert!(matches!(
            parse_entry("wolf 1 2 \"x\"", 3),
            Err(ArenaError::UnknownSpecies(_))
        ));
        assert!(matches!(
            parse_entry("frog one 2 \"x\"", 4),
            Err(ArenaError::Roster { line: 4, .. })
        ));
        assert!(parse_entry("frog 1 2 x", 5).is_err());
        assert!(parse_entry("frog 1 2 \"x", 6).is_err());
        assert!(parse_entry("frog 1", 7).is_err());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let roster = "2\nfrog 1 1 \"a\"\nnonsense\nbull 2 2 \"b\"\n";
        let entries = parse_roster(roster).unwrap();
        // The header budget covers the bad line too.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a");

        let roster = "2\n\nfrog 1 1 \"a\"\n\nbull 2 2 \"b\"\nbull 3 3 \"extra\"\n";
        let names: Vec<String> = parse_roster(roster).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_bad_header_degrades_to_empty() {
        let mut factory = NpcFactory::default();
        assert!(load("many\nfrog 1 1 \"a\"\n".as_bytes(), &mut factory).is_empty());
        assert!(load("".as_bytes(), &mut factory).is_empty());
    }

    #[test]
    fn test_huge_count_header_reads_what_is_there() {
        let mut factory = NpcFactory::default();
        let npcs = load("18446744073709551615\nfrog 1 1 \"a\"\n".as_bytes(), &mut factory);
        assert_eq!(npcs.len(), 1);
        assert_eq!(npcs[0].name(), "a");

        let npcs = load("1000000000000\n".as_bytes(), &mut NpcFactory::default());
        assert!(npcs.is_empty());
    }

    #[test]
    fn test_save_writes_only_living() {
        let alive = Npc::spawn(Species::Bull, "Ferdinand", Position::new(7, 8), 0);
        let dead = Npc::spawn(Species::Frog, "Croaked", Position::new(1, 1), 0);
        dead.kill();

        let mut out = Vec::new();
        assert_eq!(save(&mut out, &[alive, dead]).unwrap(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "1\nbull 7 8 \"Ferdinand\"\n");
    }

    #[test]
    fn test_load_bypasses_bounds() {
        let mut factory = NpcFactory::new(Bounds::SIMULATION);
        let npcs = load("1\ndragon 450 450 \"Far\"\n".as_bytes(), &mut factory);
        assert_eq!(npcs.len(), 1);
        assert_eq!(npcs[0].position(), Position::new(450, 450));
    }
}
