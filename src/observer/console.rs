//! Line-atomic console output shared by the worker loops and the menu

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::core::sync::lock;
use crate::entity::NpcHandle;
use crate::observer::KillObserver;

enum Sink {
    Stdout,
    Captured(Vec<String>),
}

/// Serialized text output.
///
/// Every call writes its whole text under one lock so interleaved output
/// from the movement loop, the combat loop and the menu stays intact.
/// Callers must not hold the registry or queue locks while printing.
pub struct Console {
    sink: Mutex<Sink>,
}

impl Console {
    pub fn stdout() -> Self {
        Self {
            sink: Mutex::new(Sink::Stdout),
        }
    }

    /// Console that keeps lines in memory instead of printing them
    pub fn captured() -> Self {
        Self {
            sink: Mutex::new(Sink::Captured(Vec::new())),
        }
    }

    pub fn line(&self, text: &str) {
        self.block(text);
    }

    /// Write a multi-line block without interleaving
    pub fn block(&self, text: &str) {
        let mut sink = lock(&self.sink);
        match &mut *sink {
            Sink::Stdout => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                // Nothing sensible to do if the terminal went away.
                let _ = writeln!(out, "{text}");
                let _ = out.flush();
            }
            Sink::Captured(lines) => lines.extend(text.lines().map(str::to_string)),
        }
    }

    /// Write without a trailing newline (progress dots)
    pub fn partial(&self, text: &str) {
        let mut sink = lock(&self.sink);
        match &mut *sink {
            Sink::Stdout => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                let _ = write!(out, "{text}");
                let _ = out.flush();
            }
            Sink::Captured(lines) => lines.push(text.to_string()),
        }
    }

    /// Lines written so far; empty for a stdout console
    pub fn captured_lines(&self) -> Vec<String> {
        match &*lock(&self.sink) {
            Sink::Stdout => Vec::new(),
            Sink::Captured(lines) => lines.clone(),
        }
    }
}

/// Prints `[HH:MM:SS] [KILL] <killer> killed <victim>`
pub struct ConsoleObserver {
    console: Arc<Console>,
}

impl ConsoleObserver {
    pub fn new(console: Arc<Console>) -> Self {
        Self { console }
    }
}

impl KillObserver for ConsoleObserver {
    fn on_kill(&self, killer: &NpcHandle, victim: &NpcHandle) {
        let stamp = Local::now().format("%H:%M:%S");
        self.console.line(&format!(
            "[{stamp}] [KILL] {} killed {}",
            killer.name(),
            victim.name()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::entity::{Npc, Species};

    #[test]
    fn test_captured_block_splits_lines() {
        let console = Console::captured();
        console.block("first\nsecond");
        console.line("third");
        assert_eq!(console.captured_lines(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_console_observer_format() {
        let console = Arc::new(Console::captured());
        let observer = ConsoleObserver::new(console.clone());
        let killer = Npc::spawn(Species::Bull, "Bull", Position::new(0, 0), 1);
        let victim = Npc::spawn(Species::Frog, "Frog", Position::new(0, 0), 2);
        observer.on_kill(&killer, &victim);

        let lines = console.captured_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("[KILL] Bull killed Frog"));
    }
}
