//! Application context shared by all schematics of one editor page
//!
//! Owns the name allocator, so canvas names are unique per context instead of
//! per process.

use crate::config::CanvasConfig;

/// Hands out `schematic0`, `schematic1`, ...
#[derive(Debug, Clone)]
pub struct NameAllocator {
    prefix: String,
    next: u32,
}

impl NameAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next_name(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> u32 {
        self.next
    }
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new("schematic")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchematicContext {
    pub names: NameAllocator,
    pub config: CanvasConfig,
}

impl SchematicContext {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            names: NameAllocator::default(),
            config,
        }
    }
}
