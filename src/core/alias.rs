/// Upper bound on stored aliases. Definitions past this are rejected,
/// never evicted.
pub const MAX_ALIASES: usize = 50;

#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub name: String,
    pub command: String,
}

/// Ordered alias table. Names are not deduplicated; lookup returns the
/// first match, so the earliest definition of a name wins.
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    capacity: usize,
}

impl AliasTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Table seeded with the conventional list-directory shorthands.
    pub fn with_defaults() -> Self {
        let mut table = Self::new(MAX_ALIASES);
        table.define("ll", "ls -l");
        table.define("la", "ls -a");
        table
    }

    /// Append a definition. Returns false when the table is full.
    pub fn define(&mut self, name: &str, command: &str) -> bool {
        if self.entries.len() >= self.capacity {
            return false;
        }
        self.entries.push(AliasEntry {
            name: name.to_string(),
            command: command.to_string(),
        });
        true
    }

    /// First-match replacement for `name`, if one is defined.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.command.as_str())
    }

    /// One level of substitution: the replacement when defined, the name
    /// itself otherwise.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.lookup(name).unwrap_or(name)
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
