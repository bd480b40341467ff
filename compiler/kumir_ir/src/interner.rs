//! Case-insensitive identifier interner.
//!
//! Identifiers are folded to lower case for lookup; the first spelling seen
//! is kept for display so diagnostics echo what the student typed.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Error when the interner runs out of 32-bit indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(f, "interner exceeded capacity: {count} identifiers")
            }
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    /// Folded spelling to index.
    map: FxHashMap<&'static str, u32>,
    /// First-seen spelling per index.
    spellings: Vec<&'static str>,
}

/// Identifier interner shared by the front end and the evaluator.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create an interner with the reserved names pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(InternTable {
                map: FxHashMap::default(),
                spellings: Vec::with_capacity(64),
            }),
        };
        // Order matters: these land on `Name::EMPTY` and `Name::RESULT`.
        for reserved in ["", "знач"] {
            interner.intern(reserved);
        }
        interner
    }

    /// Fold an identifier the way the language compares them.
    pub fn fold(s: &str) -> String {
        s.to_lowercase()
    }

    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let folded = Self::fold(s);
        {
            let guard = self.table.read();
            if let Some(&idx) = guard.map.get(folded.as_str()) {
                return Ok(Name::from_raw(idx));
            }
        }

        let mut guard = self.table.write();
        if let Some(&idx) = guard.map.get(folded.as_str()) {
            return Ok(Name::from_raw(idx));
        }
        let idx = u32::try_from(guard.spellings.len()).map_err(|_| InternError::Overflow {
            count: guard.spellings.len(),
        })?;
        // Interned strings live for the whole process.
        let key: &'static str = Box::leak(folded.into_boxed_str());
        let spelling: &'static str = if key == s {
            key
        } else {
            Box::leak(s.to_owned().into_boxed_str())
        };
        guard.spellings.push(spelling);
        guard.map.insert(key, idx);
        Ok(Name::from_raw(idx))
    }

    /// Intern an identifier.
    ///
    /// # Panics
    /// Panics after `u32::MAX` distinct identifiers.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up an already-interned identifier without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        let folded = Self::fold(s);
        self.table.read().map.get(folded.as_str()).copied().map(Name::from_raw)
    }

    /// Display spelling of a name (the first spelling that was interned).
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .spellings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.table.read().spellings.len()
    }

    /// Only the reserved names are present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 2
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
