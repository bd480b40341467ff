//! Registry of the program's user algorithms.
//!
//! Built once before execution starts and read-only afterwards. Names are
//! already case-folded by the interner, so lookup is case-insensitive.

use crate::errors::{duplicate_algorithm, EvalResult};
use kumir_ir::{Algorithm, Name, Program, StringInterner};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct AlgorithmRegistry<'p> {
    by_name: FxHashMap<Name, &'p Algorithm>,
    /// Definition order, for choosing the entry algorithm.
    order: Vec<&'p Algorithm>,
}

impl<'p> AlgorithmRegistry<'p> {
    /// Register every algorithm of `program`; a repeated name is an error
    /// at the second definition.
    pub fn build(program: &'p Program, interner: &StringInterner) -> EvalResult<Self> {
        let mut registry = AlgorithmRegistry::default();
        for algorithm in &program.algorithms {
            if registry.by_name.insert(algorithm.name, algorithm).is_some() {
                return Err(duplicate_algorithm(interner.lookup(algorithm.name)).with_span(algorithm.span));
            }
            registry.order.push(algorithm);
        }
        tracing::debug!(algorithms = registry.order.len(), "algorithm registry built");
        Ok(registry)
    }

    pub fn get(&self, name: Name) -> Option<&'p Algorithm> {
        self.by_name.get(&name).copied()
    }

    /// First algorithm without parameters and result.
    pub fn entry(&self) -> Option<&'p Algorithm> {
        self.order.iter().copied().find(|a| a.is_entry_candidate())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
