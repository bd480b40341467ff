//! Evaluation modes.
//!
//! `Interpret` is the normal classroom run. `Sandbox` adds a statement
//! budget so hosts that execute untrusted submissions (an online checker, a
//! playground) can bound a genuinely infinite `нц ... кц`.

/// Default call-depth limit for every mode.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Evaluation mode; policy is read through the methods below.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    #[default]
    Interpret,
    Sandbox {
        /// Statements executed before the run is aborted.
        max_steps: u64,
    },
}

impl EvalMode {
    #[inline]
    pub fn max_call_depth(&self) -> usize {
        DEFAULT_MAX_CALL_DEPTH
    }

    /// Statement budget, `None` when unbounded.
    #[inline]
    pub fn step_budget(&self) -> Option<u64> {
        match self {
            Self::Interpret => None,
            Self::Sandbox { max_steps } => Some(*max_steps),
        }
    }
}

/// Per-run counters driven by the mode.
#[derive(Clone, Debug)]
pub struct ModeState {
    steps: u64,
    budget: Option<u64>,
}

impl ModeState {
    pub fn new(mode: &EvalMode) -> Self {
        Self {
            steps: 0,
            budget: mode.step_budget(),
        }
    }

    /// Statements executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Count one statement. Fails once the budget is used up.
    #[inline]
    pub fn count_step(&mut self) -> Result<(), BudgetExceeded> {
        self.steps = self.steps.saturating_add(1);
        match self.budget {
            Some(limit) if self.steps > limit => Err(BudgetExceeded { limit }),
            _ => Ok(()),
        }
    }
}

/// The sandbox statement budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetExceeded {
    pub limit: u64,
}
