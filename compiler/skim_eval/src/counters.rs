//! Evaluation counters for `--profile`.
//!
//! Held as `Option<EvalCounters>` on the interpreter; when `None`, every
//! increment is skipped.

/// Counts of evaluator events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub expressions_evaluated: u64,
    pub builtin_calls: u64,
    pub procedure_calls: u64,
    pub syntax_forms: u64,
    /// Deepest nesting of non-tail evaluation seen.
    pub max_depth: usize,
    /// Most arguments ever waiting on the call stack at once.
    pub peak_call_stack: usize,
}

impl EvalCounters {
    #[inline]
    pub fn count_expression(&mut self) {
        self.expressions_evaluated = self.expressions_evaluated.wrapping_add(1);
    }

    #[inline]
    pub fn count_builtin_call(&mut self) {
        self.builtin_calls = self.builtin_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_procedure_call(&mut self) {
        self.procedure_calls = self.procedure_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_syntax_form(&mut self) {
        self.syntax_forms = self.syntax_forms.wrapping_add(1);
    }

    #[inline]
    pub fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             Expressions evaluated: {}\n  \
             Built-in calls:        {}\n  \
             Procedure calls:       {}\n  \
             Syntax forms:          {}\n  \
             Max nesting depth:     {}\n  \
             Peak call stack:       {}",
            self.expressions_evaluated,
            self.builtin_calls,
            self.procedure_calls,
            self.syntax_forms,
            self.max_depth,
            self.peak_call_stack,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut counters = EvalCounters::default();
        counters.count_expression();
        counters.count_expression();
        counters.count_builtin_call();
        counters.record_depth(3);
        counters.record_depth(1);

        assert_eq!(counters.expressions_evaluated, 2);
        assert_eq!(counters.builtin_calls, 1);
        assert_eq!(counters.max_depth, 3);
        assert!(counters.report().contains("Expressions evaluated: 2"));
    }
}
