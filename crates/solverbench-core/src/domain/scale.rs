//! Problem scale tuple.

/// Size summary of one problem instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProblemScale {
    /// Number of planning entities.
    pub entity_count: u64,
    /// Number of genuine planning variables.
    pub genuine_variable_count: u64,
    /// Largest value range size.
    pub maximum_value_count: u64,
    /// Aggregate search space measure.
    pub problem_scale: u64,
}

impl ProblemScale {
    /// Creates a scale tuple.
    pub const fn new(
        entity_count: u64,
        genuine_variable_count: u64,
        maximum_value_count: u64,
        problem_scale: u64,
    ) -> Self {
        Self {
            entity_count,
            genuine_variable_count,
            maximum_value_count,
            problem_scale,
        }
    }

    /// Returns the field-wise maximum of two scale tuples.
    ///
    /// Merging is commutative, associative and idempotent, so the order in
    /// which sibling runs register does not matter.
    ///
    /// # Example
    ///
    /// ```
    /// use solverbench_core::ProblemScale;
    ///
    /// let a = ProblemScale::new(8, 8, 8, 64);
    /// let b = ProblemScale::new(8, 9, 7, 60);
    /// assert_eq!(a.merge(&b), ProblemScale::new(8, 9, 8, 64));
    /// assert_eq!(a.merge(&a), a);
    /// ```
    pub fn merge(&self, other: &ProblemScale) -> ProblemScale {
        ProblemScale {
            entity_count: self.entity_count.max(other.entity_count),
            genuine_variable_count: self
                .genuine_variable_count
                .max(other.genuine_variable_count),
            maximum_value_count: self.maximum_value_count.max(other.maximum_value_count),
            problem_scale: self.problem_scale.max(other.problem_scale),
        }
    }
}
