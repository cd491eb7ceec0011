//! Lessons are the rows of the 2-input truth table
//! that a population is trained to reproduce.

use serde::{Deserialize, Serialize};

/// The boolean operator a run trains against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// Applies the operator to a pair of inputs.
    ///
    /// # Examples
    /// ```
    /// use evogate::lessons::LogicOp;
    ///
    /// assert!(LogicOp::And.apply(true, true));
    /// assert!(!LogicOp::And.apply(true, false));
    /// assert!(LogicOp::Or.apply(true, false));
    /// ```
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            LogicOp::And => a && b,
            LogicOp::Or => a || b,
        }
    }
}

/// A single labeled example: two boolean inputs and the
/// output the trained operator produces for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub input_a: bool,
    pub input_b: bool,
    pub expected: bool,
}

/// The complete set of lessons for a run: every input
/// combination, labeled by the chosen operator.
///
/// Built once at setup and read-only thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSet {
    op: LogicOp,
    lessons: Vec<Lesson>,
}

impl LessonSet {
    /// Builds the four truth-table rows for `op`.
    ///
    /// # Examples
    /// ```
    /// use evogate::lessons::{LessonSet, LogicOp};
    ///
    /// let lessons = LessonSet::new(LogicOp::And);
    ///
    /// assert_eq!(lessons.len(), 4);
    /// assert_eq!(lessons.iter().filter(|l| l.expected).count(), 1);
    /// ```
    pub fn new(op: LogicOp) -> LessonSet {
        let lessons = [(false, false), (false, true), (true, false), (true, true)]
            .iter()
            .map(|&(a, b)| Lesson {
                input_a: a,
                input_b: b,
                expected: op.apply(a, b),
            })
            .collect();
        LessonSet { op, lessons }
    }

    /// Returns the operator the set was built for.
    pub fn op(&self) -> LogicOp {
        self.op
    }

    /// Returns the number of lessons in the set.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Returns an iterator over the lessons.
    pub fn iter(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter()
    }
}
