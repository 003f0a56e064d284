//! Task categories used to label statistics and log lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire names of every [`Task`], indexed by [`Task::index`].
pub const TASK_NAMES: [&str; 6] = [
    "MEMORYCHECK",
    "COMMUNICATION",
    "CLAUSEPUSH",
    "CLAUSEPULL",
    "SOLVER",
    "CLAUSELEARN",
];

/// Closed set of work categories a worker reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Task {
    MemoryCheck,
    Communication,
    ClausePush,
    ClausePull,
    Solver,
    ClauseLearn,
}

impl Task {
    /// All tasks in declaration order.
    pub const ALL: [Task; 6] = [
        Task::MemoryCheck,
        Task::Communication,
        Task::ClausePush,
        Task::ClausePull,
        Task::Solver,
        Task::ClauseLearn,
    ];

    /// Position of this task in [`Task::ALL`] and [`TASK_NAMES`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name, e.g. `"CLAUSEPUSH"`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        TASK_NAMES[self.index()]
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of [`TASK_NAMES`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task name: {0}")]
pub struct UnknownTask(pub String);

impl FromStr for Task {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| UnknownTask(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_declaration_order() {
        for (i, task) in Task::ALL.iter().enumerate() {
            assert_eq!(task.index(), i);
            assert_eq!(task.as_str(), TASK_NAMES[i]);
        }
        assert_eq!(Task::ClausePull.to_string(), "CLAUSEPULL");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("SOLVER".parse::<Task>().unwrap(), Task::Solver);
        assert_eq!("MEMORYCHECK".parse::<Task>().unwrap(), Task::MemoryCheck);

        let err = "solver".parse::<Task>().unwrap_err();
        assert_eq!(err, UnknownTask("solver".to_string()));
        assert!(err.to_string().contains("unknown task name"));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        for task in Task::ALL {
            let json = serde_json::to_string(&task).unwrap();
            assert_eq!(json, format!("\"{}\"", task.as_str()));
            let back: Task = serde_json::from_str(&json).unwrap();
            assert_eq!(back, task);
        }
    }
}
