//! Protocol vocabulary shared by every participant in the partition tree.
//!
//! Command names travel as the value of the [`param::COMMAND`] key; parameter
//! names are header keys (optionally under the `parameter` prefix); backend
//! identifiers are values of [`param::SOLVER`].
//!
//! Renaming or removing any of these constants is a breaking change for all
//! collaborating processes.

/// Command names (values of the `command` parameter).
pub mod command {
    /// Split the current instance into partitions.
    pub const PARTITION: &str = "partition";
    /// Stop the running search.
    pub const STOP: &str = "stop";
    /// Inject clauses learned elsewhere into a running solver.
    pub const CLAUSE_INJECTION: &str = "inject";
    /// Incremental solving step.
    pub const INCREMENTAL: &str = "incremental";
    /// Request the CNF clauses of the instance.
    pub const CNF_CLAUSES: &str = "cnf-clauses";
    /// Request the CNF learnt clauses.
    pub const CNF_LEARNTS: &str = "cnf-learnts";
    /// Start solving.
    pub const SOLVE: &str = "solve";
    /// Lemma exchange.
    pub const LEMMAS: &str = "lemmas";
    /// Terminate the worker.
    pub const TERMINATE: &str = "terminate";
    /// Resume a stopped search.
    pub const RESUME: &str = "resume";

    /// Every command name, in declaration order.
    pub const ALL: [&str; 10] = [
        PARTITION,
        STOP,
        CLAUSE_INJECTION,
        INCREMENTAL,
        CNF_CLAUSES,
        CNF_LEARNTS,
        SOLVE,
        LEMMAS,
        TERMINATE,
        RESUME,
    ];

    /// Check whether `name` is a known command.
    #[inline]
    pub fn is_known(name: &str) -> bool {
        ALL.contains(&name)
    }
}

/// Parameter names (header keys).
pub mod param {
    /// Partition-tree address of the node, e.g. `[0,2][1,2]`.
    pub const NODE: &str = "node";
    pub const NODE_: &str = "node_";
    pub const COMMAND: &str = "command";
    pub const QUERY: &str = "query";
    pub const NAME: &str = "name";
    pub const SEED: &str = "seed";
    pub const SPLIT_TYPE: &str = "split-type";
    pub const SPLIT_PREFERENCE: &str = "split-preference";
    pub const PARTITIONS: &str = "partitions";
    /// Backend identifier, one of [`super::solver::ALL`].
    pub const SOLVER: &str = "solver";
    pub const REPORT: &str = "report";
    pub const MAX_MEMORY: &str = "max_memory";
    pub const SCATTER_SPLIT: &str = "scatter-split";
    pub const SEARCH_COUNTER: &str = "search_counter";
    pub const STATUS_INFO: &str = "status_info";
    pub const LEMMA_AMOUNT: &str = "lemma_amount";
    /// Toggles worker-side logging.
    pub const LOG_MODE: &str = "enableLog";
    pub const LEMMA_PUSH_MIN: &str = "lemma_push_min";
    pub const LEMMA_PUSH_MAX: &str = "lemma_push_max";
    pub const LEMMA_PULL_MIN: &str = "lemma_pull_min";
    pub const LEMMA_PULL_MAX: &str = "lemma_pull_max";

    /// Every parameter name, in declaration order.
    pub const ALL: [&str; 21] = [
        NODE,
        NODE_,
        COMMAND,
        QUERY,
        NAME,
        SEED,
        SPLIT_TYPE,
        SPLIT_PREFERENCE,
        PARTITIONS,
        SOLVER,
        REPORT,
        MAX_MEMORY,
        SCATTER_SPLIT,
        SEARCH_COUNTER,
        STATUS_INFO,
        LEMMA_AMOUNT,
        LOG_MODE,
        LEMMA_PUSH_MIN,
        LEMMA_PUSH_MAX,
        LEMMA_PULL_MIN,
        LEMMA_PULL_MAX,
    ];

    /// Check whether `name` is a known parameter.
    #[inline]
    pub fn is_known(name: &str) -> bool {
        ALL.contains(&name)
    }
}

/// Backend solver identifiers.
pub mod solver {
    pub const OPENSMT2: &str = "OpenSMT2";
    pub const SPACER: &str = "Spacer";
    pub const SALLY: &str = "SALLY";

    /// Every backend identifier.
    pub const ALL: [&str; 3] = [OPENSMT2, SPACER, SALLY];
}

/// Statistics limits.
pub mod stats {
    /// Maximum number of statistic entries a report may carry.
    pub const MAX_SIZE: usize = 10_000;
}
