/// Constants used by weighting validation and apportionment.
pub mod allocation {
    /// Sum of a complete weight vector, in percent.
    pub const FULL_WEIGHT_PERCENT: f64 = 100.0;
    /// Tolerance accepted when checking that explicit weights sum to 100%.
    ///
    /// Weights usually arrive from human-edited composition tables, so small
    /// rounding residue (`33.33 * 3`) must not reject a request.
    pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;
}

/// Constants used by pool construction and feed validation.
pub mod pool {
    /// Minimum number of answer options a usable question must carry.
    pub const MIN_OPTIONS: usize = 2;
    /// Log message used when malformed question records are skipped.
    pub const SKIP_MALFORMED_MSG: &str = "skipping malformed question record";
    /// Log message used when a duplicate question id is dropped during merge.
    pub const SKIP_DUPLICATE_MSG: &str = "skipping duplicate question id";
}

/// Constants used by sampler test fixtures.
#[cfg(test)]
pub mod fixtures {
    /// Primary group id used by sampler unit tests.
    pub const PRIMARY_GROUP_ID: &str = "resilient_architectures";
    /// Secondary group id used by sampler unit tests.
    pub const SECONDARY_GROUP_ID: &str = "security_compliance";
}
