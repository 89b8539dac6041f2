use numtree_attrs::ErrorKind;

/// The input buffer has a different number of columns than the program reads.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "expected {} input column{}, got {}",
        self.expected,
        if self.expected == 1 { "" } else { "s" },
        self.given,
    ),
    help = "stack one array per parameter, in parameter order",
)]
pub struct ArityMismatch {
    /// The number of columns the program reads.
    pub expected: usize,

    /// The number of columns that were given.
    pub given: usize,
}

/// A chunk does not form a valid program.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("malformed bytecode chunk: {}", self.reason))]
pub struct MalformedChunk {
    /// What is wrong with the chunk.
    pub reason: String,
}
