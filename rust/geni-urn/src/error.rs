/// Errors raised while parsing or deriving URNs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrnError {
    /// The input does not have the shape the operation requires.
    #[error("Malformed URN \"{input}\": expected {expected}")]
    Malformed {
        /// The offending input, verbatim.
        input: String,
        /// Description of the shape that was expected.
        expected: &'static str,
    },
}

impl UrnError {
    pub(crate) fn malformed(input: &str, expected: &'static str) -> Self {
        Self::Malformed {
            input: input.to_owned(),
            expected,
        }
    }
}
