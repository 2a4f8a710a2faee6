use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Truncated corpus record at byte {offset}: read {len} of {expected} bytes")]
    TruncatedRecord { offset: u64, len: usize, expected: usize },

    #[error("Probability corpus is empty")]
    EmptyCorpus,

    #[error("Unknown {field} code {value} (corpus row {row})")]
    UnknownCode { field: &'static str, value: u8, row: u8 },

    #[error("No corpus instant matches the current field state {state}")]
    NoCandidates { state: String },

    #[error("Invalid tactics {defenders}-{midfielders}-{forwards}: outfield lines must add up to 10")]
    InvalidTactics { defenders: u8, midfielders: u8, forwards: u8 },

    #[error("Malformed tactics string: {0}")]
    MalformedTactics(String),

    #[error("Missing configuration key: {key}")]
    MissingConfig { key: String },

    #[error("Malformed configuration line {line}: {content}")]
    MalformedConfig { line: usize, content: String },

    #[error("No eligible player on the {line} line")]
    NoEligiblePlayer { line: String },

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error("Match has not kicked off yet")]
    NotStarted,
}

impl MatchError {
    /// Whether the caller can keep going (e.g. skip one output file) after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MatchError::Io(_) => true,
            MatchError::MissingConfig { .. } => true,
            MatchError::TruncatedRecord { .. } => false,
            MatchError::EmptyCorpus => false,
            MatchError::NoCandidates { .. } => false,
            MatchError::UnknownCode { .. } => false,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
