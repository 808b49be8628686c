mod exchange;
mod report;
mod scorer;

pub use exchange::Exchange;
pub use report::SymptomReport;
pub use scorer::{ProcessScorer, Scorer};
