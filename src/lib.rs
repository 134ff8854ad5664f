pub mod amount;
pub mod commit;
pub mod config;
pub mod csv;
pub mod matcher;
pub mod model;
pub mod selection;

pub use amount::Cents;
pub use commit::{CommitError, LedgerStore, MemoryLedger, commit};
pub use config::MatchConfig;
pub use matcher::{MatchError, Matcher, SearchRequest, SearchResult};
pub use model::{Candidate, Combination, Entry, EntryId, EntryKind};
pub use selection::{Selection, SelectionError};
