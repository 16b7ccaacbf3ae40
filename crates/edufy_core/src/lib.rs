pub mod domain;
pub mod ports;

pub use domain::{
    ArtifactKind, DocumentInfo, DocumentSession, Flashcard, QueryAnswer, QueryMetadata,
    QueryResult, SourcePassage, StatusSnapshot, UploadReceipt,
};
pub use ports::{PortError, PortResult, StudyService};
