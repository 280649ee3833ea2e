//! Typed request and response models for the UnDatasIO API.
//!
//! Records returned by listing endpoints are kept opaque: the client only
//! reads their identifiers and hands the JSON back unchanged.

mod envelope;
mod records;
mod request;

pub use envelope::Envelope;
pub use records::{ParseResult, Task, TaskFile, Workspace};
pub use request::{
    DEFAULT_DS_ID, DownloadLink, DownloadRequest, ParseConfig, ParseFilesRequest,
    ParseResultRequest,
};
pub(crate) use request::{require_id, require_ids};
