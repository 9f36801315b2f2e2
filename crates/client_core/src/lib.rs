//! Effect selection and submission: the remote client contract, its HTTP
//! implementation, session state and the single-flight orchestrator.

pub mod http;
mod orchestrator;
pub mod remote;
mod session;

pub use http::{ClientBuildError, HttpEffectClient};
pub use orchestrator::{SubmissionEvent, SubmissionOrchestrator, SubmitError};
pub use remote::{interpret_response, RemoteEffectClient, RemoteError};
pub use session::{SubmissionSession, SubmissionSnapshot};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
