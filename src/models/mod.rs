mod candidate;
mod envelope;
mod post;

pub use candidate::{Candidate, CandidateSource};
pub use envelope::{
    AndroidConfig, AndroidNotification, ApnsConfig, ApnsPayload, Aps, DispatchResult,
    NotificationEnvelope,
};
pub use post::PostSubmission;
