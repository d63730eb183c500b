// File: src/dial_in/mod.rs
// Konferansa telefonla katılım (dial-in) numaralarının ve konferans ID'sinin sorgulanması.

pub mod fetcher;
pub mod types;

pub use fetcher::{DialInApi, DialInEventSink, DialInNumbersFetcher};
pub use types::{ConferenceIdInfo, DialInEvent, DialInNumbers};
