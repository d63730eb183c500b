// File: src/invite/mod.rs
// Davet dağıtımıyla ilgili tüm mantık: davetli tipleri, oturum bağlamı ve dispatcher.

pub mod dispatcher;
pub mod item;
pub mod session;
pub mod utils;

pub use dispatcher::InviteDispatcher;
pub use item::{InviteItem, VideoSipGwRoom};
pub use session::{ConferenceSession, DialHandle, DirectoryInviter, GatewayInviter, SessionContext};
