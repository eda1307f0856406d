pub mod actor;
pub mod details;
pub mod error;
pub mod events;
pub mod logging;
pub mod settings;

pub use actor::{Actor, HostSnapshot, HostUser, Scene, Token};
pub use details::{ActorDetails, Tab, TabVisibility};
pub use error::{Error, RegistrationError, Result};
pub use events::{Debouncer, HostEvent};
pub use logging::{LOG_ENV, LOG_FORMAT_ENV, LogFormat, init_logging};
pub use settings::Settings;
