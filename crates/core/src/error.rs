use thiserror::Error;

/// Result type alias for partyview-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the party overview engine
#[derive(Debug, Error)]
pub enum Error {
    /// A provider was asked for a render template it never declared.
    ///
    /// This is a registration/construction bug, not a data condition: every
    /// concrete provider must override `template()`. It is the only error
    /// allowed to surface as a hard fault out of a render cycle.
    #[error("provider \"{id}\" does not declare a render template")]
    UnimplementedProvider { id: String },

    /// Provider registration was rejected
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// A single actor's details could not be extracted.
    ///
    /// Recovered by the update engine: logged and the actor is dropped from
    /// the current cycle instead of blanking the whole panel.
    #[error("couldn't load actor \"{name}\" (ID: \"{id}\"): {reason}")]
    Extraction { name: String, id: String, reason: String },

    /// Settings errors
    #[error("settings error: {0}")]
    Settings(String),

    /// I/O error for settings file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/serialization errors
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Per-actor extraction fault carrying the actor's display name and id
    /// so the diagnostic is actionable for the table administrator.
    pub fn extraction(name: impl Into<String>, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction { name: name.into(), id: id.into(), reason: reason.into() }
    }
}

/// Rejected external provider registrations.
///
/// These never escape the registration entry points: the attempt is logged
/// with a descriptive warning and ignored, so a misbehaving module simply
/// never appears in the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// No active module with the supplied id exists in the host
    #[error(
        "a module tried to register with the id \"{module_id}\", but no active module with this id was found; \
         check that the id matches your manifest exactly, or use the system registration entry point instead"
    )]
    UnknownModule { module_id: String },

    /// The reserved id of this plugin itself was supplied
    #[error("a module tried to register with the reserved id \"{module_id}\", which is not allowed")]
    ReservedId { module_id: String },

    /// A system registration named a system other than the active one
    #[error(
        "a system tried to register with the id \"{requested}\", but the active game system is \"{active}\"; \
         check that the id matches your manifest exactly, or use the module registration entry point instead"
    )]
    SystemMismatch { requested: String, active: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let unimplemented = Error::UnimplementedProvider { id: "native".to_string() };
        assert_eq!(
            unimplemented.to_string(),
            "provider \"native\" does not declare a render template"
        );

        let extraction = Error::extraction("Mordenkainen", "abc123", "missing hit points");
        assert_eq!(
            extraction.to_string(),
            "couldn't load actor \"Mordenkainen\" (ID: \"abc123\"): missing hit points"
        );

        let settings = Error::Settings("bad tab id".to_string());
        assert_eq!(settings.to_string(), "settings error: bad tab id");

        let other = Error::Other("something went wrong".to_string());
        assert_eq!(other.to_string(), "something went wrong");
    }

    #[test]
    fn test_registration_error_display() {
        let unknown = RegistrationError::UnknownModule { module_id: "better-dnd5e".to_string() };
        assert!(unknown.to_string().contains("\"better-dnd5e\""));
        assert!(unknown.to_string().contains("no active module"));

        let reserved = RegistrationError::ReservedId { module_id: "party-overview".to_string() };
        assert!(reserved.to_string().contains("reserved"));

        let mismatch = RegistrationError::SystemMismatch {
            requested: "pf2e".to_string(),
            active: "dnd5e".to_string(),
        };
        assert!(mismatch.to_string().contains("\"pf2e\""));
        assert!(mismatch.to_string().contains("\"dnd5e\""));
    }

    #[test]
    fn test_error_from_registration_error() {
        let reg = RegistrationError::ReservedId { module_id: "party-overview".to_string() };
        let error: Error = reg.into();
        assert!(error.to_string().starts_with("registration error:"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io.into();
        assert_eq!(error.to_string(), "I/O error: file not found");
    }

    #[test]
    fn test_result_type_alias() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(Error::Other("error".to_string()));
        assert!(err.is_err());
    }
}
