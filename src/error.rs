use thiserror::Error;

#[derive(Error, Debug)]
pub enum EqdsError {
    /// A record was rejected by the strict validation entry point.
    ///
    /// Displays the bare message so non-throwing callers can report it verbatim.
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Ownership { message: String },

    #[error("File {path} {message}")]
    FrontMatter { path: String, message: String },

    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EqdsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }

    pub fn front_matter(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FrontMatter {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EqdsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_bare_message() {
        let err = EqdsError::validation("Object is not a valid FHIR resource");
        assert_eq!(err.to_string(), "Object is not a valid FHIR resource");
    }

    #[test]
    fn test_front_matter_error_names_the_file() {
        let err = EqdsError::front_matter("patient.json", "does not have Jekyll front matter");
        assert_eq!(
            err.to_string(),
            "File patient.json does not have Jekyll front matter"
        );
    }
}
