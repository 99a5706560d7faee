use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ChatClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {body} {location}")]
    Server {
        status_code: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },
}

impl ChatClientError {
    /// The text shown to the user on the status line.
    ///
    /// For a non-success response this is the raw response body; for
    /// transport and parse failures it is the underlying error text.
    pub fn surface_text(&self) -> &str {
        match self {
            ChatClientError::Server { body, .. } => body,
            ChatClientError::Http { message, .. }
            | ChatClientError::Json { message, .. }
            | ChatClientError::UrlParse { message, .. } => message,
        }
    }

    /// Status code of the failed response, if the server answered at all.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            ChatClientError::Server { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ChatClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ChatClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ChatClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ChatClientError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ChatClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ChatClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
