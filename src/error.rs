// src/error.rs
//! Unified error handling for the metabolic probe
//!
//! Every failure a probe can raise is one of a small set of kinds. Static
//! parameter problems (`Configuration`, `Reference`) surface once when the
//! probe binds to a model; `Domain` errors depend on the instantaneous muscle
//! state and are checked on every evaluation. All of them abort the whole
//! evaluation: no partial total is ever returned.

use crate::utils::validation::ValidationError;
use std::fmt;
use thiserror::Error;

/// Unified error type for the metabolic probe
#[derive(Debug, Clone, Error)]
pub enum MetabolicError {
    /// Invalid static parameter (muscle mass, fiber ratio, duplicate name, probe constant)
    #[error("[CONFIG] Invalid {field}{}: {reason} ({context})", muscle_suffix(.muscle))]
    Configuration {
        field: String,
        muscle: Option<String>,
        reason: String,
        context: ErrorContext,
    },

    /// Named muscle is absent from the external model
    #[error("[REFERENCE] Invalid muscle '{muscle}' specified ({context})")]
    Reference {
        muscle: String,
        context: ErrorContext,
    },

    /// Instantaneous state makes the energy model undefined
    #[error("[DOMAIN] {reason} for muscle '{muscle}' ({context})")]
    Domain {
        muscle: String,
        reason: String,
        context: ErrorContext,
    },

    /// Probe description or snapshot could not be read, parsed or written
    #[error("[LOAD] Failed to access '{path}': {reason}")]
    Load {
        path: String,
        reason: String,
    },

    /// Probe description, snapshot or report could not be encoded
    #[error("[SERIALIZATION] Failed to encode {target}: {reason}")]
    Serialization {
        target: String,
        reason: String,
    },

    /// One or more configuration values failed validation
    #[error("[VALIDATION] {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Error categories, for hosts that only need to branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Reference,
    Domain,
    Load,
    Serialization,
    Validation,
}

impl MetabolicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetabolicError::Configuration { .. } => ErrorKind::Configuration,
            MetabolicError::Reference { .. } => ErrorKind::Reference,
            MetabolicError::Domain { .. } => ErrorKind::Domain,
            MetabolicError::Load { .. } => ErrorKind::Load,
            MetabolicError::Serialization { .. } => ErrorKind::Serialization,
            MetabolicError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Muscle the error refers to, if any
    pub fn muscle(&self) -> Option<&str> {
        match self {
            MetabolicError::Configuration { muscle, .. } => muscle.as_deref(),
            MetabolicError::Reference { muscle, .. } | MetabolicError::Domain { muscle, .. } => {
                Some(muscle)
            }
            _ => None,
        }
    }

    /// Where the error was raised; `None` for file and encoding failures
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            MetabolicError::Configuration { context, .. }
            | MetabolicError::Reference { context, .. }
            | MetabolicError::Domain { context, .. } => Some(context),
            _ => None,
        }
    }
}

fn muscle_suffix(muscle: &Option<String>) -> String {
    match muscle {
        Some(name) => format!(" for muscle '{}'", name),
        None => String::new(),
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where an error was raised
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    /// Simulation time of the failing evaluation
    pub time: Option<f64>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            time: None,
            file: None,
            line: None,
        }
    }

    /// Create error context with file and line information
    pub fn with_location(component: &str, operation: &str, file: &'static str, line: u32) -> Self {
        let mut context = Self::new(component, operation);
        context.file = Some(file);
        context.line = Some(line);
        context
    }

    pub fn at_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.component, self.operation)?;
        if let Some(time) = self.time {
            write!(f, " at t = {}", time)?;
        }
        Ok(())
    }
}

/// Macro for creating error context with file and line info
#[macro_export]
macro_rules! error_context {
    ($component:expr, $operation:expr) => {
        $crate::error::ErrorContext::with_location($component, $operation, file!(), line!())
    };
}

/// Result type alias for probe operations
pub type MetabolicResult<T> = Result<T, MetabolicError>;

/// Error builder for convenient error construction
pub struct MetabolicErrorBuilder {
    context: ErrorContext,
}

impl MetabolicErrorBuilder {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            context: ErrorContext::new(component, operation),
        }
    }

    pub fn from_context(context: ErrorContext) -> Self {
        Self { context }
    }

    pub fn at_time(mut self, time: f64) -> Self {
        self.context = self.context.at_time(time);
        self
    }

    pub fn configuration(self, field: &str, muscle: Option<&str>, reason: &str) -> MetabolicError {
        MetabolicError::Configuration {
            field: field.to_string(),
            muscle: muscle.map(str::to_string),
            reason: reason.to_string(),
            context: self.context,
        }
    }

    pub fn reference(self, muscle: &str) -> MetabolicError {
        MetabolicError::Reference {
            muscle: muscle.to_string(),
            context: self.context,
        }
    }

    pub fn domain(self, muscle: &str, reason: &str) -> MetabolicError {
        MetabolicError::Domain {
            muscle: muscle.to_string(),
            reason: reason.to_string(),
            context: self.context,
        }
    }
}

/// Encoding failure of `target` (a report, snapshot or description)
pub fn serialization_error(target: &str, err: impl fmt::Display) -> MetabolicError {
    MetabolicError::Serialization {
        target: target.to_string(),
        reason: err.to_string(),
    }
}

impl From<ValidationError> for MetabolicError {
    fn from(err: ValidationError) -> Self {
        MetabolicError::Validation(vec![err])
    }
}
