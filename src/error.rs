//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// A GPU resource allocation was rejected by the device.
///
/// Fatal to the owning model only: the scene logs it and keeps rendering
/// the other models. Allocation failures are structural (zero size, over
/// the device limit, out of memory) so nothing retries automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceError {
    /// Label of the buffer or model the allocation belonged to.
    pub label: String,
    /// Why the device rejected the allocation.
    pub reason: String,
}

impl ResourceError {
    pub(crate) fn new(
        label: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resource creation failed for '{}': {}",
            self.label, self.reason
        )
    }
}

impl std::error::Error for ResourceError {}

/// Errors produced by the curvescope crate.
#[derive(Debug)]
pub enum CurvescopeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// GPU resource allocation failure.
    Resource(ResourceError),
    /// TOML options parsing failure.
    OptionsParse(String),
    /// Options parsed but hold out-of-range values.
    OptionsInvalid(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for CurvescopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Resource(e) => write!(f, "resource error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::OptionsInvalid(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for CurvescopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Resource(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CurvescopeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ResourceError> for CurvescopeError {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

impl From<std::io::Error> for CurvescopeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
