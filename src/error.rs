//! Error types for the LED ring driver.
//!
//! Every fallible ring operation returns [`RingError`]. All variants are
//! `Copy` so they can be passed around without allocation, and each one maps
//! to a distinct recovery path for the caller:
//!
//! | Variant           | Cause                               | Recovery                     |
//! |-------------------|-------------------------------------|------------------------------|
//! | `IoInit`          | pin claim or configuration failed   | none, the ring is unusable   |
//! | `InvalidArgument` | bad level, position or status size  | retry with corrected input   |
//! | `IoWrite`         | GPIO write failed mid-frame         | reissue a full `set_*` call  |

use core::fmt;

use embedded_hal::digital::ErrorKind;

use crate::ports::PinId;

// ---------------------------------------------------------------------------
// Top-level ring error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// A pin could not be claimed or configured at construction.
    IoInit { pin: PinId, cause: InitFailure },
    /// The caller passed an out-of-range argument. No pin was touched.
    InvalidArgument(ArgumentError),
    /// A GPIO write failed while a frame was being shifted out.
    IoWrite { line: Line, kind: ErrorKind },
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoInit { pin, cause } => write!(f, "init GPIO{pin}: {cause}"),
            Self::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            Self::IoWrite { line, kind } => write!(f, "{line} line write failed: {kind}"),
        }
    }
}

impl std::error::Error for RingError {}

impl From<ArgumentError> for RingError {
    fn from(e: ArgumentError) -> Self {
        Self::InvalidArgument(e)
    }
}

// ---------------------------------------------------------------------------
// Construction failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitFailure {
    /// The pin does not exist or cannot be an output on this platform.
    Unavailable,
    /// The pin is already owned by another handle.
    Busy,
    /// The platform layer rejected the claim with a raw result code.
    Platform(i32),
    /// The pin was claimed but could not be driven to its idle level.
    Configure(ErrorKind),
}

impl fmt::Display for InitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "pin unavailable"),
            Self::Busy => write!(f, "pin already claimed"),
            Self::Platform(rc) => write!(f, "platform error (rc={})", rc),
            Self::Configure(kind) => write!(f, "could not drive idle level: {kind}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Argument validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// Level above the ring size.
    LevelOutOfRange(u8),
    /// Spinner position past the last LED.
    PositionOutOfRange(u8),
    /// Status sequence with the wrong number of entries.
    StatusLength(usize),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelOutOfRange(l) => write!(f, "level {l} exceeds 24"),
            Self::PositionOutOfRange(p) => write!(f, "position {p} exceeds 23"),
            Self::StatusLength(n) => write!(f, "status has {n} entries, expected 24"),
        }
    }
}

impl std::error::Error for ArgumentError {}

// ---------------------------------------------------------------------------
// Bus lines
// ---------------------------------------------------------------------------

/// One of the two wires of the MY9221 serial interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "data"),
            Self::Clock => write!(f, "clock"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Ring-wide `Result` alias.
pub type Result<T> = core::result::Result<T, RingError>;
