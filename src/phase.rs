//! The closed set of phases a host pipeline can announce.
//!
//! A phase type is any fieldless enum deriving [`strum_macros::EnumIter`] and
//! a `Display` impl; the tracker iterates it in declaration order so every
//! report lists phases in the same stable order.

use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A value from a closed, compile-time enumeration of pipeline phases.
///
/// Blanket-implemented, so a host only needs the derives:
///
/// ```rust
/// use strum_macros::{Display, EnumIter};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
/// #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
/// enum Stage {
///     Download,
///     Unpack,
/// }
///
/// fn assert_phase<P: phase_tracker::Phase>() {}
/// assert_phase::<Stage>();
/// ```
pub trait Phase: Copy + Eq + Hash + Display + IntoEnumIterator + Send + 'static {}

impl<T> Phase for T where T: Copy + Eq + Hash + Display + IntoEnumIterator + Send + 'static {}

/// Phases of a batch index population job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexPopulationPhase {
    Scan,
    Write,
    Merge,
    Build,
    ApplyExternal,
    Flip,
}
