use serde::{Deserialize, Serialize};

/// How a window that overhangs the grid edge is filled.
///
/// - `Replicate`: out-of-range positions take the nearest edge sample and
///   still count towards the window size (clamped indexing).
/// - `Truncate`: only in-range samples take part; averages divide by the
///   number of samples actually covered.
///
/// Order statistics (min) agree under both modes because a replicated edge
/// sample is already inside the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    #[default]
    Replicate,
    Truncate,
}
