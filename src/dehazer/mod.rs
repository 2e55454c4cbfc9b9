//! Dehazing pipeline built on the dark-channel prior.
//!
//! Stages, in order:
//! - dark channel: per-pixel channel minimum followed by a `patch × patch`
//!   min filter;
//! - atmospheric light: mean colour of the haziest `ratio` fraction of
//!   pixels, ranked by dark channel;
//! - coarse transmission `1 − ω · dark(I / A)`;
//! - guided-filter refinement against a grayscale guide (luminance of the
//!   input unless one is supplied);
//! - radiance recovery `J = (I − A) / max(t, t0) + A`, clamped to 8 bits.
//!
//! Modules
//! - [`params`] – configuration shared by the library and the demo binary.
//! - `pipeline` – the [`Dehazer`] implementation and the [`dehaze`] shortcut.

pub mod params;
mod pipeline;

pub use params::DehazeParams;
pub use pipeline::{dehaze, Dehazer};
