//! Demo widgets and scenes built on arbor.

/// The gallery scene: a header, a weighted grid of swatches and a footer button that opens a
/// modal dialog.
pub mod gallery;
/// Clickable color swatches.
pub mod swatch;

#[cfg(test)]
mod tests;
