//! Browser front-end for rendering WebAssembly flame graphs.
//!
//! Drop a `.wasm` file onto the page (or pick one with the file chooser) and
//! the page navigates to the rendered flame graph as a downloadable SVG. The
//! actual rendering is done by a host-provided collaborator; this crate only
//! owns the drop/select interaction.
//!
//! This crate is intentionally a stub by default so native builds and plain
//! `cargo test` work without a wasm toolchain. Enable the real app with
//! `--features web` on a wasm32 target.

pub mod controller;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
