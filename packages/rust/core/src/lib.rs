//! Documentation pipeline for sdkdocs.
//!
//! This crate ties together version resolution, scaffolding, README pages,
//! `go doc` module pages, example pages and the Sphinx index into one
//! end-to-end run ([`pipeline::generate`]).

pub mod examples;
pub mod index;
pub mod layout;
pub mod modules;
pub mod pages;
pub mod pipeline;
pub mod process;
pub mod scaffold;
pub mod sphinx;
pub mod version;
