#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod display;
mod tree;

// -----------------------------------------------------------------------------
// Top-level exports

pub use tree::{Entry, Tree};
