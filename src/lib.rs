//! This crate provides routines for decoding Aseprite ASE/ASEPRITE
//! animated sprite files.
//!
//! A document is decoded in a single forward pass over any seekable
//! byte source.  The result owns all of its layers, frames, cels,
//! tags, slices and palette, and is released by dropping it or by
//! calling `Document::release`.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! if let Ok(doc) = ase::Document::open(Path::new("ex.aseprite")) {
//!     for (i, frame) in doc.frames.iter().enumerate() {
//!         println!("frame {}: {} ms, {} cels", i, frame.duration, frame.cels.len());
//!     }
//!     doc.release();
//! }
//! ```

extern crate byteorder;
extern crate flate2;
extern crate libc;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub use ase::{read_document,ASE_MAGIC,ASE_FRAME_MAGIC};
pub use document::*;
pub use errcode::{AseError,AseResult};

pub mod chunk;
pub mod cursor;
pub mod document;
pub mod errcode;
pub mod ffi;

mod ase;
