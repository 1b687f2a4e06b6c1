//! Image encoding pipeline for Pixelveil.
//!
//! This module provides functionality for:
//! - Encoding images to PNG in their native channel layout
//! - Naming and writing the output file of each action
//!
//! # Examples
//!
//! ```ignore
//! use pixelveil_core::encode::{output_path, save_png};
//! use pixelveil_core::Action;
//!
//! let path = output_path(source, Action::Encrypt);
//! save_png(&encrypted, &path).unwrap();
//! ```

mod png;

pub use png::{encode_png, output_file_name, output_path, save_png, EncodeError, OUTPUT_EXTENSION};
