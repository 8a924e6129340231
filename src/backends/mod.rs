// SPDX-License-Identifier: MPL-2.0

//! Device and file input boundaries

pub mod camera;
pub mod file_source;
