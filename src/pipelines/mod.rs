// SPDX-License-Identifier: MPL-2.0

//! Photo and video capture pipelines

pub mod photo;
pub mod video;
