//! progmem-assets - Library for turning layered PNG art into PROGMEM headers
//!
//! This library provides functionality to:
//! - Parse the line-oriented asset config
//! - Composite layer PNGs into one canvas per part, with resize and mirroring
//! - Encode pixels as RGB565 with a transparency sentinel
//! - Emit C headers for microcontroller firmware

pub mod build;
pub mod cli;
pub mod composition;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod output;
pub mod rgb565;
