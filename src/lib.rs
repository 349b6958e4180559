//! `hypercon` builds the LED layout of a
//! [Hyperion](https://github.com/hyperion-project/hyperion) ambient lighting setup.
//!
//! # Structure
//!
//! A [models::FrameTopology] describes how many LEDs sit around the screen and in which order
//! they are wired, while [models::SamplingParameters] describe which part of the picture each
//! LED averages. [models::construct] resolves both into a list of [models::LedPlacement], which
//! can be turned into the `leds` section of the daemon configuration through
//! [models::ToLeds].
//!
//! The [settings] module persists the builder inputs between runs.
//!
//! # License
//!
//! This source code is released under the [MIT-License](https://opensource.org/licenses/MIT)

#[macro_use]
extern crate tracing;

pub mod models;
pub mod settings;
