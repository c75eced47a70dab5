//! Core library for the Parlo language-practice platform: the placement
//! interview that seeds a learner's starting level and the progression engine
//! that moves it afterwards.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
