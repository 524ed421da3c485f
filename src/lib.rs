//! Rudolph - adaptive roommate-compatibility elicitation engine
//!
//! This crate implements the comparison-game questionnaire for the
//! student-housing marketplace: a sequenced mix of dimension-scored
//! questions and incomparable forced-choice pairs, accumulated into a
//! per-user dimension profile and resolved to a personality bucket, with
//! streak and reward side-channels.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
