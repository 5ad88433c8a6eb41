//! # Base types for gambit
//!
//! This is an auxiliary crate for `gambit`, which contains the board vocabulary: files, ranks,
//! squares, sides, piece kinds, square sets and board geometry.
//!
//! Normally you don't want to use this crate directly. Use `gambit` instead, which re-exports
//! everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
