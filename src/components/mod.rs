//! Reusable UI pieces.

pub mod floor_map;
