#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod candidates;
pub mod codec;
pub mod generator;
pub mod grid;
pub mod propagation;
pub mod search;
pub mod selection;
pub mod topology;
pub mod uniqueness;
