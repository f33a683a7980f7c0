#![warn(missing_docs)]

//! # `slitherlink`
//!
//! A solver for [Slither Link](https://en.wikipedia.org/wiki/Slither_Link), built on a generic deduction and
//! backtracking engine.
//! Begin by loading a board with [`load_compact`](builder::load_compact) or [`load_full`](builder::load_full), or build
//! one with a [`BoardBuilder`], then hand it to [`SlitherSolver::solve`].
//!
//! ```
//! use slitherlink::builder::load_compact;
//! use slitherlink::engine::CompletionStatus;
//! use slitherlink::SlitherSolver;
//!
//! let board = load_compact(&[
//!     "3..",
//!     "..3",
//!     ".3.",
//! ]).unwrap();
//! let solved = SlitherSolver::new().solve(board);
//! assert_ne!(solved.status, CompletionStatus::Incomplete);
//! ```
//!
//! # Internals
//! The [`engine`] knows nothing about Slither Link. A puzzle implements [`Domain`](engine::Domain) and registers rules:
//!
//! 1. Rules deduce what they can from the board, and rerun until nothing changes. Local rules inspect one cell and its
//! neighborhood; topological rules additionally see global structure recomputed from the board, such as the
//! [tracks](topology::TrackTopology) formed by drawn lines.
//! 2. When deduction stalls, the engine tries hypotheses on copies of the board. A hypothesis that leads to a
//! contradiction is recorded as false on the parent board, which often lets deduction resume. Surviving hypotheses are
//! ranked and searched depth first. Boards already seen are skipped, as remembered by a bounded
//! [`FingerprintCache`](engine::FingerprintCache).
//!
//! For Slither Link the hypotheses are single lines, grown from the ends of the tracks drawn so far.

pub use board::Board;
pub use builder::BoardBuilder;
pub use location::Location;
pub use solver::{SlitherDomain, SlitherSolver, SlitherState};

pub mod board;
pub mod builder;
pub mod cell;
pub mod engine;
pub mod error;
pub mod location;
pub mod render;
pub mod rules;
pub mod shape;
pub(crate) mod solver;
pub mod topology;
