//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation correctness
//! - `draw.rs` - Game-end predicates (mate, stalemate, draw rules)
//! - `apply.rs` - Applying moves and playing them by name
//! - `edge_cases.rs` - Castling, en passant, promotion, evasions, odd boards
//! - `proptest.rs` - Property-based tests over random playouts

mod edge_cases;
mod perft;
mod proptest;
