//! Perft: exhaustive legal-move tree counting.
//!
//! Node counts at fixed depths from well-known positions are published, so
//! perft is the standard way to prove a generator correct.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::debug;

use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, generated: &GeneratedMove) {
        let mv = &generated.mv;
        self.nodes += 1;
        self.captures += u64::from(mv.is_capture());
        self.en_passant += u64::from(mv.is_en_passant());
        self.castles += u64::from(mv.is_castle());
        self.promotions += u64::from(mv.is_promotion());
        if generated.gives_check {
            self.checks += 1;
            if !has_legal_move(&generated.position_after) {
                self.checkmates += 1;
            }
        }
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    let started = Instant::now();
    for generated in generator.generate_legal_moves(position) {
        perft_recurse(generator, &generated, depth - 1, &mut total);
    }
    debug!(depth, nodes = total.nodes, elapsed = ?started.elapsed(), "perft finished");
    total
}

/// Perft with one worker thread per root move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    position: &Position,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let started = Instant::now();
    let handles: Vec<_> = generator
        .generate_legal_moves(position)
        .into_iter()
        .map(|generated| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                let mut local = PerftCounts::default();
                perft_recurse(generator.as_ref(), &generated, depth - 1, &mut local);
                local
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
    debug!(
        depth,
        nodes = total.nodes,
        elapsed = ?started.elapsed(),
        "threaded perft finished"
    );
    total
}

/// Per-root-move node counts, sorted by coordinate notation ("divide").
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut rows: Vec<(String, u64)> = generator
        .generate_legal_moves(position)
        .into_iter()
        .map(|generated| {
            let mut counts = PerftCounts::default();
            perft_recurse(generator, &generated, depth - 1, &mut counts);
            (generated.mv.to_string(), counts.nodes)
        })
        .collect();
    rows.sort();
    rows
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    generated: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) {
    if remaining == 0 {
        counts.record_leaf(generated);
        return;
    }

    for child in generator.generate_legal_moves(&generated.position_after) {
        perft_recurse(generator, &child, remaining - 1, counts);
    }
}
