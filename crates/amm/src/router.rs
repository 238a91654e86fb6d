//! Token connectivity graph used to rule out unreachable searches early.

use crate::currency::Token;
use crate::pool::Pool;
use std::collections::{HashMap, HashSet, VecDeque};

/// Undirected graph of tokens, with one edge per pool between them.
#[derive(Debug, Default, Clone)]
pub struct TokenGraph {
    /// Maps each token to its neighbours and the number of pools linking them.
    edges: HashMap<Token, HashMap<Token, usize>>,
}

impl TokenGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the edge contributed by a pool.
    pub fn add_pool(&mut self, pool: &Pool) {
        let (a, b) = (pool.token0(), pool.token1());
        *self
            .edges
            .entry(a.clone())
            .or_default()
            .entry(b.clone())
            .or_default() += 1;
        *self
            .edges
            .entry(b.clone())
            .or_default()
            .entry(a.clone())
            .or_default() += 1;
    }

    /// Drop the edge contributed by a pool. Tokens linked by other pools stay
    /// connected.
    pub fn remove_pool(&mut self, pool: &Pool) {
        self.unlink(pool.token0(), pool.token1());
        self.unlink(pool.token1(), pool.token0());
    }

    fn unlink(&mut self, from: &Token, to: &Token) {
        let Some(neighbours) = self.edges.get_mut(from) else {
            return;
        };
        if let Some(count) = neighbours.get_mut(to) {
            *count -= 1;
            if *count == 0 {
                neighbours.remove(to);
            }
        }
        if neighbours.is_empty() {
            self.edges.remove(from);
        }
    }

    /// Every token that appears in at least one pool.
    pub fn tokens(&self) -> Vec<Token> {
        self.edges.keys().cloned().collect()
    }

    /// Tokens directly tradeable against `token`.
    pub fn neighbours(&self, token: &Token) -> HashSet<Token> {
        self.edges
            .get(token)
            .map(|n| n.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Tokens reachable from `from` within `max_hops` pools, excluding `from`.
    pub fn reachable_tokens(&self, from: &Token, max_hops: usize) -> HashSet<Token> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((from, 0usize));
        visited.insert(from);

        while let Some((current, depth)) = queue.pop_front() {
            if depth == max_hops {
                continue;
            }
            if let Some(neighbours) = self.edges.get(current) {
                for neighbour in neighbours.keys() {
                    if visited.insert(neighbour) {
                        queue.push_back((neighbour, depth + 1));
                    }
                }
            }
        }

        visited.remove(from);
        visited.into_iter().cloned().collect()
    }

    /// Whether `to` can be reached from `from` within `max_hops` pools.
    pub fn has_path(&self, from: &Token, to: &Token, max_hops: usize) -> bool {
        if from == to {
            return true;
        }
        self.reachable_tokens(from, max_hops).contains(to)
    }
}
