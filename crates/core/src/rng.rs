//! RNG module - injectable symbol sources
//!
//! Board generation and cascade refills draw symbols through the
//! [`SymbolSource`] trait so the engine never touches ambient randomness.
//! [`SimpleRng`] is a seeded LCG (same seed, same boards); [`ScriptedSource`]
//! replays a fixed symbol list for tests.

use crate::types::{Symbol, SYMBOL_COUNT};

/// Anything that can hand out symbols for generation and refill.
pub trait SymbolSource {
    fn next_symbol(&mut self) -> Symbol;
}

impl<S: SymbolSource + ?Sized> SymbolSource for &mut S {
    fn next_symbol(&mut self) -> Symbol {
        (**self).next_symbol()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period, which would make `% 8` repeat every 8 draws.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (the seed to resume this exact sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl SymbolSource for SimpleRng {
    fn next_symbol(&mut self) -> Symbol {
        Symbol::wrapping(self.next_range(SYMBOL_COUNT as u32))
    }
}

/// Cycles through a fixed list of symbols forever.
///
/// An empty script behaves like `[0]`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<Symbol>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            script: script.into_iter().collect(),
            pos: 0,
        }
    }

    /// Build from raw indices, wrapping each into the alphabet
    pub fn from_indices(indices: &[u8]) -> Self {
        Self::new(indices.iter().map(|&v| Symbol::wrapping(v as u32)))
    }

    /// Always yields the same symbol
    pub fn constant(symbol: Symbol) -> Self {
        Self::new([symbol])
    }

    /// Number of symbols handed out so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl SymbolSource for ScriptedSource {
    fn next_symbol(&mut self) -> Symbol {
        let symbol = if self.script.is_empty() {
            Symbol::wrapping(0)
        } else {
            self.script[self.pos % self.script.len()]
        };
        self.pos += 1;
        symbol
    }
}
