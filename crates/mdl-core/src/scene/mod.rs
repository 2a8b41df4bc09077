//! Compiled scripts and the built-in demo scenes.

pub mod demos;

use crate::ops::{Operation, SymbolTable};

/// A compiled MDL program: the ordered command list and its symbol table.
#[derive(Clone, Debug, Default)]
pub struct Script {
    pub commands: Vec<Operation>,
    pub symbols: SymbolTable,
}

impl Script {
    pub fn new(commands: Vec<Operation>, symbols: SymbolTable) -> Self {
        Self { commands, symbols }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
