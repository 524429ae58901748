//! Per-game runtime context handed to the subsystems that need it.

use std::collections::HashMap;

use crystal_data::{GameDef, GameValue};

/// Debug switch and the game's variable table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameContext {
    pub debug_mode: bool,
    variables: HashMap<String, GameValue>,
}

impl GameContext {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            debug_mode,
            variables: HashMap::new(),
        }
    }

    /// Context seeded with the variables declared by the game.
    pub fn from_game(game: &GameDef, debug_mode: bool) -> Self {
        Self {
            debug_mode,
            variables: game.variables.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&GameValue> {
        self.variables.get(name)
    }

    /// Set a variable, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<GameValue>) -> Option<GameValue> {
        self.variables.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<GameValue> {
        self.variables.remove(name)
    }

    /// Truthiness of a variable; unset variables are false.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(GameValue::is_truthy)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &GameValue)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
