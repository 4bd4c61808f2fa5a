// Button-press handler registry
//
// Handlers run synchronously on the thread that dispatches the press, one at
// a time, and always to completion before the next press is handled.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    A,
    B,
}

impl Button {
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown button: {0:?}")]
pub struct UnknownButton(pub String);

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Button::A),
            "b" => Ok(Button::B),
            _ => Err(UnknownButton(s.to_string())),
        }
    }
}

type Handler<C> = Box<dyn FnMut(&mut C)>;

/// Maps each button to at most one handler taking a shared context
pub struct ButtonRegistry<C> {
    handlers: HashMap<Button, Handler<C>>,
}

impl<C> Default for ButtonRegistry<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> ButtonRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a button, replacing any previous one
    pub fn on_press(&mut self, button: Button, handler: impl FnMut(&mut C) + 'static) {
        if self.handlers.insert(button, Box::new(handler)).is_some() {
            debug!("Replaced handler for button {}", button);
        }
    }

    /// Run the handler bound to `button`. Returns false if none is bound.
    pub fn dispatch(&mut self, button: Button, ctx: &mut C) -> bool {
        match self.handlers.get_mut(&button) {
            Some(handler) => {
                debug!("Dispatching button {}", button);
                handler(ctx);
                true
            }
            None => false,
        }
    }
}
