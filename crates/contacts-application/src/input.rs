//! Line input abstraction for the console.

use contacts_core::error::Result;
use std::collections::VecDeque;

/// One read from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or closed input
    Eof,
}

/// Something the console can prompt and read lines from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

/// A `LineSource` replaying a fixed script, then reporting end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<Input>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(|l| Input::Line(l.into())).collect(),
            prompts: Vec::new(),
        }
    }

    /// Appends an arbitrary input, e.g. an interrupt.
    pub fn push(&mut self, input: Input) {
        self.inputs.push_back(input);
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front().unwrap_or(Input::Eof))
    }
}
