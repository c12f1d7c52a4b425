#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use plonebake::answers::GitConfigLookup;
use plonebake::error::Result;
use plonebake::prompt::Prompter;

/// Git configuration backed by a fixed map.
#[derive(Default)]
pub struct MapLookup(pub HashMap<String, String>);

impl MapLookup {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self(entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }
}

impl GitConfigLookup for MapLookup {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Prompter answering from a script and recording what it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<(String, String)>>,
    pub reports: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(inputs: &[&str]) -> Self {
        Self { inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()), ..Default::default() }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, prompt: &str, default: &str) -> Result<String> {
        self.asked.borrow_mut().push((prompt.to_string(), default.to_string()));
        Ok(self.inputs.borrow_mut().pop_front().unwrap_or_default())
    }

    fn confirm(&self, skip: bool, _prompt: String) -> Result<bool> {
        Ok(skip)
    }

    fn report(&self, message: &str) {
        self.reports.borrow_mut().push(message.to_string());
    }
}
