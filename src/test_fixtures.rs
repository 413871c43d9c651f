// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory stand-ins for the terminal and the network.

use std::{
	cell::RefCell,
	collections::{HashMap, VecDeque},
};

use crate::{error::InstallError, fetch::HttpFetcher, prompt::Prompter};

/// Replays canned answers in order and records every question asked.
pub struct ScriptedPrompter {
	answers: VecDeque<String>,
	questions: Vec<String>,
}

impl ScriptedPrompter {
	pub fn new<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
		ScriptedPrompter {
			answers: answers.into_iter().map(str::to_owned).collect(),
			questions: Vec::new(),
		}
	}

	pub fn questions(&self) -> &[String] {
		&self.questions
	}

	pub fn unanswered(&self) -> usize {
		self.answers.len()
	}
}

impl Prompter for ScriptedPrompter {
	fn ask(&mut self, question: &str) -> Result<String, InstallError> {
		self.questions.push(question.to_owned());
		match self.answers.pop_front() {
			Some(answer) => Ok(answer),
			None => panic!("no scripted answer left for: {question}"),
		}
	}
}

/// Serves fixed bodies by exact URL; anything else is a network error.
#[derive(Default)]
pub struct MockFetcher {
	bodies: HashMap<String, Vec<u8>>,
	requested: RefCell<Vec<String>>,
}

impl MockFetcher {
	pub fn new() -> Self {
		MockFetcher::default()
	}

	pub fn with(self, url: &str, body: &str) -> Self {
		self.with_bytes(url, body.as_bytes().to_vec())
	}

	pub fn with_bytes(mut self, url: &str, body: Vec<u8>) -> Self {
		let _ = self.bodies.insert(url.to_owned(), body);
		self
	}

	pub fn requested(&self) -> Vec<String> {
		self.requested.borrow().clone()
	}
}

impl HttpFetcher for MockFetcher {
	fn fetch(&self, url: &str) -> Result<Vec<u8>, InstallError> {
		self.requested.borrow_mut().push(url.to_owned());
		self.bodies
			.get(url)
			.cloned()
			.ok_or_else(|| InstallError::network(url, "404 Not Found"))
	}
}
