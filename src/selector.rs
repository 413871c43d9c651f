// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
	error::InstallError,
	manifest::{Unit, Units},
	prompt::Prompter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
	All,
	/// 1-based, as shown in the menu.
	One(usize),
	Stop,
}

impl Choice {
	/// Empty input means "all". Any negative number stops.
	pub fn parse(answer: &str, count: usize) -> Option<Choice> {
		let answer = answer.trim();
		if answer.is_empty() {
			return Some(Choice::All);
		}
		match answer.parse::<i64>().ok()? {
			0 => Some(Choice::All),
			n if n < 0 => Some(Choice::Stop),
			n => {
				let n = usize::try_from(n).ok()?;
				(n <= count).then_some(Choice::One(n))
			}
		}
	}
}

pub type Selection = Vec<(String, Unit)>;

/// Menu over the units that haven't been picked yet during this run.
pub struct Selector {
	remaining: Units,
}

impl Selector {
	pub fn new(units: Units) -> Self {
		Selector { remaining: units }
	}

	pub fn remaining(&self) -> &Units {
		&self.remaining
	}

	pub fn is_exhausted(&self) -> bool {
		self.remaining.is_empty()
	}

	pub fn menu(&self) -> String {
		let mut lines = vec!["[0] Default: Install all scripts".to_owned()];
		for (i, name) in self.remaining.keys().enumerate() {
			lines.push(format!("[{}] Install {name}", i + 1));
		}
		lines.push("[-1] Stop selecting scripts and exit".to_owned());
		lines.join("\n")
	}

	/// Takes the chosen units out of the remaining set. `None` means stop.
	pub fn take(&mut self, choice: Choice) -> Option<Selection> {
		match choice {
			Choice::Stop => None,
			Choice::All => Some(self.remaining.drain(..).collect()),
			Choice::One(n) => {
				let picked = self.remaining.shift_remove_index(n.checked_sub(1)?)?;
				Some(vec![picked])
			}
		}
	}

	/// Asks until a listed option is picked. `None` once the user stops or nothing is left.
	pub fn select_next(&mut self, prompter: &mut dyn Prompter) -> Result<Option<Selection>, InstallError> {
		if self.is_exhausted() {
			return Ok(None);
		}
		let question = format!("Please select what script(s) to install:\n{}", self.menu());
		loop {
			let answer = prompter.ask(&question)?;
			match Choice::parse(&answer, self.remaining().len()) {
				Some(choice) => {
					log::debug!("menu choice: {choice:?}");
					return Ok(self.take(choice));
				}
				None => println!("'{}' is not one of the listed options.", answer.trim()),
			}
		}
	}
}
