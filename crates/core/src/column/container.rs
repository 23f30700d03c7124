// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Values of one column plus a definedness bit per slot. Undefined slots
/// hold `T::default()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container<T> {
	data: Vec<T>,
	bitvec: Vec<bool>,
}

impl<T> Default for Container<T> {
	fn default() -> Self {
		Self {
			data: Vec::new(),
			bitvec: Vec::new(),
		}
	}
}

impl<T: Clone + Default> Container<T> {
	pub fn new(data: Vec<T>) -> Self {
		let bitvec = vec![true; data.len()];
		Self {
			data,
			bitvec,
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			data: Vec::with_capacity(capacity),
			bitvec: Vec::with_capacity(capacity),
		}
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn push(&mut self, value: T) {
		self.data.push(value);
		self.bitvec.push(true);
	}

	pub fn push_undefined(&mut self) {
		self.data.push(T::default());
		self.bitvec.push(false);
	}

	pub fn push_option(&mut self, value: Option<T>) {
		match value {
			Some(v) => self.push(v),
			None => self.push_undefined(),
		}
	}

	pub fn is_defined(&self, idx: usize) -> bool {
		self.bitvec.get(idx).copied().unwrap_or(false)
	}

	pub fn get(&self, idx: usize) -> Option<&T> {
		if self.is_defined(idx) {
			self.data.get(idx)
		} else {
			None
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
		self.data.iter().zip(self.bitvec.iter()).map(|(v, defined)| defined.then_some(v))
	}

	pub fn extend(&mut self, other: &Container<T>) {
		self.data.extend_from_slice(&other.data);
		self.bitvec.extend_from_slice(&other.bitvec);
	}

	pub fn clear(&mut self) {
		self.data.clear();
		self.bitvec.clear();
	}
}

impl<T: Clone + Default> FromIterator<Option<T>> for Container<T> {
	fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
		let mut result = Container::default();
		for value in iter {
			result.push_option(value);
		}
		result
	}
}
