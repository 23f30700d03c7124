// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, ops::Deref, sync::Arc};

use strata_type::{Result, error::diagnostic::function::function_not_found, return_error};

/// A registered external function: its name and the opaque payload the
/// worker needs to reconstruct it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
	pub name: String,
	pub payload: Arc<[u8]>,
}

#[derive(Clone, Debug)]
pub struct Functions(Arc<FunctionsInner>);

impl Functions {
	pub fn empty() -> Functions {
		Functions::builder().build()
	}

	pub fn builder() -> FunctionsBuilder {
		FunctionsBuilder {
			inner: FunctionsInner {
				functions: HashMap::new(),
			},
		}
	}
}

impl Deref for Functions {
	type Target = FunctionsInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Default for Functions {
	fn default() -> Self {
		Functions::empty()
	}
}

#[derive(Clone, Debug)]
pub struct FunctionsInner {
	functions: HashMap<String, FunctionDef>,
}

impl FunctionsInner {
	pub fn get_function(&self, name: &str) -> Option<&FunctionDef> {
		self.functions.get(name)
	}

	pub fn has_function(&self, name: &str) -> bool {
		self.functions.contains_key(name)
	}

	/// Looks up `name`, failing with a configuration error if it is not registered.
	pub fn resolve(&self, name: &str) -> Result<FunctionDef> {
		match self.functions.get(name) {
			Some(def) => Ok(def.clone()),
			None => return_error!(function_not_found(name)),
		}
	}

	pub fn len(&self) -> usize {
		self.functions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.functions.is_empty()
	}

	/// Registered names in ascending order.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

pub struct FunctionsBuilder {
	inner: FunctionsInner,
}

impl FunctionsBuilder {
	/// Registers `payload` under `name`. A later registration with the same
	/// name replaces the earlier one.
	pub fn with_function(mut self, name: &str, payload: impl Into<Vec<u8>>) -> Self {
		let payload: Vec<u8> = payload.into();
		self.inner.functions.insert(
			name.to_string(),
			FunctionDef {
				name: name.to_string(),
				payload: Arc::from(payload),
			},
		);
		self
	}

	pub fn build(self) -> Functions {
		Functions(Arc::new(self.inner))
	}
}

#[cfg(test)]
mod tests {
	use strata_type::{ErrorKind, error::diagnostic::function::function_not_found};

	use super::Functions;

	#[test]
	fn test_resolve() {
		let functions = Functions::builder().with_function("add", b"payload".to_vec()).build();

		let def = functions.resolve("add").unwrap();
		assert_eq!(def.name, "add");
		assert_eq!(&*def.payload, b"payload");
		assert!(functions.has_function("add"));
	}

	#[test]
	fn test_resolve_missing() {
		let functions = Functions::empty();
		let err = functions.resolve("nope").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Configuration);
		assert_eq!(err.diagnostic(), function_not_found("nope"));
	}

	#[test]
	fn test_later_registration_wins() {
		let functions = Functions::builder().with_function("f", vec![1u8]).with_function("f", vec![2u8]).build();
		assert_eq!(functions.len(), 1);
		assert_eq!(&*functions.get_function("f").unwrap().payload, &[2u8]);
	}

	#[test]
	fn test_names_sorted() {
		let functions = Functions::builder().with_function("b", vec![]).with_function("a", vec![]).build();
		assert_eq!(functions.names(), vec!["a", "b"]);
	}
}
