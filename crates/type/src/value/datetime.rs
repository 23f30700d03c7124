// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A point in time, stored as nanoseconds since the Unix epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateTime {
	nanos: i64,
}

impl DateTime {
	pub fn from_nanos(nanos: i64) -> Self {
		Self {
			nanos,
		}
	}

	pub fn from_timestamp(seconds: i64) -> Option<Self> {
		seconds.checked_mul(NANOS_PER_SECOND).map(Self::from_nanos)
	}

	pub fn to_nanos(&self) -> i64 {
		self.nanos
	}

	pub fn timestamp(&self) -> i64 {
		self.nanos.div_euclid(NANOS_PER_SECOND)
	}

	pub fn subsec_nanos(&self) -> u32 {
		self.nanos.rem_euclid(NANOS_PER_SECOND) as u32
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let seconds = self.timestamp();
		let days = seconds.div_euclid(86_400);
		let secs_of_day = seconds.rem_euclid(86_400);
		let (year, month, day) = civil_from_days(days);

		write!(
			f,
			"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
			year,
			month,
			day,
			secs_of_day / 3600,
			(secs_of_day % 3600) / 60,
			secs_of_day % 60,
			self.subsec_nanos()
		)
	}
}

// Howard Hinnant's days-to-civil conversion
fn civil_from_days(days: i64) -> (i64, u32, u32) {
	let z = days + 719_468;
	let era = z.div_euclid(146_097);
	let doe = z.rem_euclid(146_097);
	let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
	let month = if mp < 10 {
		mp + 3
	} else {
		mp - 9
	} as u32;
	let year = yoe + era * 400 + i64::from(month <= 2);
	(year, month, day)
}
