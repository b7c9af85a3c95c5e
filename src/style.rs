//! The fixed set of graph layouts the viewer page knows how to draw.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UnknownStyle;

/// A graph-rendering style offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleOption {
	/// Nodes scattered at random positions.
	#[default]
	Random,
	/// Nodes placed on the corners of a regular polygon.
	Polygon,
	/// Nodes laid out in rows by topological level.
	TopologicallySorted,
}

impl StyleOption {
	/// Every option, in the order they are offered.
	pub const ALL: [StyleOption; 3] = [
		StyleOption::Random,
		StyleOption::Polygon,
		StyleOption::TopologicallySorted,
	];

	/// Spelling written into the viewer input; the page switches on it verbatim.
	pub fn wire_name(self) -> &'static str {
		match self {
			StyleOption::Random => "random",
			StyleOption::Polygon => "polygon",
			StyleOption::TopologicallySorted => "topologically sorted",
		}
	}

	/// Spelling used on the command line and in configuration files.
	pub fn as_str(self) -> &'static str {
		match self {
			StyleOption::Random => "random",
			StyleOption::Polygon => "polygon",
			StyleOption::TopologicallySorted => "topologically-sorted",
		}
	}

	/// Look up an option by its 1-based position in [`StyleOption::ALL`].
	pub fn from_position(position: usize) -> Option<Self> {
		position
			.checked_sub(1)
			.and_then(|index| Self::ALL.get(index).copied())
	}
}

impl fmt::Display for StyleOption {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for StyleOption {
	type Err = UnknownStyle;

	/// Accepts the wire, kebab and snake spellings, ignoring case and
	/// surrounding whitespace.
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized: String = value
			.trim()
			.chars()
			.map(|ch| match ch {
				' ' | '_' => '-',
				other => other.to_ascii_lowercase(),
			})
			.collect();

		match normalized.as_str() {
			"random" => Ok(StyleOption::Random),
			"polygon" => Ok(StyleOption::Polygon),
			"topologically-sorted" => Ok(StyleOption::TopologicallySorted),
			_ => Err(UnknownStyle {
				name: value.to_string(),
			}),
		}
	}
}

impl Serialize for StyleOption {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for StyleOption {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}
