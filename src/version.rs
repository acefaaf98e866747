//! The four supported on-disk tag layouts

use std::fmt::{Display, Formatter};

/// An ID3 tag version
///
/// The four layouts are mutually incompatible: they differ in header layout, integer
/// encoding, frame-ID length, and flag semantics. Versions are totally ordered and form
/// a linear conversion path (see [`crate::conversion`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum Version {
	/// ID3v1.0, the 128 byte trailer at the end of the file
	V1_0,
	/// ID3v2.2, 3 character frame IDs
	V2_2,
	/// ID3v2.3, 4 character frame IDs, plain big-endian frame sizes
	V2_3,
	/// ID3v2.4, 4 character frame IDs, synchsafe frame sizes
	V2_4,
}

impl Version {
	/// The number of characters in this version's frame IDs
	pub fn frame_id_len(self) -> usize {
		match self {
			Version::V1_0 | Version::V2_2 => 3,
			Version::V2_3 | Version::V2_4 => 4,
		}
	}

	/// The size of a frame header in bytes
	///
	/// ID3v1.0 frames have no header at all, their layout is fixed per ID.
	pub fn frame_header_len(self) -> u32 {
		match self {
			Version::V1_0 => 0,
			Version::V2_2 => 6,
			Version::V2_3 | Version::V2_4 => 10,
		}
	}

	/// The `major` byte written in an ID3v2 tag header
	pub(crate) fn major(self) -> u8 {
		match self {
			Version::V1_0 => 1,
			Version::V2_2 => 2,
			Version::V2_3 => 3,
			Version::V2_4 => 4,
		}
	}

	/// The ordered list of versions from `self` to `dest`, inclusive
	///
	/// Versions are totally ordered, so there is exactly one path.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3vx::version::Version;
	///
	/// let path = Version::V1_0.conversion_path(Version::V2_3);
	/// assert_eq!(path, [Version::V1_0, Version::V2_2, Version::V2_3]);
	///
	/// let path = Version::V2_4.conversion_path(Version::V2_2);
	/// assert_eq!(path, [Version::V2_4, Version::V2_3, Version::V2_2]);
	/// ```
	pub fn conversion_path(self, dest: Version) -> Vec<Version> {
		const ORDERED: [Version; 4] = [Version::V1_0, Version::V2_2, Version::V2_3, Version::V2_4];

		let src_idx = ORDERED.iter().position(|v| *v == self).unwrap();
		let dest_idx = ORDERED.iter().position(|v| *v == dest).unwrap();

		if src_idx <= dest_idx {
			ORDERED[src_idx..=dest_idx].to_vec()
		} else {
			let mut path = ORDERED[dest_idx..=src_idx].to_vec();
			path.reverse();
			path
		}
	}
}

impl Display for Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Version::V1_0 => write!(f, "ID3v1.0"),
			Version::V2_2 => write!(f, "ID3v2.2"),
			Version::V2_3 => write!(f, "ID3v2.3"),
			Version::V2_4 => write!(f, "ID3v2.4"),
		}
	}
}
