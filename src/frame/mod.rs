//! ID3v2 frames

pub mod content;
pub(crate) mod header;
pub(crate) mod layout;
pub(crate) mod read;
pub(crate) mod write;

use crate::description::{tag_description, FrameType};
use crate::error::Result;
use crate::macros::err;
use crate::version::Version;

use content::FrameContent;

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// A validated frame identifier
///
/// Ids are 3 characters in ID3v1.0 and ID3v2.2, 4 in ID3v2.3 and ID3v2.4, drawn
/// from `A-Z0-9`. Ids starting with `X`, `Y`, or `Z` are reserved for experimental
/// use and are never part of a version's known-id set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(Cow<'static, str>);

impl FrameId {
	/// Create a `FrameId` for use with `version`
	///
	/// # Errors
	///
	/// * The id's length does not match the version's id width ([`ErrorKind::VersionMismatch`](crate::error::ErrorKind::VersionMismatch))
	/// * The id contains characters outside `A-Z0-9` ([`ErrorKind::BadFrameId`](crate::error::ErrorKind::BadFrameId))
	pub fn new(id: impl Into<Cow<'static, str>>, version: Version) -> Result<Self> {
		let id = id.into();

		if id.len() != version.frame_id_len() {
			err!(VersionMismatch {
				requested: version,
				reason: "frame id length does not match the version's id width",
			});
		}

		Self::verify_id(id.as_bytes())?;
		Ok(Self(id))
	}

	pub(crate) fn verify_id(id: &[u8]) -> Result<()> {
		if id.iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
			return Ok(());
		}

		err!(BadFrameId(id.to_vec()))
	}

	/// Whether the id falls in the experimental `X`/`Y`/`Z` range
	pub fn is_experimental(&self) -> bool {
		matches!(self.0.as_bytes().first(), Some(b'X' | b'Y' | b'Z'))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Various flags to describe the content of a frame
///
/// ID3v2.2 frames have no flag bytes; all fields read as unset and are
/// ignored when writing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// Frame belongs in a group with other frames
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame is encrypted
	pub encryption: bool,
	/// Frame is unsynchronised
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	pub data_length_indicator: bool,
}

// Bits outside these masks are undefined by the respective revision
const INVALID_MASK_V2_3: u16 = 0x1F1F;
const INVALID_MASK_V2_4: u16 = 0x8FB0;

impl FrameFlags {
	/// Parse the flags from an ID3v2.3 frame header
	///
	/// # Errors
	///
	/// * A bit outside the revision's defined set is set ([`ErrorKind::InvalidHeaderFlags`](crate::error::ErrorKind::InvalidHeaderFlags))
	pub(crate) fn parse_v23(flags: u16) -> Result<Self> {
		if flags & INVALID_MASK_V2_3 != 0 {
			err!(InvalidHeaderFlags {
				flags,
				invalid_mask: INVALID_MASK_V2_3,
			});
		}

		Ok(Self {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			grouping_identity: flags & 0x0020 == 0x0020,
			..Self::default()
		})
	}

	/// Parse the flags from an ID3v2.4 frame header
	///
	/// # Errors
	///
	/// * A bit outside the revision's defined set is set ([`ErrorKind::InvalidHeaderFlags`](crate::error::ErrorKind::InvalidHeaderFlags))
	pub(crate) fn parse_v24(flags: u16) -> Result<Self> {
		if flags & INVALID_MASK_V2_4 != 0 {
			err!(InvalidHeaderFlags {
				flags,
				invalid_mask: INVALID_MASK_V2_4,
			});
		}

		Ok(Self {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		})
	}

	pub(crate) fn as_u16_v23(self) -> u16 {
		u16::from(self.tag_alter_preservation) << 15
			| u16::from(self.file_alter_preservation) << 14
			| u16::from(self.read_only) << 13
			| u16::from(self.compression) << 7
			| u16::from(self.encryption) << 6
			| u16::from(self.grouping_identity) << 5
	}

	pub(crate) fn as_u16_v24(self) -> u16 {
		u16::from(self.tag_alter_preservation) << 14
			| u16::from(self.file_alter_preservation) << 13
			| u16::from(self.read_only) << 12
			| u16::from(self.grouping_identity) << 6
			| u16::from(self.compression) << 3
			| u16::from(self.encryption) << 2
			| u16::from(self.unsynchronisation) << 1
			| u16::from(self.data_length_indicator)
	}

	/// The first flagged feature whose content transform we do not implement, if any
	pub(crate) fn unsupported(self) -> Option<&'static str> {
		if self.compression {
			return Some("compression");
		}
		if self.encryption {
			return Some("encryption");
		}
		if self.grouping_identity {
			return Some("grouping identity");
		}

		None
	}
}

/// A tag frame: an id, its flags, and a typed payload
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
	pub(crate) id: FrameId,
	pub flags: FrameFlags,
	pub content: FrameContent,
}

impl Frame {
	/// Create a frame for use with `version`, validating the id against the
	/// version's known-id set
	///
	/// # Errors
	///
	/// * The id is malformed for `version` (see [`FrameId::new`])
	/// * The id is known but its payload shape does not match `content`
	///   ([`ErrorKind::CorruptFrameContent`](crate::error::ErrorKind::CorruptFrameContent))
	pub fn new(
		id: impl Into<Cow<'static, str>>,
		content: FrameContent,
		version: Version,
	) -> Result<Self> {
		let id = FrameId::new(id, version)?;

		if let Some(frame_type) = tag_description(version).frame_type(id.as_str()) {
			if frame_type != content.frame_type() {
				err!(CorruptFrameContent("payload shape does not match the frame id"));
			}
		}

		Ok(Self {
			id,
			flags: FrameFlags::default(),
			content,
		})
	}

	pub(crate) fn from_parts(id: FrameId, flags: FrameFlags, content: FrameContent) -> Self {
		Self { id, flags, content }
	}

	pub fn id(&self) -> &FrameId {
		&self.id
	}

	/// The [`FrameType`] of the payload
	pub fn frame_type(&self) -> FrameType {
		self.content.frame_type()
	}

	/// The payload text, for text-like payloads
	pub fn text(&self) -> Option<&str> {
		match &self.content {
			FrameContent::Text(text) => Some(&text.text),
			FrameContent::Comment(comment) => Some(&comment.text),
			FrameContent::Url(url) => Some(&url.url),
			FrameContent::UserText(user) => Some(&user.value),
			FrameContent::UserUrl(user) => Some(&user.url),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Frame, FrameFlags, FrameId};
	use crate::frame::content::{FrameContent, TextContent};
	use crate::version::Version;

	#[test_log::test]
	fn id_width_is_version_checked() {
		assert!(FrameId::new("TIT2", Version::V2_3).is_ok());
		assert!(FrameId::new("TIT2", Version::V2_2).is_err());
		assert!(FrameId::new("TT2", Version::V2_2).is_ok());
		assert!(FrameId::new("TT2", Version::V2_4).is_err());
	}

	#[test_log::test]
	fn id_character_set() {
		assert!(FrameId::new("TP1", Version::V2_2).is_ok());
		assert!(FrameId::new("tp1", Version::V2_2).is_err());
		assert!(FrameId::new("TP\u{1}", Version::V2_2).is_err());
	}

	#[test_log::test]
	fn experimental_ids() {
		assert!(FrameId::new("XSOP", Version::V2_3).unwrap().is_experimental());
		assert!(!FrameId::new("TIT2", Version::V2_3).unwrap().is_experimental());
	}

	#[test_log::test]
	fn v23_flags_round_trip() {
		let parsed = FrameFlags::parse_v23(0xE0E0).unwrap();
		assert!(parsed.tag_alter_preservation);
		assert!(parsed.file_alter_preservation);
		assert!(parsed.read_only);
		assert!(parsed.compression);
		assert!(parsed.encryption);
		assert!(parsed.grouping_identity);
		assert_eq!(parsed.as_u16_v23(), 0xE0E0);
	}

	#[test_log::test]
	fn v23_flags_invalid_bits() {
		let err = FrameFlags::parse_v23(0x0010).unwrap_err();
		match err.kind() {
			crate::error::ErrorKind::InvalidHeaderFlags {
				flags,
				invalid_mask,
			} => {
				assert_eq!(*flags, 0x0010);
				assert_eq!(*invalid_mask, 0x1F1F);
			},
			other => panic!("unexpected error kind: {other:?}"),
		}

		assert!(FrameFlags::parse_v23(0x1000).is_err());
	}

	#[test_log::test]
	fn v24_flags_round_trip() {
		let parsed = FrameFlags::parse_v24(0x7043).unwrap();
		assert!(parsed.grouping_identity);
		assert!(parsed.unsynchronisation);
		assert!(parsed.data_length_indicator);
		assert_eq!(parsed.as_u16_v24(), 0x7043);
	}

	#[test_log::test]
	fn v24_flags_invalid_bits() {
		assert!(FrameFlags::parse_v24(0x8000).is_err());
		assert!(FrameFlags::parse_v24(0x0080).is_err());
	}

	#[test_log::test]
	fn frame_payload_shape_checked() {
		let text = FrameContent::Text(TextContent::default());

		assert!(Frame::new("TIT2", text.clone(), Version::V2_3).is_ok());
		// APIC is a picture frame
		assert!(Frame::new("APIC", text, Version::V2_3).is_err());
	}
}
