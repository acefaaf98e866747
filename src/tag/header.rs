//! The ID3v2 tag header codec

use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{err, parse_mode_choice};
use crate::util::synchsafe::SynchsafeInteger;
use crate::version::Version;

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

pub(crate) const UNSYNCHRONISATION_FLAG: u8 = 0x80;
pub(crate) const EXTENDED_HEADER_FLAG: u8 = 0x40;
pub(crate) const EXPERIMENTAL_FLAG: u8 = 0x20;
pub(crate) const FOOTER_FLAG: u8 = 0x10;

/// The decoded 10-byte `ID3` header
pub(crate) struct TagHeader {
	pub(crate) version: Version,
	pub(crate) revision: u8,
	pub(crate) unsynchronisation: bool,
	pub(crate) extended_header: bool,
	pub(crate) footer: bool,
	/// Frame region size in physical bytes, exclusive of this header
	pub(crate) size: u32,
}

/// Parse the tag header, or `Ok(None)` when the reader does not start with one
///
/// # Errors
///
/// * An unknown major version ([`ErrorKind::UnsupportedVersion`](crate::error::ErrorKind::UnsupportedVersion))
/// * Undefined flag bits in [`ParsingMode::Strict`] ([`ErrorKind::UnsupportedTagFlags`](crate::error::ErrorKind::UnsupportedTagFlags))
/// * A non-synchsafe size in [`ParsingMode::Strict`] ([`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch))
pub(crate) fn parse_tag_header<R>(
	reader: &mut R,
	parse_mode: ParsingMode,
) -> Result<Option<TagHeader>>
where
	R: Read,
{
	let mut ident = [0; 3];
	let mut filled = 0;
	while filled < ident.len() {
		let n = reader.read(&mut ident[filled..])?;
		if n == 0 {
			break;
		}
		filled += n;
	}

	if filled < ident.len() || &ident != b"ID3" {
		return Ok(None);
	}

	let major = reader.read_u8()?;
	let revision = reader.read_u8()?;
	let flags = reader.read_u8()?;

	let version = match major {
		2 => Version::V2_2,
		3 => Version::V2_3,
		4 => Version::V2_4,
		_ => err!(UnsupportedVersion(major, revision)),
	};

	let defined =
		UNSYNCHRONISATION_FLAG | EXTENDED_HEADER_FLAG | EXPERIMENTAL_FLAG | FOOTER_FLAG;
	if flags & !defined != 0 {
		parse_mode_choice!(
			parse_mode,
			STRICT: err!(UnsupportedTagFlags(flags)),
			DEFAULT: log::warn!("Tag header has undefined flag bits set ({flags:#04x})"),
		);
	}

	if flags & EXPERIMENTAL_FLAG == EXPERIMENTAL_FLAG {
		log::debug!("Tag is flagged experimental");
	}

	let raw_size = reader.read_u32::<BigEndian>()?;
	if raw_size & 0x8080_8080 != 0 {
		parse_mode_choice!(
			parse_mode,
			STRICT: err!(SizeMismatch),
			DEFAULT: log::warn!("Tag header declares a non-synchsafe size, clearing high bits"),
		);
	}

	Ok(Some(TagHeader {
		version,
		revision,
		unsynchronisation: flags & UNSYNCHRONISATION_FLAG == UNSYNCHRONISATION_FLAG,
		extended_header: flags & EXTENDED_HEADER_FLAG == EXTENDED_HEADER_FLAG,
		footer: flags & FOOTER_FLAG == FOOTER_FLAG,
		size: raw_size.unsynch(),
	}))
}

/// Write the 10-byte tag header with the final frame region size
pub(crate) fn write_tag_header<W>(
	writer: &mut W,
	version: Version,
	unsynchronisation: bool,
	size: u32,
) -> Result<()>
where
	W: Write,
{
	let major = match version {
		Version::V2_2 => 2,
		Version::V2_3 => 3,
		Version::V2_4 => 4,
		Version::V1_0 => {
			err!(VersionMismatch {
				requested: version,
				reason: "the ID3 header only exists in ID3v2",
			});
		},
	};

	writer.write_all(b"ID3")?;
	writer.write_u8(major)?;
	writer.write_u8(0)?;
	writer.write_u8(if unsynchronisation { UNSYNCHRONISATION_FLAG } else { 0 })?;
	writer.write_u32::<BigEndian>(size.synch()?)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{parse_tag_header, write_tag_header};
	use crate::config::ParsingMode;
	use crate::version::Version;

	#[test_log::test]
	fn header_round_trip() {
		let mut bytes = Vec::new();
		write_tag_header(&mut bytes, Version::V2_3, true, 257).unwrap();
		assert_eq!(bytes, *b"ID3\x03\x00\x80\x00\x00\x02\x01");

		let header = parse_tag_header(&mut &bytes[..], ParsingMode::Strict)
			.unwrap()
			.expect("a tag header");
		assert_eq!(header.version, Version::V2_3);
		assert!(header.unsynchronisation);
		assert!(!header.extended_header);
		assert_eq!(header.size, 257);
	}

	#[test_log::test]
	fn no_tag_is_benign() {
		let bytes = b"RIFF\x00\x00";
		assert!(parse_tag_header(&mut &bytes[..], ParsingMode::Strict)
			.unwrap()
			.is_none());
		assert!(parse_tag_header(&mut &b""[..], ParsingMode::Strict)
			.unwrap()
			.is_none());
	}

	#[test_log::test]
	fn unknown_major_is_fatal() {
		let bytes = b"ID3\x05\x00\x00\x00\x00\x00\x00";
		assert!(parse_tag_header(&mut &bytes[..], ParsingMode::Lenient).is_err());
	}

	#[test_log::test]
	fn undefined_flag_bits_by_mode() {
		let bytes = b"ID3\x04\x00\x0F\x00\x00\x00\x00";
		assert!(parse_tag_header(&mut &bytes[..], ParsingMode::Strict).is_err());
		assert!(parse_tag_header(&mut &bytes[..], ParsingMode::Lenient)
			.unwrap()
			.is_some());
	}
}
