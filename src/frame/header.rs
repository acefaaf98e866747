//! Versioned frame header codecs
//!
//! Header parsing is purely structural: id bytes, declared size, raw flag word.
//! Policy (known-id sets, flag support, parsing mode fallout) belongs to the
//! read loop in [`super::read`].

use crate::config::ParsingMode;
use crate::error::Result;
use crate::frame::FrameId;
use crate::macros::{err, parse_mode_choice};
use crate::util::synchsafe::SynchsafeInteger;
use crate::version::Version;

use std::borrow::Cow;
use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// The structural fields of one frame header
pub(crate) struct FrameHeader {
	pub(crate) id: FrameId,
	/// Declared content size in physical bytes (ID3v2.4 synchsafe already decoded)
	pub(crate) size: u32,
	/// The raw flag word; always 0 for ID3v2.2
	pub(crate) raw_flags: u16,
}

/// The outcome of one header parse attempt
pub(crate) enum ParsedFrameHeader {
	/// A frame header follows
	Next(FrameHeader),
	/// Bytes known to be padding rather than a frame: a leading null, or the
	/// `MP3e` filler some historical taggers wrote
	KnownInvalidPadding,
	/// The reader is exhausted
	Eof,
}

fn read_id<R>(reader: &mut R, len: usize) -> Result<Option<Vec<u8>>>
where
	R: Read,
{
	let mut id = vec![0; len];

	// A short read here is the end of the frame region, not corruption
	let mut filled = 0;
	while filled < len {
		let n = reader.read(&mut id[filled..])?;
		if n == 0 {
			return Ok(None);
		}
		filled += n;
	}

	Ok(Some(id))
}

/// Parse one frame header
///
/// # Errors
///
/// * The id contains characters outside `A-Z0-9` ([`ErrorKind::BadFrameId`](crate::error::ErrorKind::BadFrameId))
/// * An ID3v2.4 size is not synchsafe in [`ParsingMode::Strict`] ([`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch))
/// * `version` is [`Version::V1_0`], which has no frame headers ([`ErrorKind::VersionMismatch`](crate::error::ErrorKind::VersionMismatch))
pub(crate) fn parse_frame_header<R>(
	reader: &mut R,
	version: Version,
	parse_mode: ParsingMode,
) -> Result<ParsedFrameHeader>
where
	R: Read,
{
	if version == Version::V1_0 {
		err!(VersionMismatch {
			requested: version,
			reason: "frame headers only exist in ID3v2",
		});
	}

	let Some(id) = read_id(reader, version.frame_id_len())? else {
		return Ok(ParsedFrameHeader::Eof);
	};

	if id[0] == 0 {
		return Ok(ParsedFrameHeader::KnownInvalidPadding);
	}

	// MP3ext wrote its padding as a fake frame
	if id == b"MP3e" {
		return Ok(ParsedFrameHeader::KnownInvalidPadding);
	}

	FrameId::verify_id(&id)?;

	// The id bytes were just verified ASCII
	let id = FrameId(Cow::Owned(String::from_utf8(id)?));

	let (size, raw_flags) = match version {
		Version::V2_2 => (reader.read_u24::<BigEndian>()?, 0),
		Version::V2_3 => (reader.read_u32::<BigEndian>()?, reader.read_u16::<BigEndian>()?),
		Version::V2_4 => {
			let raw_size = reader.read_u32::<BigEndian>()?;
			if raw_size & 0x8080_8080 != 0 {
				parse_mode_choice!(
					parse_mode,
					STRICT: err!(SizeMismatch),
					DEFAULT: log::warn!(
						"Frame \"{id}\" declares a non-synchsafe size, clearing high bits"
					),
				);
			}

			(raw_size.unsynch(), reader.read_u16::<BigEndian>()?)
		},
		Version::V1_0 => unreachable!(),
	};

	Ok(ParsedFrameHeader::Next(FrameHeader { id, size, raw_flags }))
}

/// Write one frame header with the final content size
///
/// # Errors
///
/// * `size` exceeds the version's size field ([`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch))
pub(crate) fn write_frame_header<W>(
	writer: &mut W,
	id: &FrameId,
	size: u32,
	raw_flags: u16,
	version: Version,
) -> Result<()>
where
	W: Write,
{
	debug_assert_eq!(id.as_str().len(), version.frame_id_len());

	writer.write_all(id.as_str().as_bytes())?;

	match version {
		Version::V2_2 => {
			if size > 0x00FF_FFFF {
				err!(SizeMismatch);
			}
			writer.write_u24::<BigEndian>(size)?;
		},
		Version::V2_3 => {
			writer.write_u32::<BigEndian>(size)?;
			writer.write_u16::<BigEndian>(raw_flags)?;
		},
		Version::V2_4 => {
			writer.write_u32::<BigEndian>(size.synch()?)?;
			writer.write_u16::<BigEndian>(raw_flags)?;
		},
		Version::V1_0 => {
			err!(VersionMismatch {
				requested: version,
				reason: "frame headers only exist in ID3v2",
			});
		},
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{parse_frame_header, write_frame_header, ParsedFrameHeader};
	use crate::config::ParsingMode;
	use crate::version::Version;

	#[test_log::test]
	fn v22_header() {
		let bytes = [b"TT2".as_slice(), &[0x00, 0x00, 0x0E]].concat();
		let parsed = parse_frame_header(&mut &bytes[..], Version::V2_2, ParsingMode::Strict).unwrap();

		let ParsedFrameHeader::Next(header) = parsed else {
			panic!("expected a frame header");
		};
		assert_eq!(header.id.as_str(), "TT2");
		assert_eq!(header.size, 14);
		assert_eq!(header.raw_flags, 0);
	}

	#[test_log::test]
	fn v23_header() {
		let bytes = [b"MCDI".as_slice(), &[0x00, 0x00, 0x00, 0x04, 0xE0, 0xE0]].concat();
		let parsed = parse_frame_header(&mut &bytes[..], Version::V2_3, ParsingMode::Strict).unwrap();

		let ParsedFrameHeader::Next(header) = parsed else {
			panic!("expected a frame header");
		};
		assert_eq!(header.id.as_str(), "MCDI");
		assert_eq!(header.size, 4);
		assert_eq!(header.raw_flags, 0xE0E0);
	}

	#[test_log::test]
	fn v24_synchsafe_size() {
		// 0x01 0x7F synchsafe = 255
		let bytes = [b"TIT2".as_slice(), &[0x00, 0x00, 0x01, 0x7F, 0x00, 0x00]].concat();
		let parsed = parse_frame_header(&mut &bytes[..], Version::V2_4, ParsingMode::Strict).unwrap();

		let ParsedFrameHeader::Next(header) = parsed else {
			panic!("expected a frame header");
		};
		assert_eq!(header.size, 255);
	}

	#[test_log::test]
	fn v24_non_synchsafe_size_by_mode() {
		let bytes = [b"TIT2".as_slice(), &[0x00, 0x00, 0x00, 0x80, 0x00, 0x00]].concat();

		assert!(parse_frame_header(&mut &bytes[..], Version::V2_4, ParsingMode::Strict).is_err());

		let parsed =
			parse_frame_header(&mut &bytes[..], Version::V2_4, ParsingMode::Lenient).unwrap();
		let ParsedFrameHeader::Next(header) = parsed else {
			panic!("expected a frame header");
		};
		assert_eq!(header.size, 0);
	}

	#[test_log::test]
	fn padding_sentinels() {
		let null_padding = [0u8; 10];
		assert!(matches!(
			parse_frame_header(&mut &null_padding[..], Version::V2_3, ParsingMode::Strict).unwrap(),
			ParsedFrameHeader::KnownInvalidPadding
		));

		let mp3ext = b"MP3e\x00\x00\x00\x00\x00\x00";
		assert!(matches!(
			parse_frame_header(&mut &mp3ext[..], Version::V2_3, ParsingMode::Strict).unwrap(),
			ParsedFrameHeader::KnownInvalidPadding
		));

		assert!(matches!(
			parse_frame_header(&mut &[][..], Version::V2_3, ParsingMode::Strict).unwrap(),
			ParsedFrameHeader::Eof
		));
	}

	#[test_log::test]
	fn bad_id_is_a_hard_error() {
		let bytes = [b"ti\x01".as_slice(), &[0x00, 0x00, 0x00]].concat();
		assert!(parse_frame_header(&mut &bytes[..], Version::V2_2, ParsingMode::Lenient).is_err());
	}

	#[test_log::test]
	fn write_matches_parse() {
		use crate::frame::FrameId;

		let id = FrameId::new("TALB", Version::V2_4).unwrap();
		let mut bytes = Vec::new();
		write_frame_header(&mut bytes, &id, 255, 0x0002, Version::V2_4).unwrap();
		assert_eq!(bytes, [b"TALB".as_slice(), &[0x00, 0x00, 0x01, 0x7F, 0x00, 0x02]].concat());
	}
}
