//! The ID3v1.0 trailer codec
//!
//! ID3v1.0 is a fixed 128-byte block at the very end of the stream: a `TAG` marker
//! followed by seven null-padded Latin-1 fields. There are no headers, sizes, or
//! encodings to negotiate, so the fields bypass the layout engine entirely and are
//! modeled as text frames under the 3-character ids their roles carry in ID3v2.2.

use crate::description::TagDescription;
use crate::error::Result;
use crate::frame::content::{FrameContent, TextContent};
use crate::frame::Frame;
use crate::macros::err;
use crate::tag::Tag;
use crate::util::text::{self, TextEncoding};
use crate::version::Version;

use std::io::{Read, Seek, SeekFrom, Write};

pub(crate) const TAG_LEN: u64 = 128;

// The track byte and the genre index have no null padding to signal absence
const TRACK_ABSENT: u8 = 0;
const GENRE_ABSENT: u8 = 255;

/// Read the trailer, or `Ok(None)` when the stream carries none
pub(crate) fn read_tag<R>(reader: &mut R) -> Result<Option<Tag>>
where
	R: Read + Seek,
{
	let stream_len = reader.seek(SeekFrom::End(0))?;
	if stream_len < TAG_LEN {
		return Ok(None);
	}

	reader.seek(SeekFrom::End(-(TAG_LEN as i64)))?;

	let mut block = [0; TAG_LEN as usize];
	reader.read_exact(&mut block)?;

	if &block[..3] != b"TAG" {
		return Ok(None);
	}

	let mut tag = Tag::new(Version::V1_0);

	let mut offset = 3;
	for &(id, width) in TagDescription::v1_fields() {
		let raw = &block[offset..offset + width];
		offset += width;

		let value = match id {
			"TRK" => match raw[0] {
				TRACK_ABSENT => continue,
				track => track.to_string(),
			},
			"TCO" => match raw[0] {
				GENRE_ABSENT => continue,
				genre => genre.to_string(),
			},
			_ => {
				let decoded = text::latin1_decode_fixed(raw);
				if decoded.is_empty() {
					continue;
				}
				decoded
			},
		};

		let content = FrameContent::Text(TextContent {
			encoding: TextEncoding::Latin1,
			text: value,
		});
		tag.insert(Frame::new(id, content, Version::V1_0)?);
	}

	Ok(Some(tag))
}

/// Write the 128-byte trailer, null-padding fields the tag does not carry
pub(crate) fn write_tag<W>(writer: &mut W, tag: &Tag) -> Result<()>
where
	W: Write,
{
	if tag.version() != Version::V1_0 {
		err!(VersionMismatch {
			requested: tag.version(),
			reason: "only an ID3v1.0 tag fits the 128 byte trailer",
		});
	}

	let mut block = Vec::with_capacity(TAG_LEN as usize);
	block.extend_from_slice(b"TAG");

	for &(id, width) in TagDescription::v1_fields() {
		let value = tag.get(id).and_then(|frame| match &frame.content {
			FrameContent::Text(text) => Some(text.text.as_str()),
			_ => None,
		});

		match id {
			"TRK" => block.push(parse_byte_field(value).unwrap_or(TRACK_ABSENT)),
			"TCO" => block.push(parse_byte_field(value).unwrap_or(GENRE_ABSENT)),
			// The comment's last byte stays null so a full-width value cannot
			// run into the track byte
			"COM" => {
				block.extend_from_slice(&text::latin1_encode_fixed(
					value.unwrap_or_default(),
					width - 1,
				));
				block.push(0);
			},
			_ => {
				block.extend_from_slice(&text::latin1_encode_fixed(
					value.unwrap_or_default(),
					width,
				));
			},
		}
	}

	debug_assert_eq!(block.len(), TAG_LEN as usize);
	writer.write_all(&block)?;

	Ok(())
}

fn parse_byte_field(value: Option<&str>) -> Option<u8> {
	let parsed = value?.trim().parse::<u8>();
	match parsed {
		Ok(byte) => Some(byte),
		Err(_) => {
			log::warn!("Field value {:?} does not fit a single byte, dropping it", value);
			None
		},
	}
}
