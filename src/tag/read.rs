//! The ID3v2 tag read orchestrator

use crate::config::ParseOptions;
use crate::error::Result;
use crate::frame::read::ParsedFrame;
use crate::macros::err;
use crate::tag::header::{
	parse_tag_header, EXTENDED_HEADER_FLAG, FOOTER_FLAG,
};
use crate::tag::Tag;
use crate::util::synchsafe::{SynchsafeInteger, UnsynchronizedStream};
use crate::version::Version;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// Parse an ID3v2 tag from the reader's current position
pub(crate) fn parse_v2<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Tag>>
where
	R: Read,
{
	let Some(header) = parse_tag_header(reader, parse_options.parsing_mode)? else {
		return Ok(None);
	};

	let version = header.version;
	log::debug!(
		"Reading ID3v2.{}.{} tag, {} byte frame region",
		version.major(),
		header.revision,
		header.size
	);

	if header.footer && !parse_options.ignore_unsupported_flags {
		err!(UnsupportedTagFlags(FOOTER_FLAG));
	}

	if header.extended_header && !parse_options.ignore_unsupported_flags {
		err!(UnsupportedTagFlags(EXTENDED_HEADER_FLAG));
	}

	let mut tag = Tag::new(version);

	if header.unsynchronisation && version < Version::V2_4 {
		// The transform covers the whole frame region, extended header included.
		// Sizes inside refer to the unstuffed form, so the declared tag size
		// cannot budget the loop; it only bounds the physical bytes.
		tag.unsynchronised = true;

		let take = reader.by_ref().take(u64::from(header.size));
		let mut unstuffed = UnsynchronizedStream::new(take);

		if header.extended_header {
			skip_extended_header(&mut unstuffed, version)?;
		}

		loop {
			match ParsedFrame::read(&mut unstuffed, version, parse_options, None, false)? {
				ParsedFrame::Next(frame) => {
					tag.insert(frame);
				},
				ParsedFrame::Skip => {},
				ParsedFrame::KnownInvalidPadding | ParsedFrame::Eof => break,
			}
		}

		// Leave the reader at the end of the declared region
		let mut take = unstuffed.into_inner();
		std::io::copy(&mut take, &mut std::io::sink())?;

		return Ok(Some(tag));
	}

	// ID3v2.4 sizes count stuffed bytes, so the transform is undone per frame
	// whether declared tag-wide or on the frame itself
	tag.unsynchronised = header.unsynchronisation;

	let mut remaining = u64::from(header.size);
	if header.extended_header {
		let consumed = skip_extended_header(reader, version)?;
		remaining = remaining.saturating_sub(consumed);
	}

	// Only v2.4 reaches this loop with the bit set, where it applies to every
	// frame's content
	let tag_unsynchronised = header.unsynchronisation;

	let frame_header_len = u64::from(version.frame_header_len());
	while remaining >= frame_header_len {
		let mut take = reader.by_ref().take(remaining);

		match ParsedFrame::read(
			&mut take,
			version,
			parse_options,
			Some(remaining),
			tag_unsynchronised,
		)? {
			ParsedFrame::Next(frame) => {
				remaining = take.limit();
				tag.insert(frame);
			},
			ParsedFrame::Skip => {
				remaining = take.limit();
			},
			ParsedFrame::KnownInvalidPadding => {
				remaining = take.limit();
				break;
			},
			ParsedFrame::Eof => {
				remaining = 0;
				break;
			},
		}
	}

	// Trailing padding, or a final sliver too short for a header
	if remaining > 0 {
		std::io::copy(&mut reader.by_ref().take(remaining), &mut std::io::sink())?;
	}

	Ok(Some(tag))
}

// Nothing in the extended header affects frame decoding, so it is skipped whole.
// Only reachable with `ignore_unsupported_flags`.
fn skip_extended_header<R>(reader: &mut R, version: Version) -> Result<u64>
where
	R: Read,
{
	let consumed = match version {
		// 4-byte size, exclusive of itself
		Version::V2_2 | Version::V2_3 => {
			let size = reader.read_u32::<BigEndian>()?;
			std::io::copy(&mut reader.take(u64::from(size)), &mut std::io::sink())?;
			u64::from(size) + 4
		},
		// Synchsafe size, inclusive of itself
		Version::V2_4 => {
			let size = reader.read_u32::<BigEndian>()?.unsynch();
			let rest = u64::from(size).saturating_sub(4);
			std::io::copy(&mut reader.take(rest), &mut std::io::sink())?;
			u64::from(size)
		},
		Version::V1_0 => unreachable!("no ID3v2 header was parsed for ID3v1.0"),
	};

	log::debug!("Skipped {consumed} byte extended header");
	Ok(consumed)
}
