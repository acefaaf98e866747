//! Frame reading and the per-frame policy decisions

use crate::config::ParseOptions;
use crate::description::tag_description;
use crate::error::{ErrorKind, Result};
use crate::frame::content::FrameContent;
use crate::frame::header::{parse_frame_header, FrameHeader, ParsedFrameHeader};
use crate::frame::{layout, Frame, FrameFlags};
use crate::macros::{err, parse_mode_choice};
use crate::util::synchsafe::{SynchsafeInteger, UnsynchronizedStream};
use crate::version::Version;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// The result of a single frame read attempt
pub(crate) enum ParsedFrame {
	/// A fully decoded frame
	Next(Frame),
	/// A frame that could not be used, skipped over by its declared size
	Skip,
	/// Padding rather than a frame; the loop should stop
	KnownInvalidPadding,
	/// The reader is exhausted
	Eof,
}

impl ParsedFrame {
	/// Read one frame, header and content
	///
	/// When `budget` is given, a frame declaring more bytes than remain in the
	/// enclosing tag fails with [`ErrorKind::OversizedTag`](crate::error::ErrorKind::OversizedTag)
	/// before any content is consumed. The reader is always left positioned at
	/// the end of the frame's declared extent, including when the outcome is
	/// [`ParsedFrame::Skip`].
	///
	/// `tag_unsynchronised` is the tag header's unsynchronisation bit. In ID3v2.4
	/// it applies to every frame's content, whether or not the frame sets its own
	/// flag.
	pub(crate) fn read<R>(
		reader: &mut R,
		version: Version,
		parse_options: ParseOptions,
		budget: Option<u64>,
		tag_unsynchronised: bool,
	) -> Result<Self>
	where
		R: Read,
	{
		let parse_mode = parse_options.parsing_mode;

		let header = match parse_frame_header(reader, version, parse_mode)? {
			ParsedFrameHeader::Next(header) => header,
			ParsedFrameHeader::KnownInvalidPadding => return Ok(Self::KnownInvalidPadding),
			ParsedFrameHeader::Eof => return Ok(Self::Eof),
		};

		if let Some(budget) = budget {
			let extent = u64::from(version.frame_header_len()) + u64::from(header.size);
			if extent > budget {
				err!(OversizedTag);
			}
		}

		let flags = match parse_flags(&header, version) {
			Ok(flags) => flags,
			Err(e) if e.kind().is_soft() => {
				parse_mode_choice!(
					parse_mode,
					STRICT: return Err(e),
					DEFAULT: {
						log::warn!("Skipping frame \"{}\": {e}", header.id);
						return skip(reader, header.size);
					},
				);
			},
			Err(e) => return Err(e),
		};

		let unstuff = flags.unsynchronisation || tag_unsynchronised;

		if let Some(feature) = flags.unsupported() {
			if !parse_options.ignore_unsupported_flags {
				parse_mode_choice!(
					parse_mode,
					STRICT: err!(UnsupportedFrameFlags(feature)),
					DEFAULT: {
						log::warn!(
							"Skipping frame \"{}\": {feature} is not supported",
							header.id
						);
						return skip(reader, header.size);
					},
				);
			}

			// The content bytes cannot be decoded, but they can be carried
			log::debug!(
				"Frame \"{}\" uses {feature}, carrying its content as binary",
				header.id
			);
			return read_opaque(reader, header, flags, true, unstuff);
		}

		let description = tag_description(version);
		let frame_type = match description.frame_type(header.id.as_str()) {
			Some(frame_type) => frame_type,
			None if header.id.is_experimental() => {
				log::debug!("Experimental frame \"{}\", content kept as binary", header.id);
				return read_opaque(reader, header, flags, false, unstuff);
			},
			None => {
				parse_mode_choice!(
					parse_mode,
					STRICT: err!(UnrecognizedFrame(header.id.as_str().to_owned())),
					DEFAULT: {
						log::warn!("Skipping unrecognized frame \"{}\"", header.id);
						return skip(reader, header.size);
					},
				);
			},
		};

		let mut take = reader.by_ref().take(u64::from(header.size));

		if flags.data_length_indicator {
			if header.size < 4 {
				err!(CorruptFrameContent(
					"frame is too small for its data length indicator"
				));
			}

			// The indicator is synchsafe and sits before any unsynchronisation
			let unstuffed_len = take.read_u32::<BigEndian>()?.unsynch();
			log::trace!(
				"Frame \"{}\" declares {unstuffed_len} bytes of content",
				header.id
			);
		}

		let layout = layout::layout(version, frame_type)?;
		let mut content = FrameContent::empty(frame_type);

		let content_result = if unstuff {
			let mut unsynchronized = UnsynchronizedStream::new(&mut take);
			layout::read_content(&mut unsynchronized, layout, version, &mut content)
		} else {
			layout::read_content(&mut take, layout, version, &mut content)
		};

		// Stay frame-aligned for the caller regardless of how decoding went
		std::io::copy(&mut take, &mut std::io::sink())?;

		if let Err(e) = content_result {
			if !matches!(e.kind(), ErrorKind::CorruptFrameContent(_)) {
				return Err(e);
			}

			if parse_options.keep_corrupt_frames {
				log::warn!("Frame \"{}\" is corrupt, keeping partial content: {e}", header.id);
			} else {
				parse_mode_choice!(
					parse_mode,
					STRICT: return Err(e),
					DEFAULT: {
						log::warn!("Skipping corrupt frame \"{}\": {e}", header.id);
						// The content bytes were already drained above
						return Ok(Self::Skip);
					},
				);
			}
		}

		Ok(Self::Next(Frame::from_parts(header.id, flags, content)))
	}
}

fn parse_flags(header: &FrameHeader, version: Version) -> Result<FrameFlags> {
	match version {
		Version::V2_2 => Ok(FrameFlags::default()),
		Version::V2_3 => FrameFlags::parse_v23(header.raw_flags),
		Version::V2_4 => FrameFlags::parse_v24(header.raw_flags),
		Version::V1_0 => unreachable!("frame headers only exist in ID3v2"),
	}
}

fn skip<R>(reader: &mut R, size: u32) -> Result<ParsedFrame>
where
	R: Read,
{
	std::io::copy(&mut reader.take(u64::from(size)), &mut std::io::sink())?;
	Ok(ParsedFrame::Skip)
}

// `verbatim` carries the payload byte for byte, data length indicator and all. It is
// used for frames relying on transforms we do not implement (compression, encryption),
// where the indicator's decompressed-size value could not be recomputed at write time.
fn read_opaque<R>(
	reader: &mut R,
	header: FrameHeader,
	flags: FrameFlags,
	verbatim: bool,
	unstuff: bool,
) -> Result<ParsedFrame>
where
	R: Read,
{
	let mut size = header.size;
	if !verbatim && flags.data_length_indicator {
		if size < 4 {
			err!(CorruptFrameContent(
				"frame is too small for its data length indicator"
			));
		}
		// Recomputed on write
		reader.read_u32::<BigEndian>()?;
		size -= 4;
	}

	let mut data = vec![0; size as usize];
	reader.read_exact(&mut data)?;

	// Content is stored in its logical form; writing re-applies any stuffing
	if !verbatim && unstuff {
		let mut unstuffed = Vec::with_capacity(data.len());
		UnsynchronizedStream::new(&data[..]).read_to_end(&mut unstuffed)?;
		data = unstuffed;
	}

	let content = FrameContent::Binary(crate::frame::content::BinaryContent { data });
	Ok(ParsedFrame::Next(Frame::from_parts(header.id, flags, content)))
}
