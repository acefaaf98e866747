//! Frame writing
//!
//! Content is serialized to a buffer first so the header can be emitted with the
//! final size. ID3v2.2 and ID3v2.3 frames are written in their logical form; the
//! tag-wide unsynchronisation transform, when requested, is applied by the tag
//! writer over the assembled frame region. ID3v2.4 applies unsynchronisation per
//! frame here.

use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::header::write_frame_header;
use crate::frame::{layout, Frame};
use crate::macros::err;
use crate::util::synchsafe::{unsynchronize, SynchsafeInteger};
use crate::version::Version;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Serialize one frame, returning whether its content was unsynchronised
pub(crate) fn write_frame<W>(
	writer: &mut W,
	frame: &Frame,
	version: Version,
	write_options: WriteOptions,
) -> Result<bool>
where
	W: Write,
{
	if version == Version::V1_0 {
		err!(VersionMismatch {
			requested: version,
			reason: "framed writing only exists in ID3v2",
		});
	}

	if frame.id.as_str().len() != version.frame_id_len() {
		err!(VersionMismatch {
			requested: version,
			reason: "frame id length does not match the version's id width",
		});
	}

	// Frames relying on transforms we do not implement were carried byte for
	// byte at read time and go back out the same way
	if frame.flags.unsupported().is_some() {
		return write_verbatim(writer, frame, version);
	}

	let layout = layout::layout(version, frame.content.frame_type())?;
	let mut content = Vec::new();
	layout::write_content(&mut content, layout, version, &frame.content)?;

	match version {
		Version::V2_2 => {
			write_frame_header(writer, &frame.id, content.len() as u32, 0, version)?;
			writer.write_all(&content)?;
			Ok(false)
		},
		Version::V2_3 => {
			write_frame_header(
				writer,
				&frame.id,
				content.len() as u32,
				frame.flags.as_u16_v23(),
				version,
			)?;
			writer.write_all(&content)?;
			Ok(false)
		},
		Version::V2_4 => {
			let unstuffed_len = content.len() as u32;

			let mut flags = frame.flags;
			flags.unsynchronisation =
				frame.flags.unsynchronisation || write_options.unsynchronisation;
			if flags.unsynchronisation {
				content = unsynchronize(&content);
			}

			let mut size = content.len() as u32;
			if flags.data_length_indicator {
				size += 4;
			}

			write_frame_header(writer, &frame.id, size, flags.as_u16_v24(), version)?;
			if flags.data_length_indicator {
				writer.write_u32::<BigEndian>(unstuffed_len.synch()?)?;
			}
			writer.write_all(&content)?;

			Ok(flags.unsynchronisation)
		},
		Version::V1_0 => unreachable!(),
	}
}

fn write_verbatim<W>(writer: &mut W, frame: &Frame, version: Version) -> Result<bool>
where
	W: Write,
{
	use crate::frame::content::FrameContent;

	let FrameContent::Binary(binary) = &frame.content else {
		err!(UnsupportedFrameFlags(
			"frames using unimplemented transforms only carry binary content"
		));
	};

	let raw_flags = match version {
		Version::V2_3 => frame.flags.as_u16_v23(),
		Version::V2_4 => frame.flags.as_u16_v24(),
		// v2.2 has no flag bytes, so nothing marks the content as transformed
		_ => {
			err!(VersionMismatch {
				requested: version,
				reason: "transformed frames cannot be represented before ID3v2.3",
			});
		},
	};

	write_frame_header(writer, &frame.id, binary.data.len() as u32, raw_flags, version)?;
	writer.write_all(&binary.data)?;

	Ok(false)
}
