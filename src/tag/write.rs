//! The ID3v2 tag write orchestrator
//!
//! Frames are serialized into a buffer first, so the header always carries the
//! final frame region size and no seeking is required of the writer.

use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::write::write_frame;
use crate::macros::err;
use crate::tag::header::write_tag_header;
use crate::tag::Tag;
use crate::util::synchsafe::unsynchronize;
use crate::version::Version;

use std::io::Write;

pub(crate) fn write_v2<W>(writer: &mut W, tag: &Tag, write_options: WriteOptions) -> Result<()>
where
	W: Write,
{
	let version = tag.version();
	if version == Version::V1_0 {
		err!(VersionMismatch {
			requested: version,
			reason: "the framed writer only handles ID3v2",
		});
	}

	let mut frames = Vec::new();
	let mut all_unsynchronised = !tag.is_empty();
	for frame in tag.frames() {
		let unsynchronised = write_frame(&mut frames, frame, version, write_options)?;
		all_unsynchronised &= unsynchronised;
	}

	match version {
		Version::V2_2 | Version::V2_3 => {
			// The transform is applied over the assembled frame region as the
			// final step; frame sizes inside refer to the unstuffed form
			let unsynchronised = write_options.unsynchronisation || tag.unsynchronised;
			let body = if unsynchronised {
				unsynchronize(&frames)
			} else {
				frames
			};

			write_tag_header(writer, version, unsynchronised, body.len() as u32)?;
			writer.write_all(&body)?;
		},
		Version::V2_4 => {
			// The tag-wide bit is only set when it is true of every frame
			write_tag_header(writer, version, all_unsynchronised, frames.len() as u32)?;
			writer.write_all(&frames)?;
		},
		_ => unreachable!(),
	}

	Ok(())
}
