//! Tags and their read/write entry points

pub(crate) mod header;
pub(crate) mod read;
pub(crate) mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::description::{tag_description, FrameMeaning};
use crate::error::Result;
use crate::frame::Frame;
use crate::version::Version;

use std::io::{Read, Seek, Write};

/// An ID3 tag: an ordered, id-unique collection of frames
///
/// Frame order is preserved from insertion (and from the source stream when read), so
/// an unmodified tag writes back in its original frame order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
	version: Version,
	frames: Vec<Frame>,
	/// Whether the source tag had the tag-wide unsynchronisation transform applied
	pub(crate) unsynchronised: bool,
}

impl Tag {
	/// Create an empty tag of `version`
	#[must_use]
	pub fn new(version: Version) -> Self {
		Self {
			version,
			frames: Vec::new(),
			unsynchronised: false,
		}
	}

	pub fn version(&self) -> Version {
		self.version
	}

	/// Whether the source bytes were unsynchronised
	///
	/// An unmodified tag writes back with the same transform so the output is
	/// byte identical to the input.
	pub fn is_unsynchronised(&self) -> bool {
		self.unsynchronised
	}

	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Get a frame by its id
	pub fn get(&self, id: &str) -> Option<&Frame> {
		self.frames.iter().find(|frame| frame.id.as_str() == id)
	}

	/// Get the frame filling `meaning` in this tag's version
	pub fn get_meaning(&self, meaning: FrameMeaning) -> Option<&Frame> {
		let id = tag_description(self.version).id_for(meaning)?;
		self.get(id)
	}

	/// Insert a frame, replacing any frame with the same id
	///
	/// An empty payload never displaces a non-empty one; other than that, the
	/// newer frame wins. Returns the frame that lost.
	pub fn insert(&mut self, frame: Frame) -> Option<Frame> {
		match self.frames.iter_mut().find(|f| f.id == frame.id) {
			Some(existing) => {
				if frame.content.is_empty() && !existing.content.is_empty() {
					log::debug!(
						"Duplicate frame \"{}\" with empty content, keeping the existing one",
						frame.id
					);
					return Some(frame);
				}

				Some(std::mem::replace(existing, frame))
			},
			None => {
				self.frames.push(frame);
				None
			},
		}
	}

	/// Remove and return the frame with `id`
	pub fn remove(&mut self, id: &str) -> Option<Frame> {
		let pos = self.frames.iter().position(|frame| frame.id.as_str() == id)?;
		Some(self.frames.remove(pos))
	}

	/// Read an ID3v2 tag from the reader's current position
	///
	/// Returns `Ok(None)` when no `ID3` header starts there.
	pub fn read<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Self>>
	where
		R: Read,
	{
		read::parse_v2(reader, parse_options)
	}

	/// Read an ID3v1.0 tag from the 128-byte trailer of the stream
	///
	/// Returns `Ok(None)` when the stream carries no trailer.
	pub fn read_v1<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read + Seek,
	{
		crate::v1::read_tag(reader)
	}

	/// Serialize the tag
	///
	/// ID3v1.0 tags always occupy exactly 128 bytes; ID3v2 tags are emitted
	/// header first with the final frame region size.
	pub fn write<W>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()>
	where
		W: Write,
	{
		match self.version {
			Version::V1_0 => crate::v1::write_tag(writer, self),
			_ => write::write_v2(writer, self, write_options),
		}
	}

	/// Convert the tag to `dest`, stepping through intermediate versions
	///
	/// See [`crate::conversion::convert_tag`].
	pub fn convert(self, dest: Version) -> Result<Self> {
		crate::conversion::convert_tag(self, dest)
	}
}
