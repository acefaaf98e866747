//! Typed frame payloads
//!
//! Content objects are plain value holders with no format knowledge; the wire layout
//! lives in [`crate::frame::layout`]. Textual variants remember the [`TextEncoding`]
//! they were read with so a write reproduces the original bytes.

use crate::description::FrameType;
use crate::util::text::TextEncoding;

/// A plain text payload (`T...` frames)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextContent {
	/// The encoding of `text`
	pub encoding: TextEncoding,
	/// The text itself
	pub text: String,
}

/// A language-tagged comment payload (`COM`/`COMM`, `ULT`/`USLT`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CommentContent {
	/// The encoding of `description` and `text`
	pub encoding: TextEncoding,
	/// ISO-639-2 language code, 3 Latin-1 characters
	pub language: String,
	/// A short content description
	pub description: String,
	/// The comment itself
	pub text: String,
}

/// A Latin-1 URL payload (`W...` frames)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UrlContent {
	/// The URL itself
	pub url: String,
}

/// A user-defined text payload (`TXX`/`TXXX`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UserTextContent {
	/// The encoding of `description` and `value`
	pub encoding: TextEncoding,
	/// What the value describes
	pub description: String,
	/// The value itself
	pub value: String,
}

/// A user-defined URL payload (`WXX`/`WXXX`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UserUrlContent {
	/// The encoding of `description`
	pub encoding: TextEncoding,
	/// What the URL points at
	pub description: String,
	/// The URL itself, always Latin-1
	pub url: String,
}

/// A null-delimited list of strings (`IPL`/`IPLS`/`TIPL`/`TMCL`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StringListContent {
	/// The encoding of every value
	pub encoding: TextEncoding,
	/// The values, in wire order
	pub values: Vec<String>,
}

/// An attached picture payload (`PIC`/`APIC`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PictureContent {
	/// The encoding of `description`
	pub encoding: TextEncoding,
	/// The MIME type of `data`
	///
	/// ID3v2.2 stores a 3 character image format code instead; it is mapped to a MIME
	/// string on read, and unknown codes are carried through verbatim.
	pub mime: String,
	/// The picture type byte (`0x00..=0x14`; anything else clamps to 0, "Other")
	pub picture_type: u8,
	/// A short description of the picture
	pub description: String,
	/// The image data itself
	pub data: Vec<u8>,
}

/// An opaque binary payload
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BinaryContent {
	/// The raw content bytes
	pub data: Vec<u8>,
}

/// The typed payload of a [`Frame`](crate::frame::Frame)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FrameContent {
	/// Plain text
	Text(TextContent),
	/// Language-tagged comment or lyrics
	Comment(CommentContent),
	/// A Latin-1 URL
	Url(UrlContent),
	/// User-defined text
	UserText(UserTextContent),
	/// User-defined URL
	UserUrl(UserUrlContent),
	/// A list of strings
	StringList(StringListContent),
	/// An attached picture
	Picture(PictureContent),
	/// Opaque binary data
	Binary(BinaryContent),
}

impl FrameContent {
	/// An empty payload of the given shape, ready to be filled by the codec engine
	pub(crate) fn empty(frame_type: FrameType) -> Self {
		match frame_type {
			FrameType::Text => Self::Text(TextContent::default()),
			FrameType::Comment => Self::Comment(CommentContent::default()),
			FrameType::Url => Self::Url(UrlContent::default()),
			FrameType::UserText => Self::UserText(UserTextContent::default()),
			FrameType::UserUrl => Self::UserUrl(UserUrlContent::default()),
			FrameType::StringList => Self::StringList(StringListContent::default()),
			FrameType::Picture => Self::Picture(PictureContent::default()),
			FrameType::Binary => Self::Binary(BinaryContent::default()),
		}
	}

	/// The [`FrameType`] this payload belongs to
	pub fn frame_type(&self) -> FrameType {
		match self {
			Self::Text(_) => FrameType::Text,
			Self::Comment(_) => FrameType::Comment,
			Self::Url(_) => FrameType::Url,
			Self::UserText(_) => FrameType::UserText,
			Self::UserUrl(_) => FrameType::UserUrl,
			Self::StringList(_) => FrameType::StringList,
			Self::Picture(_) => FrameType::Picture,
			Self::Binary(_) => FrameType::Binary,
		}
	}

	/// The text encoding the payload was read with, for variants that carry text
	pub fn encoding(&self) -> Option<TextEncoding> {
		match self {
			Self::Text(c) => Some(c.encoding),
			Self::Comment(c) => Some(c.encoding),
			Self::UserText(c) => Some(c.encoding),
			Self::UserUrl(c) => Some(c.encoding),
			Self::StringList(c) => Some(c.encoding),
			Self::Picture(c) => Some(c.encoding),
			Self::Url(_) | Self::Binary(_) => None,
		}
	}

	pub(crate) fn set_encoding(&mut self, encoding: TextEncoding) {
		match self {
			Self::Text(c) => c.encoding = encoding,
			Self::Comment(c) => c.encoding = encoding,
			Self::UserText(c) => c.encoding = encoding,
			Self::UserUrl(c) => c.encoding = encoding,
			Self::StringList(c) => c.encoding = encoding,
			Self::Picture(c) => c.encoding = encoding,
			Self::Url(_) | Self::Binary(_) => {},
		}
	}

	/// Whether the payload carries no information
	///
	/// Used to prefer the non-empty frame when a tag contains duplicate IDs, and to
	/// skip empty ID3v1.0 fields.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(c) => c.text.is_empty(),
			Self::Comment(c) => c.description.is_empty() && c.text.is_empty(),
			Self::Url(c) => c.url.is_empty(),
			Self::UserText(c) => c.description.is_empty() && c.value.is_empty(),
			Self::UserUrl(c) => c.description.is_empty() && c.url.is_empty(),
			Self::StringList(c) => c.values.iter().all(String::is_empty),
			Self::Picture(c) => c.data.is_empty(),
			Self::Binary(c) => c.data.is_empty(),
		}
	}
}
