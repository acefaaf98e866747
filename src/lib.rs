//! [![GitHub Workflow Status](https://img.shields.io/github/actions/workflow/status/id3vx/id3vx/ci.yml?branch=main&style=for-the-badge&logo=github)](https://github.com/id3vx/id3vx/actions/workflows/ci.yml)
//! [![Crates.io](https://img.shields.io/crates/v/id3vx?style=for-the-badge&logo=rust)](https://crates.io/crates/id3vx)
//!
//! A binary codec for ID3 audio metadata tags.
//!
//! `id3vx` reads and writes all four incompatible on-disk layouts (the ID3v1.0
//! trailer and ID3v2.2/2.3/2.4) into one [`Tag`] model, and converts tags between
//! versions along the linear version path.
//!
//! An unmodified tag writes back byte identical to its source, including the
//! unsynchronisation transform the source used, so read-then-write is safe on
//! files you do not otherwise touch.
//!
//! # Examples
//!
//! Reading an ID3v2 tag from the front of a stream:
//!
//! ```rust
//! use id3vx::config::ParseOptions;
//! use id3vx::description::FrameMeaning;
//! use id3vx::tag::Tag;
//!
//! # fn main() -> id3vx::error::Result<()> {
//! # let bytes = *b"ID3\x03\x00\x00\x00\x00\x00\x10TIT2\x00\x00\x00\x06\x00\x00\x00Creep";
//! let mut reader = &bytes[..];
//!
//! let tag = Tag::read(&mut reader, ParseOptions::new())?.expect("a tag");
//! let title = tag.get_meaning(FrameMeaning::Title).expect("a title");
//! assert_eq!(title.text(), Some("Creep"));
//! # Ok(()) }
//! ```
//!
//! Converting it for an ID3v2.4-only consumer:
//!
//! ```rust
//! use id3vx::config::{ParseOptions, WriteOptions};
//! use id3vx::tag::Tag;
//! use id3vx::version::Version;
//!
//! # fn main() -> id3vx::error::Result<()> {
//! # let bytes = *b"ID3\x03\x00\x00\x00\x00\x00\x0FTYER\x00\x00\x00\x05\x00\x00\x001993";
//! # let mut reader = &bytes[..];
//! let tag = Tag::read(&mut reader, ParseOptions::new())?.expect("a tag");
//!
//! let converted = tag.convert(Version::V2_4)?;
//! assert_eq!(converted.get("TDRC").expect("a recording time").text(), Some("1993"));
//!
//! let mut out = Vec::new();
//! converted.write(&mut out, WriteOptions::new())?;
//! # Ok(()) }
//! ```
//!
//! # Strictness
//!
//! Real-world tags carry recoverable defects. The default
//! [`ParsingMode::Lenient`](config::ParsingMode::Lenient) logs them through [`log`]
//! and keeps every well-formed frame;
//! [`ParsingMode::Strict`](config::ParsingMode::Strict) surfaces them as errors
//! instead. See [`config::ParseOptions`] for the finer knobs.

pub mod config;
pub mod conversion;
pub mod description;
pub mod error;
pub mod frame;
pub mod tag;
pub mod util;
pub mod version;

pub(crate) mod macros;
pub(crate) mod v1;

pub use crate::frame::content::FrameContent;
pub use crate::frame::{Frame, FrameFlags, FrameId};
pub use crate::tag::Tag;
pub use crate::version::Version;
