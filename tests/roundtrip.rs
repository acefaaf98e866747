//! Whole-tag byte-exactness and cross-version behavior

use id3vx::config::{ParseOptions, ParsingMode, WriteOptions};
use id3vx::description::FrameMeaning;
use id3vx::{FrameContent, Tag, Version};

use std::io::Cursor;

fn assert_byte_exact(bytes: &[u8], parse_options: ParseOptions) -> Tag {
	let tag = Tag::read(&mut &bytes[..], parse_options)
		.unwrap()
		.expect("a tag");

	let mut written = Vec::new();
	tag.write(&mut written, WriteOptions::new()).unwrap();
	assert_eq!(written, bytes, "{} tag did not round-trip", tag.version());

	tag
}

fn v2_tag(major: u8, flags: u8, frames: &[u8]) -> Vec<u8> {
	let size = frames.len() as u32;
	assert!(size < 0x80, "test fixtures stay below one synchsafe byte");

	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"ID3");
	bytes.push(major);
	bytes.push(0);
	bytes.push(flags);
	bytes.extend_from_slice(&[0, 0, 0, size as u8]);
	bytes.extend_from_slice(frames);
	bytes
}

fn v22_frame(id: &[u8; 3], content: &[u8]) -> Vec<u8> {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(id);
	bytes.extend_from_slice(&(content.len() as u32).to_be_bytes()[1..]);
	bytes.extend_from_slice(content);
	bytes
}

fn v23_frame(id: &[u8; 4], flags: u16, content: &[u8]) -> Vec<u8> {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(id);
	bytes.extend_from_slice(&(content.len() as u32).to_be_bytes());
	bytes.extend_from_slice(&flags.to_be_bytes());
	bytes.extend_from_slice(content);
	bytes
}

// v2.4 sizes are synchsafe; fixtures stay below 128 bytes of content
fn v24_frame(id: &[u8; 4], flags: u16, content: &[u8]) -> Vec<u8> {
	assert!(content.len() < 0x80);
	let mut bytes = Vec::new();
	bytes.extend_from_slice(id);
	bytes.extend_from_slice(&[0, 0, 0, content.len() as u8]);
	bytes.extend_from_slice(&flags.to_be_bytes());
	bytes.extend_from_slice(content);
	bytes
}

#[test]
fn v1_trailer_byte_exact() {
	let mut block = Vec::with_capacity(128);
	block.extend_from_slice(b"TAG");

	let mut field = |text: &str, width: usize| {
		let mut bytes = text.as_bytes().to_vec();
		bytes.resize(width, 0);
		block.extend_from_slice(&bytes);
	};
	field("The Bends", 30);
	field("Radiohead", 30);
	field("The Bends", 30);
	field("1995", 4);
	field("from the archive", 29);
	block.push(1); // track
	block.push(17); // genre

	let tag = Tag::read_v1(&mut Cursor::new(&block)).unwrap().expect("a trailer");
	assert_eq!(tag.get_meaning(FrameMeaning::Title).unwrap().text(), Some("The Bends"));
	assert_eq!(tag.get_meaning(FrameMeaning::TrackNumber).unwrap().text(), Some("1"));

	let mut written = Vec::new();
	tag.write(&mut written, WriteOptions::new()).unwrap();
	assert_eq!(written, block);
}

#[test]
fn v22_tag_byte_exact() {
	let mut frames = Vec::new();
	frames.extend_from_slice(&v22_frame(b"TT2", b"\x00Planet Telex"));
	frames.extend_from_slice(&v22_frame(b"TP1", b"\x00Radiohead"));
	frames.extend_from_slice(&v22_frame(b"TAL", b"\x00The Bends"));
	frames.extend_from_slice(&v22_frame(b"TYE", b"\x001995"));
	frames.extend_from_slice(&v22_frame(b"COM", b"\x00engnote\x00taken live"));
	frames.extend_from_slice(&v22_frame(
		b"PIC",
		&[b"\x00PNG\x03cover\x00".as_slice(), &[0x89, 0x50, 0x4E, 0x47]].concat(),
	));

	let bytes = v2_tag(2, 0, &frames);
	let tag = assert_byte_exact(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict));

	assert_eq!(tag.version(), Version::V2_2);
	assert_eq!(tag.len(), 6);
	let FrameContent::Picture(picture) = &tag.get("PIC").unwrap().content else {
		panic!("expected a picture payload");
	};
	assert_eq!(picture.mime, "image/png");
}

#[test]
fn v23_tag_byte_exact() {
	let mut frames = Vec::new();
	frames.extend_from_slice(&v23_frame(b"TIT2", 0, b"\x00Just"));
	frames.extend_from_slice(&v23_frame(b"TPE1", 0, b"\x00Radiohead"));
	frames.extend_from_slice(&v23_frame(b"TALB", 0, b"\x00The Bends"));
	frames.extend_from_slice(&v23_frame(b"MCDI", 0, &[0x01, 0x02, 0x03, 0x04]));
	frames.extend_from_slice(&v23_frame(b"COMM", 0, b"\x00engnote\x00b-side"));
	frames.extend_from_slice(&v23_frame(
		b"APIC",
		0,
		&[b"\x00image/png\x00\x03cover\x00".as_slice(), &[0x89, 0x50]].concat(),
	));

	let bytes = v2_tag(3, 0, &frames);
	let tag = assert_byte_exact(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict));

	assert_eq!(tag.version(), Version::V2_3);
	assert_eq!(tag.len(), 6);
}

#[test]
fn v24_tag_byte_exact() {
	// TIT2 in UTF-16 with a little-endian BOM
	let mut title = vec![0x01, 0xFF, 0xFE];
	for unit in "Lucky".encode_utf16() {
		title.extend_from_slice(&unit.to_le_bytes());
	}

	let mut frames = Vec::new();
	frames.extend_from_slice(&v24_frame(b"TIT2", 0, &title));
	frames.extend_from_slice(&v24_frame(b"TDRC", 0, b"\x001997"));
	frames.extend_from_slice(&v24_frame(b"TPE1", 0, b"\x03Radiohead"));
	frames.extend_from_slice(&v24_frame(b"MCDI", 0, &[0x0A, 0x0B]));

	let bytes = v2_tag(4, 0, &frames);
	let tag = assert_byte_exact(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict));

	assert_eq!(tag.version(), Version::V2_4);
	assert_eq!(tag.get("TIT2").unwrap().text(), Some("Lucky"));
	assert_eq!(tag.get("TPE1").unwrap().text(), Some("Radiohead"));
}

// A big-endian byte order mark and a trailing null must both survive a rewrite
// of the original bytes.
#[test]
fn v23_big_endian_bom_and_trailing_null_byte_exact() {
	let mut title = vec![0x01, 0xFE, 0xFF];
	for unit in "Lucky".encode_utf16() {
		title.extend_from_slice(&unit.to_be_bytes());
	}

	let mut frames = Vec::new();
	frames.extend_from_slice(&v23_frame(b"TIT2", 0, &title));
	frames.extend_from_slice(&v23_frame(b"TALB", 0, b"\x00OK Computer\x00"));

	let bytes = v2_tag(3, 0, &frames);
	let tag = assert_byte_exact(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict));

	assert_eq!(tag.get("TIT2").unwrap().text(), Some("Lucky"));
}

// The literal ten bytes `M C D I, size 0, flags 0xE0 0xE0`: every v2.3 flag bit set.
#[test]
fn v23_mcdi_all_flags_set() {
	let frame = v23_frame(b"MCDI", 0xE0E0, &[]);
	assert_eq!(frame.len(), 10);

	let bytes = v2_tag(3, 0, &frame);

	// The frame relies on compression/encryption, so reading it whole needs
	// the carry option
	let tag = assert_byte_exact(&bytes, ParseOptions::new().ignore_unsupported_flags(true));

	let frame = tag.get("MCDI").unwrap();
	assert!(frame.flags.tag_alter_preservation);
	assert!(frame.flags.file_alter_preservation);
	assert!(frame.flags.read_only);
	assert!(frame.flags.grouping_identity);
	assert!(frame.flags.compression);
	assert!(frame.flags.encryption);
}

// The literal fourteen bytes `M C I, size 6, FF 00 FF 01 02 FF 00 FF` under
// tag-wide unsynchronisation: the declared size counts unstuffed bytes.
#[test]
fn v22_mci_unsynchronised() {
	let frame: [u8; 14] = [
		b'M', b'C', b'I', 0, 0, 6, 0xFF, 0x00, 0xFF, 0x01, 0x02, 0xFF, 0x00, 0xFF,
	];

	let bytes = v2_tag(2, 0x80, &frame);
	let tag = assert_byte_exact(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict));

	assert!(tag.is_unsynchronised());
	let FrameContent::Binary(binary) = &tag.get("MCI").unwrap().content else {
		panic!("expected a binary payload");
	};
	assert_eq!(binary.data, [0xFF, 0xFF, 0x01, 0x02, 0xFF, 0xFF]);
}

#[test]
fn conversion_is_a_stable_fixed_point() {
	let mut frames = Vec::new();
	frames.extend_from_slice(&v23_frame(b"TIT2", 0, b"\x00Street Spirit"));
	frames.extend_from_slice(&v23_frame(b"TYER", 0, b"\x001995"));

	let bytes = v2_tag(3, 0, &frames);
	let tag = Tag::read(&mut &bytes[..], ParseOptions::new())
		.unwrap()
		.expect("a tag");

	let converted = tag.convert(Version::V2_4).unwrap();
	let twice = converted.clone().convert(Version::V2_4).unwrap();
	assert_eq!(twice, converted);

	let mut first = Vec::new();
	converted.write(&mut first, WriteOptions::new()).unwrap();
	let mut second = Vec::new();
	twice.write(&mut second, WriteOptions::new()).unwrap();
	assert_eq!(first, second);
}

// A frame the lenient reader drops must leave no trace that could fail a later
// strict write of the surviving frames.
#[test]
fn lenient_drop_never_poisons_a_strict_write() {
	let mut frames = Vec::new();
	frames.extend_from_slice(&v23_frame(b"QQQQ", 0, &[0xDE, 0xAD]));
	frames.extend_from_slice(&v23_frame(b"TIT2", 0, b"\x00Bones"));

	let bytes = v2_tag(3, 0, &frames);

	let tag = Tag::read(
		&mut &bytes[..],
		ParseOptions::new().parsing_mode(ParsingMode::Lenient),
	)
	.unwrap()
	.expect("a tag");
	assert_eq!(tag.len(), 1);

	let mut written = Vec::new();
	tag.write(&mut written, WriteOptions::new()).unwrap();

	// The rewritten tag parses cleanly even under strict rules
	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	let reparsed = Tag::read(&mut &written[..], strict).unwrap().expect("a tag");
	assert_eq!(reparsed.get("TIT2").unwrap().text(), Some("Bones"));
}

#[test]
fn v24_per_frame_unsynchronisation_byte_exact() {
	// AENC content FF E0 stuffs to FF 00 E0; the v2.4 size counts stuffed bytes
	let frame = v24_frame(b"AENC", 0x0002, &[0xFF, 0x00, 0xE0]);

	// Every frame carries the transform, so the tag-wide bit is set too
	let bytes = v2_tag(4, 0x80, &frame);
	let tag = assert_byte_exact(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict));

	let FrameContent::Binary(binary) = &tag.get("AENC").unwrap().content else {
		panic!("expected a binary payload");
	};
	assert_eq!(binary.data, [0xFF, 0xE0]);
}
