//! Version conversion
//!
//! Conversion walks the linear version path one adjacent step at a time, renaming
//! frame ids per boundary table, reshaping content only where the semantic type
//! differs across the boundary, and dropping frames with no counterpart. It is
//! deliberately neither lossless nor invertible; converting a tag to its own
//! version is a no-op.

use crate::description::tag_description;
use crate::error::Result;
use crate::frame::content::{CommentContent, FrameContent, TextContent};
use crate::frame::{Frame, FrameFlags, FrameId};
use crate::tag::Tag;
use crate::version::Version;

// ID3v2.2 <-> ID3v2.3. One row per v2.2 id; CRM has no v2.3 counterpart and is absent.
#[rustfmt::skip]
const V2_2_V2_3: &[(&str, &str)] = &[
	("TT1", "TIT1"), ("TT2", "TIT2"), ("TT3", "TIT3"),
	("TP1", "TPE1"), ("TP2", "TPE2"), ("TP3", "TPE3"), ("TP4", "TPE4"),
	("TAL", "TALB"), ("TYE", "TYER"), ("TRK", "TRCK"), ("TCO", "TCON"),
	("TEN", "TENC"), ("TCM", "TCOM"), ("TXT", "TEXT"), ("TLA", "TLAN"),
	("TOT", "TOAL"), ("TOA", "TOPE"), ("TOL", "TOLY"), ("TOR", "TORY"),
	("TDA", "TDAT"), ("TIM", "TIME"), ("TRD", "TRDA"), ("TMT", "TMED"),
	("TFT", "TFLT"), ("TBP", "TBPM"), ("TPA", "TPOS"), ("TKE", "TKEY"),
	("TSS", "TSSE"), ("TLE", "TLEN"), ("TSI", "TSIZ"), ("TDY", "TDLY"),
	("TCR", "TCOP"), ("TPB", "TPUB"), ("TOF", "TOFN"),
	("COM", "COMM"), ("ULT", "USLT"),
	("WAF", "WOAF"), ("WAR", "WOAR"), ("WAS", "WOAS"),
	("WCM", "WCOM"), ("WCP", "WCOP"), ("WPB", "WPUB"),
	("TXX", "TXXX"), ("WXX", "WXXX"),
	("IPL", "IPLS"),
	("PIC", "APIC"),
	("MCI", "MCDI"), ("UFI", "UFID"), ("CNT", "PCNT"), ("POP", "POPM"),
	("GEO", "GEOB"), ("BUF", "RBUF"), ("LNK", "LINK"), ("REV", "RVRB"),
	("EQU", "EQUA"), ("RVA", "RVAD"), ("STC", "SYTC"), ("MLL", "MLLT"),
	("ETC", "ETCO"), ("SLT", "SYLT"), ("CRA", "AENC"),
];

// ID3v2.3 -> ID3v2.4 renames. EQUA and RVAD changed their binary layout in v2.4 and
// cannot be carried by renaming; they fall through to the drop path.
const V2_3_TO_V2_4: &[(&str, &str)] = &[("TYER", "TDRC"), ("TORY", "TDOR"), ("IPLS", "TIPL")];

// ID3v2.4 -> ID3v2.3 renames. Both involvement lists collapse onto IPLS.
const V2_4_TO_V2_3: &[(&str, &str)] =
	&[("TDRC", "TYER"), ("TDOR", "TORY"), ("TIPL", "IPLS"), ("TMCL", "IPLS")];

/// Convert `tag` to `dest`
///
/// Converting to the tag's own version returns it unchanged (a stable fixed point, so
/// `A -> B -> B` equals `A -> B`). Frames with no counterpart in a step's destination
/// are dropped with a warning.
pub fn convert_tag(tag: Tag, dest: Version) -> Result<Tag> {
	let path = tag.version().conversion_path(dest);

	let mut tag = tag;
	for step in path.windows(2) {
		tag = convert_step(tag, step[0], step[1])?;
	}

	Ok(tag)
}

fn convert_step(tag: Tag, from: Version, to: Version) -> Result<Tag> {
	log::debug!("Converting {from} tag to {to}");

	let description = tag_description(to);
	let mut converted = Tag::new(to);

	for frame in tag.frames() {
		let old_id = frame.id().as_str();

		let Some(new_id) = rename(old_id, from, to) else {
			log::warn!("Frame \"{old_id}\" has no {to} counterpart, dropping it");
			continue;
		};

		let content = match (description.frame_type(new_id), frame.content.frame_type()) {
			// The id is known and the payload shape already fits
			(Some(expected), actual) if expected == actual => frame.content.clone(),
			// The ID3v1.0 boundary reshapes the comment field
			(Some(expected), _) => {
				let Some(reshaped) = reshape(&frame.content, expected) else {
					log::warn!(
						"Frame \"{old_id}\" cannot take the payload shape \"{new_id}\" \
						 requires, dropping it"
					);
					continue;
				};
				reshaped
			},
			// `rename` only yields ids the destination knows
			(None, _) => unreachable!(),
		};

		let id = FrameId::new(new_id.to_owned(), to)?;
		converted.insert(Frame::from_parts(id, adapt_flags(frame.flags, to), content));
	}

	Ok(converted)
}

fn rename(id: &str, from: Version, to: Version) -> Option<&'static str> {
	match (from, to) {
		// ID3v1.0 models its fields under the ID3v2.2 ids already, so both
		// boundaries reduce to "does the destination know the id"
		(Version::V1_0, Version::V2_2) | (Version::V2_2, Version::V1_0) => {
			tag_description(to).interned_id(id)
		},

		(Version::V2_2, Version::V2_3) => V2_2_V2_3
			.iter()
			.find(|(v22, _)| *v22 == id)
			.map(|(_, v23)| *v23),
		(Version::V2_3, Version::V2_2) => V2_2_V2_3
			.iter()
			.find(|(_, v23)| *v23 == id)
			.map(|(v22, _)| *v22),

		(Version::V2_3, Version::V2_4) => lookup_or_carry(V2_3_TO_V2_4, Version::V2_4, id),
		(Version::V2_4, Version::V2_3) => lookup_or_carry(V2_4_TO_V2_3, Version::V2_3, id),

		_ => unreachable!("conversion only steps between adjacent versions"),
	}
}

// Renamed if the table says so, carried unchanged if the destination knows the id,
// dropped otherwise. EQUA/RVAD (and EQU2/RVA2 downward) fall out here.
fn lookup_or_carry(table: &[(&str, &'static str)], to: Version, id: &str) -> Option<&'static str> {
	if let Some((_, renamed)) = table.iter().find(|(source, _)| *source == id) {
		return Some(*renamed);
	}

	tag_description(to).interned_id(id)
}

fn reshape(content: &FrameContent, expected: crate::description::FrameType) -> Option<FrameContent> {
	use crate::description::FrameType;

	match (content, expected) {
		// v1.0 COM (plain text) -> v2.2 COM (language-tagged comment)
		(FrameContent::Text(text), FrameType::Comment) => {
			Some(FrameContent::Comment(CommentContent {
				encoding: text.encoding,
				// "XXX" is the placeholder for an unknown language
				language: String::from("XXX"),
				description: String::new(),
				text: text.text.clone(),
			}))
		},
		// v2.2 COM -> v1.0 COM; the description and language do not survive
		(FrameContent::Comment(comment), FrameType::Text) => {
			Some(FrameContent::Text(TextContent {
				encoding: comment.encoding,
				text: comment.text.clone(),
			}))
		},
		_ => None,
	}
}

// v2.2 has no frame flags to carry
fn adapt_flags(flags: FrameFlags, to: Version) -> FrameFlags {
	match to {
		Version::V1_0 | Version::V2_2 => FrameFlags::default(),
		_ => flags,
	}
}

#[cfg(test)]
mod tests {
	use super::convert_tag;
	use crate::frame::content::{CommentContent, FrameContent, PictureContent, TextContent};
	use crate::frame::Frame;
	use crate::tag::Tag;
	use crate::util::text::TextEncoding;
	use crate::version::Version;

	fn text_frame(id: &'static str, text: &str, version: Version) -> Frame {
		Frame::new(
			id,
			FrameContent::Text(TextContent {
				encoding: TextEncoding::Latin1,
				text: text.to_owned(),
			}),
			version,
		)
		.unwrap()
	}

	#[test_log::test]
	fn v22_to_v23_renames() {
		let mut tag = Tag::new(Version::V2_2);
		tag.insert(text_frame("TT2", "Videotape", Version::V2_2));
		tag.insert(text_frame("TP1", "Radiohead", Version::V2_2));
		tag.insert(text_frame("TYE", "2007", Version::V2_2));

		let converted = convert_tag(tag, Version::V2_3).unwrap();
		assert_eq!(converted.version(), Version::V2_3);
		assert_eq!(converted.get("TIT2").unwrap().text(), Some("Videotape"));
		assert_eq!(converted.get("TPE1").unwrap().text(), Some("Radiohead"));
		assert_eq!(converted.get("TYER").unwrap().text(), Some("2007"));
	}

	#[test_log::test]
	fn v23_to_v24_year_becomes_recording_time() {
		let mut tag = Tag::new(Version::V2_3);
		tag.insert(text_frame("TYER", "1997", Version::V2_3));
		// Dropped: no v2.4 counterpart
		tag.insert(text_frame("TSIZ", "123456", Version::V2_3));

		let converted = convert_tag(tag, Version::V2_4).unwrap();
		assert_eq!(converted.get("TDRC").unwrap().text(), Some("1997"));
		assert!(converted.get("TSIZ").is_none());
		assert_eq!(converted.len(), 1);
	}

	#[test_log::test]
	fn v24_to_v23_drops_new_frames() {
		let mut tag = Tag::new(Version::V2_4);
		tag.insert(text_frame("TDRC", "2016", Version::V2_4));
		tag.insert(text_frame("TMOO", "brooding", Version::V2_4));
		tag.insert(text_frame("TSOT", "A", Version::V2_4));

		let converted = convert_tag(tag, Version::V2_3).unwrap();
		assert_eq!(converted.get("TYER").unwrap().text(), Some("2016"));
		assert_eq!(converted.len(), 1);
	}

	#[test_log::test]
	fn multi_step_path() {
		let mut tag = Tag::new(Version::V1_0);
		tag.insert(text_frame("TT2", "Creep", Version::V1_0));
		tag.insert(text_frame("TYE", "1993", Version::V1_0));

		let converted = convert_tag(tag, Version::V2_4).unwrap();
		assert_eq!(converted.version(), Version::V2_4);
		assert_eq!(converted.get("TIT2").unwrap().text(), Some("Creep"));
		assert_eq!(converted.get("TDRC").unwrap().text(), Some("1993"));
	}

	#[test_log::test]
	fn conversion_to_self_is_a_fixed_point() {
		let mut tag = Tag::new(Version::V2_3);
		tag.insert(text_frame("TIT2", "Reckoner", Version::V2_3));

		let converted = convert_tag(tag.clone(), Version::V2_3).unwrap();
		assert_eq!(converted, tag);
	}

	#[test_log::test]
	fn comment_reshapes_across_the_v1_boundary() {
		let mut tag = Tag::new(Version::V1_0);
		tag.insert(text_frame("COM", "ripped from vinyl", Version::V1_0));

		let converted = convert_tag(tag, Version::V2_2).unwrap();
		let FrameContent::Comment(comment) = &converted.get("COM").unwrap().content else {
			panic!("expected a comment payload");
		};
		assert_eq!(comment.language, "XXX");
		assert_eq!(comment.text, "ripped from vinyl");

		let back = convert_tag(converted, Version::V1_0).unwrap();
		assert_eq!(back.get("COM").unwrap().text(), Some("ripped from vinyl"));
	}

	#[test_log::test]
	fn pictures_do_not_fit_v1() {
		let picture = FrameContent::Picture(PictureContent {
			encoding: TextEncoding::Latin1,
			mime: String::from("image/png"),
			picture_type: 3,
			description: String::new(),
			data: vec![1, 2, 3],
		});

		let mut tag = Tag::new(Version::V2_2);
		tag.insert(Frame::new("PIC", picture, Version::V2_2).unwrap());
		tag.insert(text_frame("TT2", "kept", Version::V2_2));

		let converted = convert_tag(tag, Version::V1_0).unwrap();
		assert!(converted.get("PIC").is_none());
		assert_eq!(converted.get("TT2").unwrap().text(), Some("kept"));
	}

	#[test_log::test]
	fn comment_carries_v22_to_v23() {
		let comment = FrameContent::Comment(CommentContent {
			encoding: TextEncoding::Latin1,
			language: String::from("eng"),
			description: String::from("note"),
			text: String::from("good take"),
		});

		let mut tag = Tag::new(Version::V2_2);
		tag.insert(Frame::new("COM", comment.clone(), Version::V2_2).unwrap());

		let converted = convert_tag(tag, Version::V2_3).unwrap();
		assert_eq!(converted.get("COMM").unwrap().content, comment);
	}
}
