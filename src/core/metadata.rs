use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

pub const PRODUCER: &str = concat!("merge_pdf ", env!("CARGO_PKG_VERSION"));

/// PDF date string, e.g. `D:20260131094500+00'00'`.
pub fn pdf_date(at: DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%S+00'00'").to_string()
}

fn parse_version(version: &str) -> (u32, u32) {
    let mut parts = version.trim().splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor)
}

/// Highest `major.minor` header version; "1.4" when nothing parses.
pub fn newest_version<'a>(versions: impl IntoIterator<Item = &'a str>) -> String {
    versions
        .into_iter()
        .filter(|v| parse_version(v) != (0, 0))
        .max_by_key(|v| parse_version(v))
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "1.4".to_string())
}

/// Text string object; non-ASCII text is written as UTF-16BE with a BOM.
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Replaces the trailer `Info` with a fresh dictionary for the merged file.
pub fn stamp_info(doc: &mut Document, title: Option<&str>, at: DateTime<Utc>) -> ObjectId {
    let date = pdf_date(at);
    let mut info = Dictionary::new();
    info.set("Producer", Object::string_literal(PRODUCER));
    info.set("CreationDate", Object::string_literal(date.clone()));
    info.set("ModDate", Object::string_literal(date));
    if let Some(title) = title {
        info.set("Title", text_string(title));
    }

    let info_id = doc.add_object(info);
    doc.trailer.set("Info", Object::Reference(info_id));
    info_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pdf_date_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(pdf_date(at), "D:20240309070501+00'00'");
    }

    #[test]
    fn test_newest_version() {
        assert_eq!(newest_version(["1.4", "1.7", "1.5"]), "1.7");
        assert_eq!(newest_version(["1.10", "1.9"]), "1.10");
        assert_eq!(newest_version(["2.0", "1.7"]), "2.0");
        assert_eq!(newest_version(["", "garbage"]), "1.4");
    }

    #[test]
    fn test_text_string_encoding() {
        match text_string("Report") {
            Object::String(bytes, StringFormat::Literal) => assert_eq!(bytes, b"Report".to_vec()),
            other => panic!("unexpected object: {:?}", other),
        }
        match text_string("報告") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(bytes.len(), 2 + 2 * 2);
            }
            other => panic!("unexpected object: {:?}", other),
        }
    }

    #[test]
    fn test_stamp_info_sets_trailer() {
        let mut doc = Document::with_version("1.5");
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let info_id = stamp_info(&mut doc, Some("Bundle"), at);

        assert_eq!(
            doc.trailer.get(b"Info").unwrap().as_reference().unwrap(),
            info_id
        );
        let info = doc.get_dictionary(info_id).unwrap();
        match info.get(b"Producer").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), PRODUCER.as_bytes()),
            other => panic!("unexpected producer: {:?}", other),
        }
        assert!(info.has(b"Title"));
        assert!(info.has(b"CreationDate"));
    }
}
