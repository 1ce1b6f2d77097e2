use serde_json::Value;

use super::fields::{first_id, first_number, first_text};
use super::{NAME_KEYS, PERCENT_KEYS};
use crate::catalog::CatalogSubject;
use crate::model::progress::clamp_percent;
use crate::model::{SubjectHeader, SubjectId};
use crate::style::style_for;

pub const DEFAULT_SUBJECT_NAME: &str = "Môn học";
pub const DEFAULT_TOTAL_UNITS_TEXT: &str = "Đang cập nhật";

/// A handed-over record names its subject by `id` first, unlike list records.
pub const HEADER_ID_KEYS: &[&str] = &["id", "_id"];

/// Build the detail header for a subject.
///
/// Each field is taken from the record handed over by the subject list,
/// then from the catalog `fallback`, then from a literal default. The id
/// prefers the record, then the requested id, then the fallback's id;
/// `None` means no id could be resolved at all.
#[must_use]
pub fn resolve_subject_header(
    passed: Option<&Value>,
    requested: Option<&SubjectId>,
    fallback: Option<&CatalogSubject>,
) -> Option<SubjectHeader> {
    let passed_text = |keys: &[&str]| passed.and_then(|record| first_text(record, keys));
    let default_style = style_for(0);

    let id = passed
        .and_then(|record| first_id(record, HEADER_ID_KEYS))
        .map(SubjectId::new)
        .or_else(|| requested.filter(|id| !id.is_blank()).cloned())
        .or_else(|| fallback.map(|subject| SubjectId::new(subject.id)))?;

    let name = passed_text(NAME_KEYS)
        .or_else(|| fallback.map(|s| s.name.to_owned()))
        .unwrap_or_else(|| DEFAULT_SUBJECT_NAME.to_owned());
    let grade = passed_text(&["grade"])
        .or_else(|| fallback.map(|s| s.grade.to_owned()))
        .unwrap_or_default();
    let color = passed_text(&["color"])
        .or_else(|| fallback.map(|s| s.color.to_owned()))
        .unwrap_or_else(|| default_style.color.to_owned());
    let icon = passed_text(&["icon"])
        .or_else(|| fallback.map(|s| s.icon.to_owned()))
        .unwrap_or_else(|| "book-outline".to_owned());
    let total_units_text = passed_text(&["totalUnitsText"])
        .or_else(|| fallback.map(|s| s.total_units_text.to_owned()))
        .unwrap_or_else(|| DEFAULT_TOTAL_UNITS_TEXT.to_owned());

    // An explicit percentage wins; a bare `progress` on a handed-over record is a fraction.
    let progress_percent = passed
        .and_then(|record| first_number(record, &PERCENT_KEYS[..1]))
        .map(clamp_percent)
        .or_else(|| {
            passed
                .and_then(|record| first_number(record, &["progress"]))
                .map(|fraction| clamp_percent(fraction * 100.0))
        })
        .or_else(|| fallback.map(CatalogSubject::progress_percent))
        .unwrap_or(0);

    Some(SubjectHeader {
        id,
        name,
        grade,
        color,
        icon,
        progress_percent,
        total_units_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_subject, subject_by_id};
    use serde_json::json;

    #[test]
    fn passed_record_wins() {
        let record = json!({
            "_id": "abc",
            "name": "Hóa học",
            "progress": 0.42,
            "totalUnitsText": "4 chương"
        });
        let header =
            resolve_subject_header(Some(&record), None, Some(default_subject())).unwrap();
        assert_eq!(header.id, SubjectId::new("abc"));
        assert_eq!(header.name, "Hóa học");
        assert_eq!(header.progress_percent, 42);
        assert_eq!(header.total_units_text, "4 chương");
        // Missing fields come from the catalog subject.
        assert_eq!(header.grade, "Lớp 10");
        assert_eq!(header.color, "#2f6aff");
    }

    #[test]
    fn handed_over_id_prefers_id_over_document_id() {
        let record = json!({ "_id": "65f0", "id": "literature" });
        let header = resolve_subject_header(Some(&record), None, None).unwrap();
        assert_eq!(header.id, SubjectId::new("literature"));

        let record = json!({ "_id": "65f0", "id": null });
        let header = resolve_subject_header(Some(&record), None, None).unwrap();
        assert_eq!(header.id, SubjectId::new("65f0"));
    }

    #[test]
    fn explicit_percent_beats_fraction() {
        let record = json!({ "id": "x", "progressPercent": 130, "progress": 0.1 });
        let header = resolve_subject_header(Some(&record), None, None).unwrap();
        assert_eq!(header.progress_percent, 100);
    }

    #[test]
    fn catalog_fills_everything_without_record() {
        let literature = subject_by_id("literature").unwrap();
        let requested = SubjectId::new("literature");
        let header = resolve_subject_header(None, Some(&requested), Some(literature)).unwrap();
        assert_eq!(header.id, requested);
        assert_eq!(header.name, "Ngữ văn");
        assert_eq!(header.progress_percent, 30);
    }

    #[test]
    fn requested_id_beats_fallback_id() {
        let requested = SubjectId::new("live-42");
        let header =
            resolve_subject_header(None, Some(&requested), Some(default_subject())).unwrap();
        assert_eq!(header.id, requested);
    }

    #[test]
    fn literal_defaults_without_catalog() {
        let requested = SubjectId::new("live-1");
        let header = resolve_subject_header(None, Some(&requested), None).unwrap();
        assert_eq!(header.name, DEFAULT_SUBJECT_NAME);
        assert_eq!(header.total_units_text, DEFAULT_TOTAL_UNITS_TEXT);
        assert_eq!(header.icon, "book-outline");
        assert_eq!(header.progress_percent, 0);
    }

    #[test]
    fn unresolvable_without_any_id() {
        assert!(resolve_subject_header(None, None, None).is_none());
        let blank = SubjectId::new(" ");
        assert!(resolve_subject_header(Some(&json!({})), Some(&blank), None).is_none());
    }
}
