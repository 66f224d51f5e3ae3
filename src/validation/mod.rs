//! # 필드 스키마 검증 모듈
//!
//! 요청 본문(JSON)을 저장 가능한 값으로 바꾸는 계층입니다.
//! 엔티티마다 `FieldSpec` 배열(스키마)을 하나씩 두고,
//! `decode()`가 그 스키마를 JSON 객체에 적용합니다.
//!
//! ## 스키마 한 칸이 정하는 것
//! - `kind`: 값의 타입과 변환 규칙 (문자열, 정수, 날짜, 다른 테이블의 PK)
//! - `required`: 생성/전체 수정 시 반드시 있어야 하는지
//! - `nullable`: `null`을 허용하는지
//! - `default`: 생성 시 필드가 빠졌을 때 채울 기본값
//!
//! 에러는 필드별로 모두 모은 뒤 한 번에 반환합니다 (첫 에러에서 멈추지 않음).
//!
//! ```text
//! { "title": ["This field is required."], "minutes": ["A valid integer is required."] }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Number, Value};

pub mod record;
pub mod topic;

pub use record::*;
pub use topic::*;

/// 특정 필드에 속하지 않는 에러(본문 자체가 객체가 아닌 경우 등)를 담는 키
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_STRING: &str = "Not a valid string.";
pub const MSG_NULL_CHARACTER: &str = "Null characters are not allowed.";
pub const MSG_INVALID_INTEGER: &str = "A valid integer is required.";
pub const MSG_INVALID_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// 어떤 요청에 대한 검증인지를 나타냅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// `POST`: 필수 필드 검사 + 빠진 필드는 기본값으로 채움
    Create,
    /// `PUT`: 필수 필드 검사, 빠진 선택 필드는 저장된 값 유지
    Replace,
    /// `PATCH`: 본문에 있는 필드만 검증하고 변경
    Partial,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// 앞뒤 공백은 잘라냅니다. `max_length`는 문자(char) 수 기준입니다.
    Text {
        max_length: Option<usize>,
        allow_blank: bool,
    },
    Integer,
    /// `YYYY-MM-DD`
    Date,
    /// 다른 테이블 행의 ID. 존재 여부는 DB가 필요하므로 엔티티 쪽에서 따로 확인합니다.
    PrimaryKey,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    /// fn 포인터인 이유: "오늘 날짜"처럼 요청 시점에 계산해야 하는 기본값이 있기 때문
    pub default: Option<fn() -> FieldValue>,
}

/// 검증을 통과한 필드 값
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    PrimaryKey(i64),
    Null,
}

/// 필드 이름 → 에러 메시지 목록
///
/// `BTreeMap`을 써서 JSON 응답의 키 순서가 항상 정렬되어 나오게 합니다.
/// `#[serde(transparent)]`: 래퍼 없이 내부 맵이 그대로 JSON 객체가 됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 에러 하나짜리 맵을 만듭니다.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn required(field: &str) -> Self {
        Self::single(field, MSG_REQUIRED)
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single(NON_FIELD_ERRORS, message)
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// 검증을 통과한 필드들. 엔티티별 변경 구조체로 옮길 때 `take_*`로 꺼냅니다.
#[derive(Debug, Default)]
pub struct Fields(HashMap<&'static str, FieldValue>);

impl Fields {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.0.remove(name)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// `None` = 필드 없음, `Some(None)` = 명시적 null, `Some(Some(..))` = 값 있음
    pub fn take_nullable_text(&mut self, name: &str) -> Option<Option<String>> {
        match self.0.remove(name)? {
            FieldValue::Text(text) => Some(Some(text)),
            FieldValue::Null => Some(None),
            _ => None,
        }
    }

    pub fn take_integer(&mut self, name: &str) -> Option<i64> {
        match self.0.remove(name)? {
            FieldValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn take_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.0.remove(name)? {
            FieldValue::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn primary_key(&self, name: &str) -> Option<i64> {
        match self.0.get(name)? {
            FieldValue::PrimaryKey(id) => Some(*id),
            _ => None,
        }
    }

    pub fn take_primary_key(&mut self, name: &str) -> Option<i64> {
        let id = self.primary_key(name);
        self.0.remove(name);
        id
    }
}

/// `decode()`의 결과. 필드 값과 에러를 함께 들고 있어서,
/// 호출한 쪽이 DB 조회 같은 추가 검증 에러를 덧붙인 뒤 `finish()`할 수 있습니다.
#[derive(Debug, Default)]
pub struct Decoded {
    pub fields: Fields,
    pub errors: FieldErrors,
}

impl Decoded {
    pub fn finish(self) -> Result<Fields, FieldErrors> {
        if self.errors.is_empty() {
            Ok(self.fields)
        } else {
            Err(self.errors)
        }
    }
}

/// 스키마를 JSON 본문에 적용합니다.
///
/// 스키마에 없는 키(예: 읽기 전용인 `id`)는 조용히 무시합니다.
pub fn decode(schema: &[FieldSpec], body: &Value, mode: DecodeMode) -> Decoded {
    let mut decoded = Decoded::default();

    let Some(object) = body.as_object() else {
        decoded.errors.add(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(body)
            ),
        );
        return decoded;
    };

    for spec in schema {
        match object.get(spec.name) {
            None => match mode {
                DecodeMode::Partial => {}
                _ if spec.required => decoded.errors.add(spec.name, MSG_REQUIRED),
                DecodeMode::Create => {
                    if let Some(default) = spec.default {
                        decoded.fields.0.insert(spec.name, default());
                    }
                }
                DecodeMode::Replace => {}
            },
            Some(Value::Null) if spec.nullable => {
                decoded.fields.0.insert(spec.name, FieldValue::Null);
            }
            Some(Value::Null) => decoded.errors.add(spec.name, MSG_NULL),
            Some(value) => match coerce(spec.kind, value) {
                Ok(field) => {
                    decoded.fields.0.insert(spec.name, field);
                }
                Err(message) => decoded.errors.add(spec.name, message),
            },
        }
    }

    decoded
}

fn coerce(kind: FieldKind, value: &Value) -> Result<FieldValue, String> {
    match kind {
        FieldKind::Text {
            max_length,
            allow_blank,
        } => coerce_text(value, max_length, allow_blank).map(FieldValue::Text),
        FieldKind::Integer => coerce_integer(value)
            .map(FieldValue::Integer)
            .ok_or_else(|| MSG_INVALID_INTEGER.to_string()),
        FieldKind::Date => coerce_date(value)
            .map(FieldValue::Date)
            .ok_or_else(|| MSG_INVALID_DATE.to_string()),
        FieldKind::PrimaryKey => coerce_primary_key(value).map(FieldValue::PrimaryKey),
    }
}

fn coerce_text(value: &Value, max_length: Option<usize>, allow_blank: bool) -> Result<String, String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        // 숫자는 문자열로 받아줍니다 (예: 42 → "42")
        Value::Number(n) => n.to_string(),
        _ => return Err(MSG_INVALID_STRING.to_string()),
    };

    if text.contains('\0') {
        return Err(MSG_NULL_CHARACTER.to_string());
    }

    if text.is_empty() && !allow_blank {
        return Err(MSG_BLANK.to_string());
    }

    if let Some(max) = max_length {
        if text.chars().count() > max {
            return Err(format!(
                "Ensure this field has no more than {max} characters."
            ));
        }
    }

    Ok(text)
}

/// 5.0 같은 정수값 실수는 허용, 5.5는 거부
fn integral_number(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        let f = n.as_f64()?;
        let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
        (f.fract() == 0.0 && in_range).then_some(f as i64)
    })
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => integral_number(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 연도는 정확히 네 자리(0001~9999)만 받습니다.
///
/// 날짜는 DB에 TEXT로 저장되어 문자열 순서로 정렬되므로,
/// `+10000-01-01`이나 `0000-01-01` 같은 값이 들어오면 목록 정렬이 깨집니다.
fn coerce_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();

    let mut parts = s.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    let shape_ok = year.len() == 4
        && (1..=2).contains(&month.len())
        && (1..=2).contains(&day.len())
        && [year, month, day].into_iter().all(all_digits);
    if !shape_ok {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    if !(1..=9999).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn coerce_primary_key(value: &Value) -> Result<i64, String> {
    let id = match value {
        Value::Number(n) => integral_number(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    id.ok_or_else(|| {
        format!(
            "Incorrect type. Expected pk value, received {}.",
            json_type_name(value)
        )
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zero() -> FieldValue {
        FieldValue::Integer(0)
    }

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text {
                max_length: Some(5),
                allow_blank: false,
            },
            required: true,
            nullable: false,
            default: None,
        },
        FieldSpec {
            name: "count",
            kind: FieldKind::Integer,
            required: false,
            nullable: false,
            default: Some(zero),
        },
        FieldSpec {
            name: "note",
            kind: FieldKind::Text {
                max_length: None,
                allow_blank: true,
            },
            required: false,
            nullable: true,
            default: None,
        },
    ];

    #[test]
    fn create_applies_defaults_for_missing_optional_fields() {
        let mut fields = decode(SCHEMA, &json!({ "name": "abc" }), DecodeMode::Create)
            .finish()
            .unwrap();

        assert_eq!(fields.take_text("name").as_deref(), Some("abc"));
        assert_eq!(fields.take_integer("count"), Some(0));
        assert!(!fields.contains("note"));
    }

    #[test]
    fn replace_requires_fields_but_skips_defaults() {
        let errors = decode(SCHEMA, &json!({}), DecodeMode::Replace)
            .finish()
            .unwrap_err();
        assert_eq!(errors.get("name"), Some(&[MSG_REQUIRED.to_string()][..]));

        let fields = decode(SCHEMA, &json!({ "name": "x" }), DecodeMode::Replace)
            .finish()
            .unwrap();
        assert!(!fields.contains("count"));
    }

    #[test]
    fn partial_only_touches_present_fields() {
        let mut fields = decode(SCHEMA, &json!({ "count": 3 }), DecodeMode::Partial)
            .finish()
            .unwrap();

        assert!(!fields.contains("name"));
        assert_eq!(fields.take_integer("count"), Some(3));
    }

    #[test]
    fn collects_every_field_error() {
        let errors = decode(
            SCHEMA,
            &json!({ "name": "   ", "count": "many", "id": 99 }),
            DecodeMode::Create,
        )
        .finish()
        .unwrap_err();

        assert_eq!(errors.get("name"), Some(&[MSG_BLANK.to_string()][..]));
        assert_eq!(errors.get("count"), Some(&[MSG_INVALID_INTEGER.to_string()][..]));
        assert!(errors.get("id").is_none());
    }

    #[test]
    fn text_is_trimmed_and_length_checked_in_chars() {
        let mut fields = decode(SCHEMA, &json!({ "name": "  수학공부  " }), DecodeMode::Create)
            .finish()
            .unwrap();
        assert_eq!(fields.take_text("name").as_deref(), Some("수학공부"));

        let errors = decode(SCHEMA, &json!({ "name": "abcdef" }), DecodeMode::Create)
            .finish()
            .unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["Ensure this field has no more than 5 characters.".to_string()][..])
        );
    }

    #[test]
    fn text_rejects_non_scalar_values() {
        let errors = decode(SCHEMA, &json!({ "name": ["a"] }), DecodeMode::Create)
            .finish()
            .unwrap_err();
        assert_eq!(errors.get("name"), Some(&[MSG_INVALID_STRING.to_string()][..]));
    }

    #[test]
    fn null_handling_follows_nullable_flag() {
        let mut fields = decode(SCHEMA, &json!({ "note": null }), DecodeMode::Partial)
            .finish()
            .unwrap();
        assert_eq!(fields.take_nullable_text("note"), Some(None));

        let errors = decode(SCHEMA, &json!({ "count": null }), DecodeMode::Partial)
            .finish()
            .unwrap_err();
        assert_eq!(errors.get("count"), Some(&[MSG_NULL.to_string()][..]));
    }

    #[test]
    fn integers_accept_numeric_strings_and_integral_floats() {
        assert_eq!(coerce_integer(&json!(-15)), Some(-15));
        assert_eq!(coerce_integer(&json!(" 42 ")), Some(42));
        assert_eq!(coerce_integer(&json!(5.0)), Some(5));
        assert_eq!(coerce_integer(&json!(5.5)), None);
        assert_eq!(coerce_integer(&json!(true)), None);
    }

    #[test]
    fn dates_must_be_iso_calendar_dates() {
        assert_eq!(
            coerce_date(&json!("2024-03-01")),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(coerce_date(&json!("2024-02-30")), None);
        assert_eq!(coerce_date(&json!("03/01/2024")), None);
        assert_eq!(coerce_date(&json!(20240301)), None);
    }

    #[test]
    fn dates_need_a_four_digit_year_in_range() {
        assert_eq!(
            coerce_date(&json!(" 2024-3-1 ")),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            coerce_date(&json!("0001-01-01")),
            NaiveDate::from_ymd_opt(1, 1, 1)
        );
        assert_eq!(
            coerce_date(&json!("9999-12-31")),
            NaiveDate::from_ymd_opt(9999, 12, 31)
        );
        assert_eq!(coerce_date(&json!("0000-01-01")), None);
        assert_eq!(coerce_date(&json!("+10000-01-01")), None);
        assert_eq!(coerce_date(&json!("+2024-01-01")), None);
        assert_eq!(coerce_date(&json!("-2024-01-01")), None);
        assert_eq!(coerce_date(&json!("24-01-01")), None);
        assert_eq!(coerce_date(&json!("2024-001-01")), None);
        assert_eq!(coerce_date(&json!("2024-01-01-01")), None);
    }

    #[test]
    fn text_rejects_null_characters() {
        let errors = decode(SCHEMA, &json!({ "name": "a\u{0}b" }), DecodeMode::Create)
            .finish()
            .unwrap_err();
        assert_eq!(errors.get("name"), Some(&[MSG_NULL_CHARACTER.to_string()][..]));
    }

    #[test]
    fn primary_key_reports_received_type() {
        assert_eq!(coerce_primary_key(&json!(7)), Ok(7));
        assert_eq!(coerce_primary_key(&json!("7")), Ok(7));
        assert_eq!(coerce_primary_key(&json!(7.0)), Ok(7));
        assert_eq!(
            coerce_primary_key(&json!(7.5)),
            Err("Incorrect type. Expected pk value, received number.".to_string())
        );
        assert_eq!(
            coerce_primary_key(&json!(true)),
            Err("Incorrect type. Expected pk value, received boolean.".to_string())
        );
        assert_eq!(
            coerce_primary_key(&json!("seven")),
            Err("Incorrect type. Expected pk value, received string.".to_string())
        );
    }

    #[test]
    fn non_object_body_is_a_non_field_error() {
        let errors = decode(SCHEMA, &json!([1, 2]), DecodeMode::Create)
            .finish()
            .unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS),
            Some(&["Invalid data. Expected a dictionary, but got array.".to_string()][..])
        );
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = FieldErrors::required("b");
        errors.add("a", "bad");
        assert_eq!(errors.to_string(), "a: bad; b: This field is required.");
    }
}
