//! Scalar wire types with non-obvious JSON encodings.
//!
//! Subsonic servers disagree on how they send some values. Identifiers come
//! back as strings from most servers but as bare numbers from others;
//! durations are integral seconds; sort articles are one space-joined
//! string. The types here normalise those shapes on decode.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::time::Duration;

// 2^63 and 2^64; both exact in f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

// ── SubsonicId ──────────────────────────────────────────────────────

/// Opaque identifier of a server object.
///
/// Accepts a JSON string or a JSON number on decode (`42` becomes `"42"`)
/// and always serializes as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubsonicId(String);

impl SubsonicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SubsonicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SubsonicId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SubsonicId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for SubsonicId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SubsonicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct IdVisitor;

impl IdVisitor {
    fn mismatch<E: de::Error>(kind: &str) -> E {
        E::custom(format!("cannot convert {kind} to Subsonic ID"))
    }
}

impl<'de> Visitor<'de> for IdVisitor {
    type Value = SubsonicId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or number identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SubsonicId, E> {
        Ok(SubsonicId(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SubsonicId, E> {
        Ok(SubsonicId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SubsonicId, E> {
        Ok(SubsonicId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SubsonicId, E> {
        Ok(SubsonicId(v.to_string()))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SubsonicId, E> {
        if !v.is_finite() {
            return Err(Self::mismatch("non-finite number"));
        }
        let whole = v.trunc();
        if whole < -I64_BOUND || whole >= I64_BOUND {
            return Err(Self::mismatch("out-of-range number"));
        }
        Ok(SubsonicId((whole as i64).to_string()))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<SubsonicId, E> {
        Err(Self::mismatch("bool"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<SubsonicId, E> {
        Err(Self::mismatch("null"))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, _: A) -> Result<SubsonicId, A::Error> {
        Err(Self::mismatch("array"))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, _: A) -> Result<SubsonicId, A::Error> {
        Err(Self::mismatch("object"))
    }
}

impl<'de> Deserialize<'de> for SubsonicId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}

// ── SubsonicDuration ────────────────────────────────────────────────

/// Elapsed time sent by the server as a number of seconds.
///
/// Serializes as a human-readable string (`125` seconds becomes `"2m5s"`),
/// so encoding and decoding are deliberately not symmetric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubsonicDuration(pub Duration);

impl SubsonicDuration {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl From<Duration> for SubsonicDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl fmt::Display for SubsonicDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.0))
    }
}

/// Format like `1h2m3s`, `1.5s`, `250ms`, `0s`.
fn format_duration(d: Duration) -> String {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, 6));
    }

    let secs = nanos / NANOS_PER_SEC;
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    let sec_part = decimal(s * NANOS_PER_SEC + nanos % NANOS_PER_SEC, 9);
    if h > 0 {
        format!("{h}h{m}m{sec_part}s")
    } else if m > 0 {
        format!("{m}m{sec_part}s")
    } else {
        format!("{sec_part}s")
    }
}

/// `value / 10^scale` in decimal with trailing fractional zeros removed.
fn decimal(value: u128, scale: u32) -> String {
    let unit = 10u128.pow(scale);
    let (int, frac) = (value / unit, value % unit);
    if frac == 0 {
        return int.to_string();
    }
    let digits = format!("{frac:0width$}", width = scale as usize);
    format!("{int}.{}", digits.trim_end_matches('0'))
}

impl Serialize for SubsonicDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = SubsonicDuration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number of seconds")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SubsonicDuration, E> {
        Ok(SubsonicDuration::from_secs(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SubsonicDuration, E> {
        u64::try_from(v)
            .map(SubsonicDuration::from_secs)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SubsonicDuration, E> {
        if !v.is_finite() || v < 0.0 || v >= U64_BOUND {
            return Err(E::invalid_value(Unexpected::Float(v), &self));
        }
        Ok(SubsonicDuration::from_secs(v.trunc() as u64))
    }
}

impl<'de> Deserialize<'de> for SubsonicDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DurationVisitor)
    }
}

// ── ItemDate ────────────────────────────────────────────────────────

/// A partial date: a year, optionally with month and day.
///
/// Zero means "unspecified"; no calendar validation is performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ItemDate {
    pub fn is_empty(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    /// The full calendar date, when every part is present and valid.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for ItemDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.day) {
            (0, _) => write!(f, "{:04}", self.year),
            (m, 0) => write!(f, "{:04}-{m:02}", self.year),
            (m, d) => write!(f, "{:04}-{m:02}-{d:02}", self.year),
        }
    }
}

// ── IgnoredArticles ─────────────────────────────────────────────────

/// Words skipped when sorting an index (`"The El La"` on the wire).
///
/// Split and joined on single spaces; a word containing a space cannot be
/// represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredArticles(pub Vec<String>);

impl IgnoredArticles {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Self(Vec::new())
        } else {
            Self(raw.split(' ').map(str::to_owned).collect())
        }
    }

    pub fn join(&self) -> String {
        self.0.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for IgnoredArticles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.join())
    }
}

impl<'de> Deserialize<'de> for IgnoredArticles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// ── UnixMillis ──────────────────────────────────────────────────────

/// A timestamp carried as milliseconds since the Unix epoch.
///
/// Used for chat message times, and for query parameters such as share
/// expiry and scrobble time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnixMillis(pub DateTime<Utc>);

impl UnixMillis {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_millis(ms: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(ms).single().map(Self)
    }

    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for UnixMillis {
    fn from(t: DateTime<Tz>) -> Self {
        Self(t.with_timezone(&Utc))
    }
}

impl Serialize for UnixMillis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for UnixMillis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Self::from_millis(ms)
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Signed(ms), &"a timestamp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_strings_and_numbers() {
        let id: SubsonicId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
        let id: SubsonicId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(id.as_str(), "abc");
        let id: SubsonicId = serde_json::from_str("7.9").unwrap();
        assert_eq!(id.as_str(), "7");
        assert_eq!(serde_json::to_string(&SubsonicId::from("42")).unwrap(), r#""42""#);
    }

    #[test]
    fn id_rejects_other_json_types() {
        let err = serde_json::from_str::<SubsonicId>("true").unwrap_err();
        assert!(err.to_string().contains("cannot convert bool to Subsonic ID"));
        assert!(serde_json::from_str::<SubsonicId>("null").is_err());
        assert!(serde_json::from_str::<SubsonicId>("[1]").is_err());
    }

    #[test]
    fn id_rejects_floats_beyond_i64() {
        let err = serde_json::from_str::<SubsonicId>("1e20").unwrap_err();
        assert!(err.to_string().contains("cannot convert out-of-range number"));
        assert!(serde_json::from_str::<SubsonicId>("-1e19").is_err());

        let id: SubsonicId = serde_json::from_str("-9.2e18").unwrap();
        assert_eq!(id.as_str(), "-9200000000000000000");
    }

    #[test]
    fn duration_decodes_seconds_and_prints_human_form() {
        let d: SubsonicDuration = serde_json::from_str("125").unwrap();
        assert_eq!(d.as_duration(), Duration::from_secs(125));
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""2m5s""#);

        let d: SubsonicDuration = serde_json::from_str("3.99").unwrap();
        assert_eq!(d.as_duration(), Duration::from_secs(3));

        assert!(serde_json::from_str::<SubsonicDuration>("-1").is_err());
        assert!(serde_json::from_str::<SubsonicDuration>("1e30").is_err());
        assert!(serde_json::from_str::<SubsonicDuration>(r#""125""#).is_err());
    }

    #[test]
    fn duration_formatting() {
        let cases = [
            (Duration::ZERO, "0s"),
            (Duration::from_secs(3600), "1h0m0s"),
            (Duration::from_secs(3723), "1h2m3s"),
            (Duration::from_millis(1500), "1.5s"),
            (Duration::from_millis(250), "250ms"),
            (Duration::from_micros(1500), "1.5ms"),
            (Duration::from_nanos(12), "12ns"),
        ];
        for (d, want) in cases {
            assert_eq!(format_duration(d), want, "{d:?}");
        }
    }

    #[test]
    fn ignored_articles_split_and_join() {
        let a: IgnoredArticles = serde_json::from_str(r#""""#).unwrap();
        assert!(a.is_empty());

        let a: IgnoredArticles = serde_json::from_str(r#""The A An""#).unwrap();
        assert_eq!(a.0, ["The", "A", "An"]);
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""The A An""#);
    }

    #[test]
    fn item_date_parts_are_optional() {
        let d: ItemDate = serde_json::from_str(r#"{"year":1977}"#).unwrap();
        assert_eq!(d, ItemDate { year: 1977, month: 0, day: 0 });
        assert_eq!(d.to_naive_date(), None);
        assert_eq!(d.to_string(), "1977");

        let d: ItemDate = serde_json::from_str(r#"{"year":1977,"month":5,"day":25}"#).unwrap();
        assert_eq!(d.to_naive_date(), NaiveDate::from_ymd_opt(1977, 5, 25));
        assert_eq!(d.to_string(), "1977-05-25");
    }

    #[test]
    fn unix_millis_round_trip() {
        let t: UnixMillis = serde_json::from_str("1706000000123").unwrap();
        assert_eq!(t.as_millis(), 1_706_000_000_123);
        assert_eq!(serde_json::to_string(&t).unwrap(), "1706000000123");
    }
}
