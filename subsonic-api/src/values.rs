//! Request parameter marshaling.
//!
//! Every Subsonic call is a GET with flat query parameters. A request
//! descriptor (a plain struct) implements [`QueryParams`] and writes its
//! fields, in declaration order, into a [`QueryWriter`]. Each field has a
//! wire name and an omit-if-empty flag:
//!
//! | Field shape   | Emitted as                           | Omitted when                          |
//! |---------------|--------------------------------------|---------------------------------------|
//! | scalar `T`    | one value                            | `omit_empty` and `T` is its zero value |
//! | `Option<T>`   | one value when `Some`                | `None`; or `omit_empty` and empty text |
//! | `Vec<T>`      | one value per element, order kept    | `omit_empty` and the vector is empty  |
//!
//! Descriptors are normally declared with [`query_params!`], which keys a
//! field by its Rust name unless an explicit wire name is given, and
//! rejects an empty explicit name at compile time:
//!
//! ```ignore
//! query_params!(CreateShare {
//!     ids as "id";
//!     description, omit_empty;
//!     expires, omit_empty;
//! });
//! ```

use crate::error::{QueryTextError, Result, SubsonicError};
use crate::types::{SubsonicId, UnixMillis};

use chrono::{DateTime, SecondsFormat, TimeZone};

use std::fmt::Display;

/// Ordered multimap of query parameters (`name -> [values]`).
///
/// Insertion order of keys is preserved, and so is the order of repeated
/// values under one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    pairs: Vec<(String, Vec<String>)>,
}

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding one `key=value` pair.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = Self::new();
        values.set(key, value);
        values
    }

    /// Replace all values of `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_all(key, vec![value.into()]);
    }

    /// Add one more value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.pairs.push((key, vec![value.into()])),
        }
    }

    /// Replace all values of `key` with `values`.
    pub fn insert_all(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.pairs.push((key, values)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Append every entry of `other`, replacing keys already present.
    pub fn extend(&mut self, other: QueryValues) {
        for (key, values) in other.pairs {
            self.insert_all(key, values);
        }
    }

    /// Percent-encode as `k=v&k=v2`; a repeated key appears once per value.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.pairs {
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&urlencoding::encode(key));
                out.push('=');
                out.push_str(&urlencoding::encode(value));
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = QueryValues::new();
        for (k, v) in iter {
            values.append(k, v);
        }
        values
    }
}

/// Text form of a single scalar parameter value.
pub trait ToQueryText {
    /// Render the value; fails for values with no textual form.
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError>;

    /// Whether this is the type's zero value (0, `false`, empty string,
    /// the Unix epoch).
    fn is_zero(&self) -> bool {
        false
    }
}

macro_rules! integer_query_text {
    ($($t:ty),*) => {$(
        impl ToQueryText for $t {
            fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
                Ok(self.to_string())
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

integer_query_text!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! float_query_text {
    ($($t:ty),*) => {$(
        impl ToQueryText for $t {
            fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
                if self.is_finite() {
                    Ok(self.to_string())
                } else {
                    Err(QueryTextError::NonFinite(f64::from(*self)))
                }
            }

            fn is_zero(&self) -> bool {
                *self == 0.0
            }
        }
    )*};
}

float_query_text!(f32, f64);

impl ToQueryText for bool {
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
        Ok(if *self { "true" } else { "false" }.to_owned())
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl ToQueryText for String {
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
        Ok(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ToQueryText for &str {
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
        Ok((*self).to_owned())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ToQueryText for SubsonicId {
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
        Ok(self.as_str().to_owned())
    }

    fn is_zero(&self) -> bool {
        self.as_str().is_empty()
    }
}

/// RFC 3339 with seconds precision, keeping the value's own offset.
impl<Tz: TimeZone> ToQueryText for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
        Ok(self.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl ToQueryText for UnixMillis {
    fn to_query_text(&self) -> std::result::Result<String, QueryTextError> {
        Ok(self.as_millis().to_string())
    }

    fn is_zero(&self) -> bool {
        self.as_millis() == 0
    }
}

/// Text produced by one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryText {
    /// No value at all; never emitted.
    Null,
    Single { text: String, zero: bool },
    Repeated(Vec<String>),
}

/// Shape of a descriptor field: scalar, optional scalar, or repeated.
pub trait QueryField {
    fn query_text(&self) -> std::result::Result<QueryText, QueryTextError>;
}

impl<T: ToQueryText> QueryField for T {
    fn query_text(&self) -> std::result::Result<QueryText, QueryTextError> {
        Ok(QueryText::Single {
            text: self.to_query_text()?,
            zero: self.is_zero(),
        })
    }
}

impl<T: ToQueryText> QueryField for Option<T> {
    fn query_text(&self) -> std::result::Result<QueryText, QueryTextError> {
        match self {
            None => Ok(QueryText::Null),
            Some(value) => {
                let text = value.to_query_text()?;
                let zero = text.is_empty();
                Ok(QueryText::Single { text, zero })
            }
        }
    }
}

impl<T: ToQueryText> QueryField for Vec<T> {
    fn query_text(&self) -> std::result::Result<QueryText, QueryTextError> {
        self.iter()
            .map(ToQueryText::to_query_text)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(QueryText::Repeated)
    }
}

/// Collects the fields of one request descriptor.
#[derive(Debug, Default)]
pub struct QueryWriter {
    values: QueryValues,
}

impl QueryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one field.
    ///
    /// Fails on an empty `name` or when the value has no text form; the
    /// caller must then discard the whole writer.
    pub fn field<F: QueryField + ?Sized>(
        &mut self,
        name: &str,
        value: &F,
        omit_empty: bool,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(SubsonicError::InvalidParamName(name.to_owned()));
        }
        let text = value
            .query_text()
            .map_err(|source| SubsonicError::InvalidQueryValue {
                name: name.to_owned(),
                source,
            })?;
        match text {
            QueryText::Null => {}
            QueryText::Single { zero: true, .. } if omit_empty => {}
            QueryText::Single { text, .. } => self.values.set(name, text),
            QueryText::Repeated(list) if list.is_empty() && omit_empty => {}
            QueryText::Repeated(list) => self.values.insert_all(name, list),
        }
        Ok(())
    }

    pub fn finish(self) -> QueryValues {
        self.values
    }
}

/// A request descriptor that can be flattened into query parameters.
pub trait QueryParams {
    fn write_query(&self, q: &mut QueryWriter) -> Result<()>;
}

/// Marshal a request descriptor into its query parameters.
///
/// Pure function of its input; no partial result is returned on error.
pub fn marshal_values<P: QueryParams + ?Sized>(req: &P) -> Result<QueryValues> {
    let mut q = QueryWriter::new();
    req.write_query(&mut q)?;
    Ok(q.finish())
}

/// Implement [`QueryParams`] for a struct from a field table.
///
/// Each entry is `field [as "wireName"] [, omit_empty];`.
macro_rules! query_params {
    (@name $field:ident) => {
        stringify!($field)
    };
    (@name $field:ident $name:literal) => {{
        const NAME: &str = $name;
        const _: () = assert!(!NAME.is_empty(), "wire name must not be empty");
        NAME
    }};
    (@omit) => {
        false
    };
    (@omit omit_empty) => {
        true
    };
    ($ty:ident { $($field:ident $(as $name:literal)? $(, $flag:ident)?;)* }) => {
        impl $crate::values::QueryParams for $ty {
            fn write_query(
                &self,
                q: &mut $crate::values::QueryWriter,
            ) -> $crate::error::Result<()> {
                $(
                    q.field(
                        $crate::values::query_params!(@name $field $($name)?),
                        &self.$field,
                        $crate::values::query_params!(@omit $($flag)?),
                    )?;
                )*
                Ok(())
            }
        }
    };
}

pub(crate) use query_params;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[derive(Default)]
    struct Foo {
        a: String,
        b: i32,
        d: String,
        e: Option<i32>,
        f: Option<DateTime<FixedOffset>>,
        h: Vec<String>,
        i: Vec<i64>,
        submission: Option<bool>,
    }

    query_params!(Foo {
        a as "alpha";
        b;
        d, omit_empty;
        e, omit_empty;
        f as "from", omit_empty;
        h, omit_empty;
        i;
        submission, omit_empty;
    });

    #[test]
    fn marshal_full_descriptor() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let foo = Foo {
            a: "test".into(),
            b: 4,
            f: Some(offset.with_ymd_and_hms(2024, 2, 5, 16, 32, 17).unwrap()),
            h: vec!["a".into(), "b".into(), "c".into()],
            i: vec![3, 1, 2],
            submission: Some(false),
            ..Foo::default()
        };
        let values = marshal_values(&foo).unwrap();
        assert_eq!(values.first("alpha"), Some("test"));
        assert_eq!(values.first("b"), Some("4"));
        assert_eq!(values.first("from"), Some("2024-02-05T16:32:17-07:00"));
        assert_eq!(values.get("h").unwrap(), ["a", "b", "c"]);
        assert_eq!(values.get("i").unwrap(), ["3", "1", "2"]);
        // An explicitly set `false` is not "empty".
        assert_eq!(values.first("submission"), Some("false"));
        assert!(!values.contains_key("d"));
        assert!(!values.contains_key("e"));
        let keys: Vec<&str> = values.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["alpha", "b", "from", "h", "i", "submission"]);
    }

    #[test]
    fn omit_empty_skips_zero_values() {
        struct Zeroes {
            n: u32,
            flag: bool,
            s: String,
            id: SubsonicId,
            opt: Option<String>,
            list: Vec<SubsonicId>,
        }
        query_params!(Zeroes {
            n, omit_empty;
            flag, omit_empty;
            s, omit_empty;
            id, omit_empty;
            opt, omit_empty;
            list, omit_empty;
        });

        let values = marshal_values(&Zeroes {
            n: 0,
            flag: false,
            s: String::new(),
            id: SubsonicId::default(),
            opt: Some(String::new()),
            list: vec![],
        })
        .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn zero_values_kept_without_omit_flag() {
        struct Plain {
            n: u32,
            s: String,
            list: Vec<String>,
            missing: Option<u32>,
        }
        query_params!(Plain { n; s; list; missing; });

        let values = marshal_values(&Plain {
            n: 0,
            s: String::new(),
            list: vec![],
            missing: None,
        })
        .unwrap();
        assert_eq!(values.first("n"), Some("0"));
        assert_eq!(values.first("s"), Some(""));
        assert_eq!(values.get("list"), Some(&[][..]));
        // Null never reaches the query string.
        assert!(!values.contains_key("missing"));
    }

    #[test]
    fn empty_wire_name_fails_whole_call() {
        struct Broken {
            ok: u32,
        }
        impl QueryParams for Broken {
            fn write_query(&self, q: &mut QueryWriter) -> Result<()> {
                q.field("ok", &self.ok, false)?;
                q.field("", &self.ok, false)
            }
        }

        let err = marshal_values(&Broken { ok: 1 }).unwrap_err();
        assert!(matches!(err, SubsonicError::InvalidParamName(_)));
    }

    #[test]
    fn non_finite_float_is_rejected() {
        struct Gain {
            gain: Option<f64>,
        }
        query_params!(Gain { gain, omit_empty; });

        let err = marshal_values(&Gain {
            gain: Some(f64::NAN),
        })
        .unwrap_err();
        match err {
            SubsonicError::InvalidQueryValue { name, source } => {
                assert_eq!(name, "gain");
                assert!(matches!(source, QueryTextError::NonFinite(v) if v.is_nan()));
            }
            other => panic!("unexpected error: {other}"),
        }

        let values = marshal_values(&Gain { gain: Some(0.5) }).unwrap();
        assert_eq!(values.first("gain"), Some("0.5"));
    }

    #[test]
    fn epoch_times_are_empty() {
        struct Times {
            at: DateTime<Utc>,
            ms: UnixMillis,
        }
        query_params!(Times {
            at, omit_empty;
            ms, omit_empty;
        });

        let values = marshal_values(&Times {
            at: DateTime::<Utc>::default(),
            ms: UnixMillis::default(),
        })
        .unwrap();
        assert!(values.is_empty());

        let values = marshal_values(&Times {
            at: Utc.with_ymd_and_hms(2024, 2, 5, 23, 32, 17).unwrap(),
            ms: UnixMillis::from_millis(1).unwrap(),
        })
        .unwrap();
        assert_eq!(values.first("at"), Some("2024-02-05T23:32:17Z"));
        assert_eq!(values.first("ms"), Some("1"));
    }

    #[test]
    fn strings_are_emitted_verbatim() {
        struct Quoted {
            title: String,
        }
        query_params!(Quoted { title; });

        let values = marshal_values(&Quoted {
            title: "\"quoted\"".into(),
        })
        .unwrap();
        assert_eq!(values.first("title"), Some("\"quoted\""));
    }

    #[test]
    fn utc_time_uses_z_suffix() {
        let t = Utc.with_ymd_and_hms(2024, 2, 5, 23, 32, 17).unwrap();
        assert_eq!(t.to_query_text().unwrap(), "2024-02-05T23:32:17Z");
    }

    #[test]
    fn encode_repeats_keys_and_escapes() {
        let mut values = QueryValues::new();
        values.set("query", "AC/DC & co");
        values.append("id", "1");
        values.append("id", "2");
        assert_eq!(values.encode(), "query=AC%2FDC%20%26%20co&id=1&id=2");

        values.set("id", "3");
        assert_eq!(values.get("id").unwrap(), ["3"]);
    }
}
