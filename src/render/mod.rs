//! Indented text report for arbitrary records.
//!
//! The renderer walks any [`Serialize`] value through a custom serde
//! serializer, so decoded API payloads need no per-type printing code.
//! Every populated field of a record becomes one line, `name: value`, and
//! nested records open an indented block under a `name:` header:
//!
//! ```text
//! name: web01
//! cpu:
//!   number: 2
//!   power: 1600
//! ```
//!
//! Types with their own wire text (addresses, timestamps) serialize as
//! strings and therefore print their canonical text. Absent optional fields
//! and values that have no printable form are left out; rendering never
//! fails.

use std::fmt::{self, Write as _};
use std::io;

use serde::ser::{self, Impossible, Serialize};

/// Spaces emitted per indentation level.
pub const INDENT_WIDTH: usize = 2;

/// Print the report of `value` to standard output.
pub fn render<T: Serialize + ?Sized>(value: &T) {
    render_at(value, 0);
}

/// Print the report of `value` to standard output, starting at `indent`.
pub fn render_at<T: Serialize + ?Sized>(value: &T, indent: usize) {
    // A closed stdout leaves nothing to report to.
    let _ = render_to(&mut io::stdout().lock(), value, indent);
}

/// Write the report of `value` to `out`, starting at `indent`.
pub fn render_to<W, T>(out: &mut W, value: &T, indent: usize) -> io::Result<()>
where
    W: io::Write + ?Sized,
    T: Serialize + ?Sized,
{
    out.write_all(render_to_string(value, indent).as_bytes())
}

/// Build the report of `value` as a string.
///
/// Only records produce output. Any other top-level value renders as
/// nothing.
pub fn render_to_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> String {
    let mut report = Report::default();
    let _ = value.serialize(RecordSerializer {
        report: &mut report,
        indent,
    });
    report.text
}

/// Marker fields that only carry XML namespace information.
fn is_tag_field(name: &str) -> bool {
    let name = name.strip_prefix('@').unwrap_or(name);
    name == "xmlns" || name.starts_with("xmlns:")
}

#[derive(Default)]
struct Report {
    text: String,
}

impl Report {
    fn line(&mut self, indent: usize, args: fmt::Arguments<'_>) {
        self.text.extend(std::iter::repeat(' ').take(indent * INDENT_WIDTH));
        let _ = self.text.write_fmt(args);
        self.text.push('\n');
    }
}

/// Raised for values without a printable form; always swallowed by the
/// enclosing field, element or entry.
#[derive(Debug)]
struct Unprintable;

impl fmt::Display for Unprintable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value has no printable form")
    }
}

impl std::error::Error for Unprintable {}

impl ser::Error for Unprintable {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        Unprintable
    }
}

/// Top level: accepts a record, possibly wrapped in `Option` or a newtype.
struct RecordSerializer<'a> {
    report: &'a mut Report,
    indent: usize,
}

macro_rules! unprintable {
    ($($method:ident($($arg:ty),*);)*) => {
        $(
            fn $method(self $(, _: $arg)*) -> Result<Self::Ok, Self::Error> {
                Err(Unprintable)
            }
        )*
    };
}

impl<'a> ser::Serializer for RecordSerializer<'a> {
    type Ok = ();
    type Error = Unprintable;
    type SerializeSeq = Impossible<(), Unprintable>;
    type SerializeTuple = Impossible<(), Unprintable>;
    type SerializeTupleStruct = Impossible<(), Unprintable>;
    type SerializeTupleVariant = Impossible<(), Unprintable>;
    type SerializeMap = Impossible<(), Unprintable>;
    type SerializeStruct = Fields<'a>;
    type SerializeStructVariant = Impossible<(), Unprintable>;

    unprintable! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_none();
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_unit_variant(&'static str, u32, &'static str);
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), Unprintable> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Unprintable> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), Unprintable> {
        Err(Unprintable)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Unprintable> {
        Ok(Fields {
            report: self.report,
            indent: self.indent,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Unprintable> {
        Err(Unprintable)
    }
}

/// Fields of a record, printed in declaration order.
struct Fields<'a> {
    report: &'a mut Report,
    indent: usize,
}

impl ser::SerializeStruct for Fields<'_> {
    type Ok = ();
    type Error = Unprintable;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Unprintable> {
        if is_tag_field(key) {
            return Ok(());
        }
        let _ = value.serialize(FieldSerializer {
            report: &mut *self.report,
            name: key,
            indent: self.indent,
        });
        Ok(())
    }

    fn end(self) -> Result<(), Unprintable> {
        Ok(())
    }
}

/// A single named value; dispatches on the value's kind.
struct FieldSerializer<'a> {
    report: &'a mut Report,
    name: &'a str,
    indent: usize,
}

impl FieldSerializer<'_> {
    fn scalar(self, value: impl fmt::Display) -> Result<(), Unprintable> {
        self.report
            .line(self.indent, format_args!("{}: {}", self.name, value));
        Ok(())
    }

    fn header(&mut self) {
        self.report.line(self.indent, format_args!("{}:", self.name));
    }
}

impl<'a> ser::Serializer for FieldSerializer<'a> {
    type Ok = ();
    type Error = Unprintable;
    type SerializeSeq = Elements<'a>;
    type SerializeTuple = Impossible<(), Unprintable>;
    type SerializeTupleStruct = Impossible<(), Unprintable>;
    type SerializeTupleVariant = Impossible<(), Unprintable>;
    type SerializeMap = Entries<'a>;
    type SerializeStruct = Fields<'a>;
    type SerializeStructVariant = Impossible<(), Unprintable>;

    fn serialize_bool(self, v: bool) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_i8(self, v: i8) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_i16(self, v: i16) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_i32(self, v: i32) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_i64(self, v: i64) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_i128(self, v: i128) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_u8(self, v: u8) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_u16(self, v: u16) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_u32(self, v: u32) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_u64(self, v: u64) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_u128(self, v: u128) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_f32(self, v: f32) -> Result<(), Unprintable> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), Unprintable> {
        self.scalar(format_args!("{:.6}", v))
    }

    fn serialize_char(self, v: char) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_str(self, v: &str) -> Result<(), Unprintable> {
        self.scalar(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Unprintable> {
        Err(Unprintable)
    }

    fn serialize_none(self) -> Result<(), Unprintable> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), Unprintable> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Unprintable> {
        Err(Unprintable)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Unprintable> {
        Err(Unprintable)
    }

    // Field-less enums stand in for the service's enumerated strings.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), Unprintable> {
        self.scalar(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Unprintable> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), Unprintable> {
        Err(Unprintable)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Unprintable> {
        Ok(Elements {
            report: self.report,
            name: self.name,
            indent: self.indent,
        })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_map(mut self, _len: Option<usize>) -> Result<Self::SerializeMap, Unprintable> {
        self.header();
        Ok(Entries {
            report: self.report,
            indent: self.indent + 1,
            key: None,
        })
    }

    fn serialize_struct(
        mut self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Unprintable> {
        self.header();
        Ok(Fields {
            report: self.report,
            indent: self.indent + 1,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Unprintable> {
        Err(Unprintable)
    }
}

/// Collection elements; each one is printed as if it were the field itself,
/// so the field name heads every element's block.
struct Elements<'a> {
    report: &'a mut Report,
    name: &'a str,
    indent: usize,
}

impl ser::SerializeSeq for Elements<'_> {
    type Ok = ();
    type Error = Unprintable;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Unprintable> {
        let _ = value.serialize(FieldSerializer {
            report: &mut *self.report,
            name: self.name,
            indent: self.indent,
        });
        Ok(())
    }

    fn end(self) -> Result<(), Unprintable> {
        Ok(())
    }
}

/// Mapping entries; the key names the entry one level below the header and
/// a record value opens its block one level further in.
struct Entries<'a> {
    report: &'a mut Report,
    indent: usize,
    key: Option<String>,
}

impl ser::SerializeMap for Entries<'_> {
    type Ok = ();
    type Error = Unprintable;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Unprintable> {
        self.key = key.serialize(KeySerializer).ok();
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Unprintable> {
        if let Some(key) = self.key.take() {
            let _ = value.serialize(FieldSerializer {
                report: &mut *self.report,
                name: &key,
                indent: self.indent,
            });
        }
        Ok(())
    }

    fn end(self) -> Result<(), Unprintable> {
        Ok(())
    }
}

/// Turns scalar mapping keys into their display text.
struct KeySerializer;

impl KeySerializer {
    fn text(value: impl fmt::Display) -> Result<String, Unprintable> {
        Ok(value.to_string())
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Unprintable;
    type SerializeSeq = Impossible<String, Unprintable>;
    type SerializeTuple = Impossible<String, Unprintable>;
    type SerializeTupleStruct = Impossible<String, Unprintable>;
    type SerializeTupleVariant = Impossible<String, Unprintable>;
    type SerializeMap = Impossible<String, Unprintable>;
    type SerializeStruct = Impossible<String, Unprintable>;
    type SerializeStructVariant = Impossible<String, Unprintable>;

    fn serialize_bool(self, v: bool) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_i8(self, v: i8) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_i16(self, v: i16) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_i32(self, v: i32) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_i64(self, v: i64) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_u8(self, v: u8) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_u16(self, v: u16) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_u32(self, v: u32) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_u64(self, v: u64) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_f32(self, v: f32) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_f64(self, v: f64) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_char(self, v: char) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_str(self, v: &str) -> Result<String, Unprintable> {
        Self::text(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_none(self) -> Result<String, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, Unprintable> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, Unprintable> {
        Self::text(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, Unprintable> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Unprintable> {
        Err(Unprintable)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Unprintable> {
        Err(Unprintable)
    }
}
