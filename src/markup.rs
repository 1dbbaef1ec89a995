//! Conversion between the nested map representation of a model and the XML
//! documents exchanged with the API.
//!
//! Parsing follows the shape Xero clients have always relied on: the root element
//! is dropped, an element with children becomes an object keyed by child name, a
//! child name that repeats becomes a list, a text-only element becomes a string
//! and an empty element becomes an empty object. Attributes are kept under
//! `@attributes`.
//!
//! Writing is the inverse, with one rule worth calling out: a list stored under
//! key `K` is written as repeated sibling `<K>` elements rather than a wrapper
//! element. `{"LineItems": {"LineItem": [a, b]}}` therefore becomes
//! `<LineItems><LineItem>a</LineItem><LineItem>b</LineItem></LineItems>`, which is
//! exactly what the API expects and what [`parse`] reads back.

use std::borrow::Cow;

use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    service::Format,
};

const ATTRIBUTES_KEY: &str = "@attributes";
/// Text of an element that also carries attributes.
const TEXT_KEY: &str = "0";

/// Parses a response body in the given format into the canonical nested map.
pub fn parse(body: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => serde_json::from_str(body)
            .map_err(|e| Error::DeserializationError(e, Some(body.to_string()))),
        Format::Xml => parse_xml(body),
    }
}

/// Writes `map` as an XML document with root element `root`.
///
/// When `child` is given the map is wrapped in one more element, producing
/// `<Invoices><Invoice>...</Invoice></Invoices>`.
pub fn to_markup(root: &str, child: Option<&str>, map: &Map<String, Value>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", None, None)))?;
    write_event(&mut writer, Event::Start(BytesStart::new(root)))?;
    match child {
        Some(child) => write_object(&mut writer, child, map)?,
        None => write_map(&mut writer, map)?,
    }
    write_event(&mut writer, Event::End(BytesEnd::new(root)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Markup(e.to_string()))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Markup(e.to_string()))
}

fn write_map(writer: &mut Writer<Vec<u8>>, map: &Map<String, Value>) -> Result<()> {
    for (key, value) in map {
        if key == ATTRIBUTES_KEY || key == TEXT_KEY {
            continue;
        }
        write_field(writer, key, value)?;
    }
    Ok(())
}

fn write_field(writer: &mut Writer<Vec<u8>>, key: &str, value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => write_object(writer, key, map),
        // Every element of a list re-opens `<key>` as a sibling.
        Value::Array(items) if items.is_empty() => {
            write_event(writer, Event::Empty(BytesStart::new(key)))
        }
        Value::Array(items) => {
            for item in items {
                write_field(writer, key, item)?;
            }
            Ok(())
        }
        scalar => match scalar_text(scalar) {
            Some(text) if !text.is_empty() => {
                write_event(writer, Event::Start(BytesStart::new(key)))?;
                write_event(writer, Event::Text(BytesText::new(&text)))?;
                write_event(writer, Event::End(BytesEnd::new(key)))
            }
            _ => write_event(writer, Event::Empty(BytesStart::new(key))),
        },
    }
}

fn write_object(writer: &mut Writer<Vec<u8>>, key: &str, map: &Map<String, Value>) -> Result<()> {
    let mut start = BytesStart::new(key);
    if let Some(Value::Object(attributes)) = map.get(ATTRIBUTES_KEY) {
        for (name, value) in attributes {
            let text = scalar_text(value).unwrap_or_default();
            start.push_attribute((name.as_str(), &*text));
        }
    }

    let has_children = map.keys().any(|k| k != ATTRIBUTES_KEY && k != TEXT_KEY);
    let text = map
        .get(TEXT_KEY)
        .and_then(scalar_text)
        .filter(|text| !text.is_empty());
    if has_children {
        write_event(writer, Event::Start(start))?;
        write_map(writer, map)?;
        write_event(writer, Event::End(BytesEnd::new(key)))
    } else if let Some(text) = text {
        write_event(writer, Event::Start(start))?;
        write_event(writer, Event::Text(BytesText::new(&text)))?;
        write_event(writer, Event::End(BytesEnd::new(key)))
    } else {
        write_event(writer, Event::Empty(start))
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// An element that has been opened but not yet closed.
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| Error::Markup(e.to_string()))?;
            let key = utf8(attribute.key.as_ref())?.to_string();
            let value = attribute
                .unescape_value()
                .map_err(|e| Error::Markup(e.to_string()))?;
            attributes.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    /// Adds a closed child, turning repeated names into a list.
    fn insert(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn into_value(self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            return if self.text.is_empty() {
                Value::Object(Map::new())
            } else {
                Value::String(self.text)
            };
        }

        let mut map = Map::new();
        if !self.attributes.is_empty() {
            map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if self.children.is_empty() && !self.text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        map.extend(self.children);
        Value::Object(map)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Markup(e.to_string()))
}

/// Parses an XML document into the canonical nested map, dropping the root element.
pub fn parse_xml(body: &str) -> Result<Value> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                close(frame, &mut stack, &mut root);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let raw = utf8(&text)?;
                    let text = unescape(raw).map_err(|e| Error::Markup(e.to_string()))?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(utf8(&data)?);
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::Markup("unbalanced closing tag".to_string()))?;
                close(frame, &mut stack, &mut root);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Markup("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| Error::Markup("document has no root element".to_string()))
}

fn close(frame: Frame, stack: &mut [Frame], root: &mut Option<Value>) {
    let name = frame.name.clone();
    let value = frame.into_value();
    match stack.last_mut() {
        Some(parent) => parent.insert(name, value),
        None => *root = Some(value),
    }
}
