// Minimal XML element tree for Panorama API responses.
//
// The XML API answers every request with a `<response>` envelope whose
// payload shape depends on the queried xpath. Rather than modelling each
// payload with serde, responses are read into a small owned tree and the
// endpoint modules pick out what they need.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::{Map, Value};

use crate::error::Error;

/// One XML element with its attributes, concatenated text, and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given element name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given element name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of a direct child, `None` when missing or blank.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
    }

    /// Texts of `<member>` children (PAN-OS list encoding).
    pub fn members(&self) -> Vec<String> {
        self.children_named("member")
            .map(|m| m.text.trim().to_owned())
            .collect()
    }

    /// Convert this element's content into a JSON value.
    ///
    /// - text-only elements become strings (empty elements become `null`)
    /// - `<member>` lists become arrays of strings
    /// - `<entry>` lists become arrays of entry names, or objects when
    ///   the entries carry nested configuration
    /// - anything else becomes an object keyed by child name; repeated
    ///   child names collapse into arrays
    pub fn to_json(&self) -> Value {
        if self.children.is_empty() {
            let text = self.text.trim();
            return if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_owned())
            };
        }

        if self.children.iter().all(|c| c.name == "member") {
            return Value::Array(self.members().into_iter().map(Value::String).collect());
        }

        if self.children.iter().all(|c| c.name == "entry") {
            return Value::Array(self.children.iter().map(XmlNode::entry_value).collect());
        }

        let mut map = Map::new();
        for child in &self.children {
            if map.contains_key(&child.name) {
                continue;
            }
            let mut values: Vec<Value> = self
                .children_named(&child.name)
                .map(XmlNode::to_json)
                .collect();
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            map.insert(child.name.clone(), value);
        }
        Value::Object(map)
    }

    fn entry_value(&self) -> Value {
        let name = self.attr("name");
        if self.children.is_empty() {
            return name.map_or_else(|| self.to_json(), |n| Value::String(n.to_owned()));
        }
        let mut map = match self.to_json() {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".into(), other);
                map
            }
        };
        if let Some(name) = name {
            map.insert("name".into(), Value::String(name.to_owned()));
        }
        Value::Object(map)
    }
}

/// Parse an XML document into its root element.
pub fn parse(input: &str) -> Result<XmlNode, Error> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader.read_event().map_err(|e| decode_error(&e, input))?;
        match event {
            Event::Start(start) => stack.push(open_element(&start, input)?),
            Event::Empty(start) => {
                let node = open_element(&start, input)?;
                attach(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| decode_error(&"unexpected closing tag", input))?;
                attach(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|e| decode_error(&e, input))?;
                    top.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(decode_error(&"unclosed element at end of document", input));
    }
    root.ok_or_else(|| decode_error(&"document has no root element", input))
}

fn open_element(start: &BytesStart<'_>, input: &str) -> Result<XmlNode, Error> {
    let mut node = XmlNode {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..XmlNode::default()
    };
    for attr in start.attributes() {
        let attr = attr.map_err(|e| decode_error(&e, input))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| decode_error(&e, input))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn decode_error(err: &dyn std::fmt::Display, body: &str) -> Error {
    Error::Xml {
        message: err.to_string(),
        body: body.to_owned(),
    }
}
