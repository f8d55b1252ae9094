// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Streaming XML decoders
//!
//! Bodies are read with a pull parser in a single pass. The operation decoder
//! is namespace-aware: an element only counts when it is bound to
//! [`XML_NAMESPACE`](crate::XML_NAMESPACE), whether through a default
//! `xmlns` or a prefix. Unrecognised elements and everything beneath them are
//! skipped.
//!
//! The fault decoder is deliberately lenient and matches `<Code>` and
//! `<Message>` by local name only, since error bodies may be produced by
//! front ends that do not emit the schema namespace.

use crate::types::{ErrorDetails, Operation, OperationStatus, ServiceFault};
use crate::XML_NAMESPACE;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::str::FromStr;
use thiserror::Error;

/// UTF-8 byte-order mark some front ends prepend to bodies
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors raised while decoding a response body
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body is not well-formed XML
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// `<Status>` held something other than InProgress/Succeeded/Failed
    #[error("Unknown operation status: {0:?}")]
    UnknownStatus(String),

    /// A numeric element did not hold a valid integer
    #[error("Invalid integer in <{element}>: {value:?}")]
    InvalidInteger {
        element: &'static str,
        value: String,
    },

    /// A required element was absent
    #[error("Missing <{0}> element")]
    MissingElement(&'static str),

    /// A CDATA section was not valid UTF-8
    #[error("Invalid UTF-8 in CDATA section: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Elements of the `<Operation>` document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Operation,
    Id,
    Status,
    HttpStatusCode,
    Error,
    Code,
    Message,
    Other,
}

impl Element {
    /// Classify a start tag given its enclosing elements
    fn classify(stack: &[Element], in_schema: bool, local_name: &[u8]) -> Self {
        if !in_schema {
            return Self::Other;
        }
        match (stack.last(), local_name) {
            (None | Some(Self::Other), b"Operation") if !stack.contains(&Self::Operation) => {
                Self::Operation
            }
            (Some(Self::Operation), b"ID") => Self::Id,
            (Some(Self::Operation), b"Status") => Self::Status,
            (Some(Self::Operation), b"HttpStatusCode") => Self::HttpStatusCode,
            (Some(Self::Operation), b"Error") => Self::Error,
            (Some(Self::Error), b"Code") => Self::Code,
            (Some(Self::Error), b"Message") => Self::Message,
            _ => Self::Other,
        }
    }
}

fn strip_bom(body: &[u8]) -> &[u8] {
    body.strip_prefix(UTF8_BOM).unwrap_or(body)
}

fn in_schema(resolved: &ResolveResult<'_>) -> bool {
    matches!(resolved, ResolveResult::Bound(Namespace(ns)) if *ns == XML_NAMESPACE.as_bytes())
}

/// Decode an `<Operation>` document
///
/// # Errors
/// Fails on malformed XML, an unknown status value, a non-numeric
/// `<HttpStatusCode>`, or when `<Operation>` or its `<Status>` is missing.
pub fn decode_operation(body: &[u8]) -> Result<Operation, DecodeError> {
    let mut reader = NsReader::from_reader(strip_bom(body));

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut text = String::new();

    let mut found_operation = false;
    let mut id = None;
    let mut status = None;
    let mut http_status_code = None;
    let mut error: Option<ErrorDetails> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(start) => {
                let element =
                    Element::classify(&stack, in_schema(&resolved), start.local_name().as_ref());
                match element {
                    Element::Operation => found_operation = true,
                    Element::Error => {
                        error.get_or_insert_with(ErrorDetails::default);
                    }
                    _ => {}
                }
                stack.push(element);
                text.clear();
            }
            // Self-closing elements carry no text, so only structure matters.
            Event::Empty(start) => {
                match Element::classify(&stack, in_schema(&resolved), start.local_name().as_ref())
                {
                    Element::Operation => found_operation = true,
                    Element::Error => {
                        error.get_or_insert_with(ErrorDetails::default);
                    }
                    _ => {}
                }
            }
            Event::Text(content) => text.push_str(&content.unescape()?),
            Event::CData(content) => text.push_str(std::str::from_utf8(&content)?),
            Event::End(_) => {
                let value = std::mem::take(&mut text);
                match stack.pop() {
                    Some(Element::Id) => id = Some(value),
                    Some(Element::Status) => status = Some(parse_status(&value)?),
                    Some(Element::HttpStatusCode) => {
                        http_status_code = Some(parse_integer("HttpStatusCode", &value)?)
                    }
                    Some(Element::Code) => {
                        error.get_or_insert_with(ErrorDetails::default).code = value
                    }
                    Some(Element::Message) => {
                        error.get_or_insert_with(ErrorDetails::default).message = value
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !found_operation {
        return Err(DecodeError::MissingElement("Operation"));
    }

    Ok(Operation {
        id: id.unwrap_or_default(),
        status: status.ok_or(DecodeError::MissingElement("Status"))?,
        http_status_code,
        error,
    })
}

/// Decode an `<Error>` fault body
///
/// An empty body or one without `<Code>`/`<Message>` decodes to an empty
/// [`ServiceFault`].
///
/// # Errors
/// Fails only when the body is malformed XML.
pub fn decode_service_fault(body: &[u8]) -> Result<ServiceFault, DecodeError> {
    let mut reader = Reader::from_reader(strip_bom(body));

    let mut buf = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut text = String::new();
    let mut fault = ServiceFault::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                current = Some(start.local_name().as_ref().to_vec());
                text.clear();
            }
            Event::Text(content) => text.push_str(&content.unescape()?),
            Event::CData(content) => text.push_str(std::str::from_utf8(&content)?),
            Event::End(_) => {
                let value = std::mem::take(&mut text);
                match current.take().as_deref() {
                    Some(b"Code") if fault.code.is_none() => fault.code = Some(value),
                    Some(b"Message") if fault.message.is_none() => fault.message = Some(value),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(fault)
}

// Text is kept verbatim; only values parsed into typed fields are trimmed.
fn parse_status(value: &str) -> Result<OperationStatus, DecodeError> {
    let value = value.trim();
    OperationStatus::from_str(value).map_err(|_| DecodeError::UnknownStatus(value.to_string()))
}

fn parse_integer(element: &'static str, value: &str) -> Result<u16, DecodeError> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| DecodeError::InvalidInteger {
            element,
            value: value.to_string(),
        })
}
