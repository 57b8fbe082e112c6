//! `.ts` reader built on the `quick-xml` pull parser.
//!
//! Whitespace between elements is layout and is dropped; text inside
//! `<source>`, `<translation>` and the comment elements is kept verbatim.
//! Unknown elements (`<userdata>`, `<extra-*>`, old `<defaultcodec>`) are
//! skipped.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{
    Context, LineRef, Location, Message, Translation, TranslationState, TranslationText,
    TsDocument,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

/// Parse a whole `.ts` document.
pub fn parse_str(input: &str) -> CatalogResult<TsDocument> {
    let mut parser = TsParser::new(input);
    let document = parser.document()?;
    debug!(
        contexts = document.contexts.len(),
        messages = document.message_count(),
        "Parsed translation source document"
    );
    Ok(document)
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> TsParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            reader: Reader::from_str(input),
        }
    }

    fn next(&mut self) -> CatalogResult<Event<'a>> {
        let position = self.reader.buffer_position();
        self.reader
            .read_event()
            .map_err(|source| CatalogError::XmlError { position, source })
    }

    fn invalid(&self, message: impl Into<String>) -> CatalogError {
        CatalogError::InvalidStructure {
            position: self.reader.buffer_position(),
            message: message.into(),
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &[u8]) -> CatalogResult<Option<String>> {
        let position = self.reader.buffer_position();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| CatalogError::XmlError {
                position,
                source: e.into(),
            })?;
            if attr.key.as_ref() == key {
                let value = attr
                    .unescape_value()
                    .map_err(|source| CatalogError::XmlError { position, source })?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn skip(&mut self, start: &BytesStart<'a>) -> CatalogResult<()> {
        let position = self.reader.buffer_position();
        debug!(
            element = %String::from_utf8_lossy(start.name().as_ref()),
            "Skipping unknown element"
        );
        self.reader
            .read_to_end(start.name())
            .map_err(|source| CatalogError::XmlError { position, source })?;
        Ok(())
    }

    /// Layout text between elements must be whitespace.
    fn expect_layout(&self, text: &[u8]) -> CatalogResult<()> {
        if text.iter().all(u8::is_ascii_whitespace) {
            Ok(())
        } else {
            Err(self.invalid(format!(
                "unexpected text '{}'",
                String::from_utf8_lossy(text).trim()
            )))
        }
    }

    fn document(&mut self) -> CatalogResult<TsDocument> {
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"TS" => {
                    let mut document = self.root_attributes(&start)?;
                    self.contexts(&mut document)?;
                    return Ok(document);
                }
                Event::Empty(start) if start.name().as_ref() == b"TS" => {
                    return self.root_attributes(&start);
                }
                Event::Start(start) | Event::Empty(start) => {
                    return Err(self.invalid(format!(
                        "expected <TS> root element, found <{}>",
                        String::from_utf8_lossy(start.name().as_ref())
                    )));
                }
                Event::Text(text) => self.expect_layout(&text)?,
                Event::Eof => return Err(self.invalid("missing <TS> root element")),
                _ => {}
            }
        }
    }

    fn root_attributes(&self, start: &BytesStart<'_>) -> CatalogResult<TsDocument> {
        let mut document = TsDocument::default();
        if let Some(version) = self.attribute(start, b"version")? {
            document.version = version;
        }
        document.language = self.attribute(start, b"language")?;
        document.source_language = self.attribute(start, b"sourcelanguage")?;
        Ok(document)
    }

    fn contexts(&mut self, document: &mut TsDocument) -> CatalogResult<()> {
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"context" => {
                    let context = self.context()?;
                    document.contexts.push(context);
                }
                Event::Start(start) => self.skip(&start)?,
                Event::End(end) if end.name().as_ref() == b"TS" => return Ok(()),
                Event::Text(text) => self.expect_layout(&text)?,
                Event::Eof => return Err(self.invalid("unterminated <TS> element")),
                _ => {}
            }
        }
    }

    fn context(&mut self) -> CatalogResult<Context> {
        let mut context = Context::default();
        let mut has_name = false;
        loop {
            match self.next()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"name" => {
                        context.name = self.text(b"name")?;
                        has_name = true;
                    }
                    b"comment" => context.comment = Some(self.text(b"comment")?),
                    b"message" => {
                        let message = self.message(&start)?;
                        context.messages.push(message);
                    }
                    _ => self.skip(&start)?,
                },
                Event::Empty(start) => {
                    if start.name().as_ref() == b"name" {
                        has_name = true;
                    }
                }
                Event::End(end) if end.name().as_ref() == b"context" => break,
                Event::Text(text) => self.expect_layout(&text)?,
                Event::Eof => return Err(self.invalid("unterminated <context> element")),
                _ => {}
            }
        }

        if !has_name {
            return Err(self.invalid("<context> without <name>"));
        }
        Ok(context)
    }

    fn message(&mut self, start: &BytesStart<'_>) -> CatalogResult<Message> {
        let mut message = Message {
            id: self.attribute(start, b"id")?,
            numerus: self.attribute(start, b"numerus")?.as_deref() == Some("yes"),
            ..Message::default()
        };
        let mut has_source = false;

        loop {
            match self.next()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"location" => {
                        message.locations.push(self.location(&start)?);
                        self.skip(&start)?;
                    }
                    b"source" => {
                        message.source = self.text(b"source")?;
                        has_source = true;
                    }
                    b"comment" => message.comment = Some(self.text(b"comment")?),
                    b"oldsource" => message.old_source = Some(self.text(b"oldsource")?),
                    b"oldcomment" => message.old_comment = Some(self.text(b"oldcomment")?),
                    b"extracomment" => message.extra_comment = Some(self.text(b"extracomment")?),
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.text(b"translatorcomment")?);
                    }
                    b"translation" => {
                        message.translation = self.translation(&start, message.numerus)?;
                    }
                    _ => self.skip(&start)?,
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"location" => message.locations.push(self.location(&start)?),
                    b"source" => has_source = true,
                    b"comment" => message.comment = Some(String::new()),
                    b"translation" => {
                        let state = self.translation_state(&start)?;
                        let text = if message.numerus {
                            TranslationText::Plural(Vec::new())
                        } else {
                            TranslationText::default()
                        };
                        message.translation = Translation { state, text };
                    }
                    _ => {}
                },
                Event::End(end) if end.name().as_ref() == b"message" => break,
                Event::Text(text) => self.expect_layout(&text)?,
                Event::Eof => return Err(self.invalid("unterminated <message> element")),
                _ => {}
            }
        }

        if !has_source && message.id.is_none() {
            return Err(self.invalid("<message> without <source>"));
        }
        Ok(message)
    }

    fn location(&self, start: &BytesStart<'_>) -> CatalogResult<Location> {
        let filename = self.attribute(start, b"filename")?.unwrap_or_default();
        let line = match self.attribute(start, b"line")? {
            Some(value) => Some(
                LineRef::parse(&value)
                    .ok_or_else(|| self.invalid(format!("invalid location line '{value}'")))?,
            ),
            None => None,
        };
        Ok(Location { filename, line })
    }

    fn translation_state(&self, start: &BytesStart<'_>) -> CatalogResult<TranslationState> {
        let kind = self.attribute(start, b"type")?;
        Ok(TranslationState::from_type_attr(kind.as_deref()))
    }

    fn translation(&mut self, start: &BytesStart<'_>, numerus: bool) -> CatalogResult<Translation> {
        let state = self.translation_state(start)?;
        if !numerus {
            let text = self.text(b"translation")?;
            return Ok(Translation {
                state,
                text: TranslationText::Single(text),
            });
        }

        let mut forms = Vec::new();
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"numerusform" => {
                    forms.push(self.text(b"numerusform")?);
                }
                Event::Empty(start) if start.name().as_ref() == b"numerusform" => {
                    forms.push(String::new());
                }
                Event::Start(start) => self.skip(&start)?,
                Event::End(end) if end.name().as_ref() == b"translation" => break,
                Event::Text(text) => self.expect_layout(&text)?,
                Event::Eof => return Err(self.invalid("unterminated <translation> element")),
                _ => {}
            }
        }
        Ok(Translation {
            state,
            text: TranslationText::Plural(forms),
        })
    }

    /// Character content of the element just opened, up to its end tag.
    ///
    /// Handles `<byte value="..."/>` escapes. When `<lengthvariant>`
    /// children are present the first (longest) variant is taken.
    fn text(&mut self, end_name: &[u8]) -> CatalogResult<String> {
        let mut out = String::new();
        let mut has_variant = false;
        loop {
            match self.next()? {
                Event::Text(text) => {
                    if has_variant {
                        continue;
                    }
                    let position = self.reader.buffer_position();
                    let unescaped = text
                        .unescape()
                        .map_err(|source| CatalogError::XmlError { position, source })?;
                    out.push_str(&unescaped);
                }
                Event::CData(data) => {
                    if !has_variant {
                        out.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Empty(start) if start.name().as_ref() == b"byte" => {
                    if !has_variant {
                        out.push(self.byte_escape(&start)?);
                    }
                }
                Event::Start(start) if start.name().as_ref() == b"lengthvariant" => {
                    if has_variant {
                        self.skip(&start)?;
                    } else {
                        out = self.text(b"lengthvariant")?;
                        has_variant = true;
                    }
                }
                Event::End(end) if end.name().as_ref() == end_name => return Ok(out),
                Event::Start(start) | Event::Empty(start) => {
                    return Err(self.invalid(format!(
                        "unexpected <{}> inside <{}>",
                        String::from_utf8_lossy(start.name().as_ref()),
                        String::from_utf8_lossy(end_name)
                    )));
                }
                Event::Eof => {
                    return Err(self.invalid(format!(
                        "unterminated <{}> element",
                        String::from_utf8_lossy(end_name)
                    )))
                }
                _ => {}
            }
        }
    }

    /// `<byte value="x1b"/>` (hex) or `<byte value="27"/>` (decimal).
    fn byte_escape(&self, start: &BytesStart<'_>) -> CatalogResult<char> {
        let value = self
            .attribute(start, b"value")?
            .ok_or_else(|| self.invalid("<byte> without value"))?;
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse().ok(),
        };
        code.and_then(char::from_u32)
            .ok_or_else(|| self.invalid(format!("invalid <byte> value '{value}'")))
    }
}
