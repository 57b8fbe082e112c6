//! `.ts` writer producing lupdate-style output.

use crate::model::{Context, Location, Message, Translation, TranslationText, TsDocument};
use quick_xml::escape::escape;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Serialize a document to `.ts` XML.
pub fn write_string(document: &TsDocument) -> String {
    let mut out = String::with_capacity(document.message_count() * 160 + 128);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    out.push_str("<TS version=\"");
    out.push_str(&escape(&document.version));
    out.push('"');
    if let Some(language) = &document.language {
        push_attr(&mut out, "language", language);
    }
    if let Some(source_language) = &document.source_language {
        push_attr(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    for context in &document.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    write_element(out, 1, "name", &context.name);
    if let Some(comment) = &context.comment {
        write_element(out, 1, "comment", comment);
    }
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str(INDENT);
    out.push_str("<message");
    if let Some(id) = &message.id {
        push_attr(out, "id", id);
    }
    if message.numerus {
        out.push_str(" numerus=\"yes\"");
    }
    out.push_str(">\n");

    for location in &message.locations {
        write_location(out, location);
    }
    write_element(out, 2, "source", &message.source);

    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            write_element(out, 2, name, value);
        }
    }

    write_translation(out, &message.translation);

    out.push_str(INDENT);
    out.push_str("</message>\n");
}

fn write_location(out: &mut String, location: &Location) {
    out.push_str(INDENT);
    out.push_str(INDENT);
    out.push_str("<location");
    push_attr(out, "filename", &location.filename);
    if let Some(line) = location.line {
        let _ = write!(out, " line=\"{line}\"");
    }
    out.push_str("/>\n");
}

fn write_translation(out: &mut String, translation: &Translation) {
    out.push_str(INDENT);
    out.push_str(INDENT);
    out.push_str("<translation");
    if let Some(kind) = translation.state.type_attr() {
        push_attr(out, "type", kind);
    }

    match &translation.text {
        TranslationText::Single(text) if text.is_empty() => out.push_str("/>\n"),
        TranslationText::Single(text) => {
            out.push('>');
            push_text(out, text);
            out.push_str("</translation>\n");
        }
        TranslationText::Plural(forms) if forms.is_empty() => out.push_str("/>\n"),
        TranslationText::Plural(forms) => {
            out.push_str(">\n");
            for form in forms {
                write_element(out, 3, "numerusform", form);
            }
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push_str("</translation>\n");
        }
    }
}

fn write_element(out: &mut String, depth: usize, name: &str, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    let _ = write!(out, "<{name}>");
    push_text(out, text);
    let _ = writeln!(out, "</{name}>");
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"{}\"", escape(value));
}

/// Escapes markup characters and emits control characters as `<byte>`
/// elements, which XML 1.0 cannot carry as text.
fn push_text(out: &mut String, text: &str) {
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if c.is_control() && !matches!(c, '\n' | '\r' | '\t') {
            out.push_str(&escape(&text[start..index]));
            let _ = write!(out, "<byte value=\"x{:x}\"/>", c as u32);
            start = index + c.len_utf8();
        }
    }
    out.push_str(&escape(&text[start..]));
}
