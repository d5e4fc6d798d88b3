use std::io::{self, BufWriter, Write};

use crate::models::{FileEntry, MetaInfo, OutputEnvelope};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

pub fn write_output(envelope: &OutputEnvelope, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut w = BufWriter::with_capacity(64 * 1024, stdout.lock());
    match format {
        OutputFormat::Yaml => write_envelope_yaml(&mut w, envelope)?,
        OutputFormat::Json => write_envelope_json(&mut w, envelope)?,
    }
    w.flush()
}

// ── YAML output ──

fn write_envelope_yaml(w: &mut impl Write, envelope: &OutputEnvelope) -> io::Result<()> {
    if let Some(ref meta) = envelope.meta {
        write_meta(w, meta)?;
    }
    if let Some(ref error) = envelope.error {
        write_scalar(w, "error", error)?;
    }
    if let Some(ref root) = envelope.root {
        write_scalar(w, "root", root)?;
    }
    if let Some(ref reference) = envelope.reference {
        write_scalar(w, "reference", reference)?;
    }
    if let Some(ref files) = envelope.files {
        if !files.is_empty() {
            write_files(w, files)?;
        }
    }
    Ok(())
}

fn write_meta(w: &mut impl Write, meta: &MetaInfo) -> io::Result<()> {
    writeln!(w, "meta:")?;
    if meta.elapsed_ms != 0 {
        writeln!(w, "  elapsedMs: {}", meta.elapsed_ms)?;
    }
    if meta.files_scanned != 0 {
        writeln!(w, "  filesScanned: {}", meta.files_scanned)?;
    }
    if meta.fallbacks != 0 {
        writeln!(w, "  fallbacks: {}", meta.fallbacks)?;
    }
    Ok(())
}

fn write_files(w: &mut impl Write, files: &[FileEntry]) -> io::Result<()> {
    writeln!(w, "files:")?;
    for file in files {
        write!(w, "- path: ")?;
        write_inline_string(w, &file.path)?;
        write!(w, "\n  relative: ")?;
        write_inline_string(w, &file.relative)?;
        writeln!(w)?;
        if let Some(ref reason) = file.fallback {
            write!(w, "  fallback: ")?;
            write_inline_string(w, reason)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn write_scalar(w: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
    write!(w, "{}: ", key)?;
    write_inline_string(w, value)?;
    writeln!(w)
}

fn write_inline_string(w: &mut impl Write, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return write!(w, "''");
    }
    if !needs_quoting(value) {
        return write!(w, "{}", value);
    }

    write!(w, "\"")?;
    for c in value.chars() {
        match c {
            '"' => write!(w, "\\\"")?,
            '\\' => write!(w, "\\\\")?,
            '\n' => write!(w, "\\n")?,
            '\r' => write!(w, "\\r")?,
            '\t' => write!(w, "\\t")?,
            _ => write!(w, "{}", c)?,
        }
    }
    write!(w, "\"")
}

/// Plain scalars that YAML would read as something other than the path text.
fn needs_quoting(value: &str) -> bool {
    let Some(&first) = value.as_bytes().first() else {
        return true;
    };
    if matches!(first, b'-' | b'[' | b']' | b'{' | b'}' | b'\'' | b'"' |
        b'!' | b'&' | b'*' | b'|' | b'>' | b'%' | b'@' | b'`' | b',' | b'?' | b'#' | b' ') {
        return true;
    }
    if value.ends_with(' ') {
        return true;
    }
    if matches!(value.to_ascii_lowercase().as_str(),
        "true" | "false" | "null" | "~" | "yes" | "no" | "on" | "off" | "y" | "n") {
        return true;
    }
    if looks_numeric(value) {
        return true;
    }
    // Backslashes are only escaped inside double quotes, so a plain Windows
    // path is fine; a colon followed by a space or the end is not.
    value.contains(": ")
        || value.ends_with(':')
        || value.contains(" #")
        || value.contains(['\n', '\r', '\t'])
}

/// Ints and floats as YAML 1.1/1.2 resolvers read them: radix prefixes,
/// `_` digit groups, exponents, `.inf`/`.nan` and base-60 `1:30`.
fn looks_numeric(value: &str) -> bool {
    let body = value.strip_prefix(['-', '+']).unwrap_or(value).to_ascii_lowercase();
    if matches!(body.as_str(), ".inf" | ".nan") {
        return true;
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = body.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c == '_' || c.is_digit(radix));
        }
    }
    if body.contains(':') {
        return body
            .split(':')
            .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit() || b == b'_'));
    }

    let (mantissa, exponent) = match body.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (body.as_str(), None),
    };
    if let Some(exp) = exponent {
        let exp = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        if exp.is_empty() || !exp.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    let mut has_dot = false;
    let mut has_digit = false;
    let well_formed = mantissa.bytes().all(|b| match b {
        b'0'..=b'9' => {
            has_digit = true;
            true
        }
        b'_' => true,
        b'.' if !has_dot => {
            has_dot = true;
            true
        }
        _ => false,
    });
    well_formed && has_digit
}

// ── JSON output ──

fn write_envelope_json(w: &mut impl Write, envelope: &OutputEnvelope) -> io::Result<()> {
    write!(w, "{{")?;
    let mut first = true;

    if let Some(ref meta) = envelope.meta {
        json_comma(w, &mut first)?;
        write!(w, "\"meta\":{{\"elapsedMs\":{},\"filesScanned\":{},\"fallbacks\":{}}}",
            meta.elapsed_ms, meta.files_scanned, meta.fallbacks)?;
    }
    if let Some(ref error) = envelope.error {
        json_comma(w, &mut first)?;
        write!(w, "\"error\":")?;
        write_json_string(w, error)?;
    }
    if let Some(ref root) = envelope.root {
        json_comma(w, &mut first)?;
        write!(w, "\"root\":")?;
        write_json_string(w, root)?;
    }
    if let Some(ref reference) = envelope.reference {
        json_comma(w, &mut first)?;
        write!(w, "\"reference\":")?;
        write_json_string(w, reference)?;
    }
    if let Some(ref files) = envelope.files {
        json_comma(w, &mut first)?;
        write_files_json(w, files)?;
    }

    writeln!(w, "}}")
}

fn write_files_json(w: &mut impl Write, files: &[FileEntry]) -> io::Result<()> {
    write!(w, "\"files\":[")?;
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            write!(w, ",")?;
        }
        write!(w, "{{\"path\":")?;
        write_json_string(w, &file.path)?;
        write!(w, ",\"relative\":")?;
        write_json_string(w, &file.relative)?;
        if let Some(ref reason) = file.fallback {
            write!(w, ",\"fallback\":")?;
            write_json_string(w, reason)?;
        }
        write!(w, "}}")?;
    }
    write!(w, "]")
}

fn json_comma(w: &mut impl Write, first: &mut bool) -> io::Result<()> {
    if *first {
        *first = false;
        Ok(())
    } else {
        write!(w, ",")
    }
}

fn write_json_string(w: &mut impl Write, s: &str) -> io::Result<()> {
    write!(w, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(w, "\\\"")?,
            '\\' => write!(w, "\\\\")?,
            '\n' => write!(w, "\\n")?,
            '\r' => write!(w, "\\r")?,
            '\t' => write!(w, "\\t")?,
            c if (c as u32) < 0x20 => write!(w, "\\u{:04x}", c as u32)?,
            _ => write!(w, "{}", c)?,
        }
    }
    write!(w, "\"")
}
