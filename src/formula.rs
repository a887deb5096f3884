//! Homebrew formula rendering.
//!
//! Writes a Ruby formula that downloads the module archive from the proxy,
//! checks it against the computed SHA-256 and runs `go install` inside the
//! unpacked module directory.

use crate::error::{BrewgoError, Result};
use crate::info::FormulaInfo;
use std::io::{self, Write};

/// A writer that counts the bytes passed through to its inner writer.
struct CountingWriter<'a> {
    inner: &'a mut dyn Write,
    count: u64,
}

impl Write for CountingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl FormulaInfo {
    /// Write the formula to `sink`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`BrewgoError::WriteFailed`] if the sink rejects a write.
    ///
    /// # Examples
    ///
    /// ```
    /// use brewgo::descriptor::ModuleRef;
    /// use brewgo::digest::Sha256Digest;
    /// use brewgo::info::FormulaInfo;
    ///
    /// let module = ModuleRef::parse("github.com/acme/widget").resolve("v1.0.0");
    /// let info = FormulaInfo::new(
    ///     module,
    ///     "https://proxy.golang.org/github.com/acme/widget/@v/v1.0.0.zip".to_owned(),
    ///     Sha256Digest::of_bytes(b"hello"),
    /// );
    ///
    /// let mut out = Vec::new();
    /// let written = info.write_formula(&mut out)?;
    /// assert_eq!(written, out.len() as u64);
    /// assert!(String::from_utf8_lossy(&out).starts_with("class Widget < Formula"));
    /// # Ok::<(), brewgo::error::BrewgoError>(())
    /// ```
    pub fn write_formula(&self, sink: &mut dyn Write) -> Result<u64> {
        let mut counter = CountingWriter {
            inner: sink,
            count: 0,
        };
        self.write_template(&mut counter)
            .and_then(|()| counter.flush())
            .map_err(|source| BrewgoError::WriteFailed { source })?;
        Ok(counter.count)
    }

    /// Render the formula into a string.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature mirrors [`Self::write_formula`].
    pub fn render_formula(&self) -> Result<String> {
        let mut out = Vec::new();
        self.write_formula(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn write_template(&self, out: &mut dyn Write) -> io::Result<()> {
        let module = self.module();
        writeln!(out, "class {} < Formula", class_name(module.module()))?;
        writeln!(
            out,
            "  desc {}",
            ruby_quote(&format!(
                "{} (generated from the Go module proxy)",
                module.module()
            ))
        )?;
        writeln!(out, "  homepage {}", ruby_quote(self.homepage()))?;
        writeln!(out, "  url {}", ruby_quote(self.archive_url()))?;
        writeln!(out, "  version {}", ruby_quote(self.version()))?;
        writeln!(out, "  sha256 {}", ruby_quote(&self.digest().to_hex()))?;
        writeln!(out)?;
        writeln!(out, "  depends_on \"go\" => :build")?;
        writeln!(out)?;
        writeln!(out, "  def install")?;
        // Homebrew enters the first directory of the archive, which for a
        // module zip is only the first element of the module path.
        writeln!(out, "    cd \"../\" + {} do", ruby_quote(&module.to_string()))?;
        writeln!(out, "      ENV[\"GOBIN\"] = bin")?;
        writeln!(out, "      system \"go\", \"install\", \"./...\"")?;
        writeln!(out, "    end")?;
        writeln!(out, "  end")?;
        writeln!(out, "end")
    }
}

/// Derive a Ruby class name from a module path.
///
/// The last path element names the formula, except that a Go major-version
/// suffix (`/v2`, `/v3`, ...) defers to the element before it. The name is
/// split on anything that is not ASCII alphanumeric and each word is
/// capitalised.
///
/// # Examples
///
/// ```
/// use brewgo::formula::class_name;
///
/// assert_eq!(class_name("github.com/user/my-tool"), "MyTool");
/// assert_eq!(class_name("github.com/user/tool/v2"), "Tool");
/// ```
#[must_use]
pub fn class_name(module: &str) -> String {
    let mut elements = module.split('/').filter(|element| !element.is_empty());
    let last = elements.next_back().unwrap_or_default();
    let base = if is_major_version(last) {
        elements.next_back().unwrap_or(last)
    } else {
        last
    };

    let mut name: String = base
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect();

    if name.is_empty() {
        name.push_str("GoModule");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Go");
    }
    name
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// Quote `value` as a Ruby double-quoted string literal.
///
/// Backslashes, double quotes and `#` (string interpolation) are escaped, as
/// are control characters.
///
/// # Examples
///
/// ```
/// use brewgo::formula::ruby_quote;
///
/// assert_eq!(ruby_quote(r#"say "hi" #{x}"#), r#""say \"hi\" \#{x}""#);
/// ```
#[must_use]
pub fn ruby_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '#' => quoted.push_str("\\#"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ if c.is_control() => quoted.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "formula_tests.rs"]
mod tests;
