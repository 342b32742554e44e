//! Text rendering of product listings and the display surface they are written to.

use crate::product::Product;
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

pub const NO_RESULTS: &str = "No products found.";
const PLACEHOLDER: &str = "-";

/// Sink for the results region. Each call replaces whatever was shown before.
pub trait Surface {
    fn replace(&mut self, region: &str) -> io::Result<()>;
}

/// Writes each region to a stream. On a terminal the screen is cleared first.
pub struct TerminalSurface<W: Write> {
    out: W,
    clear: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let clear = out.is_terminal();
        let mut surface = Self::new(out);
        surface.clear = clear;
        surface
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: false }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn replace(&mut self, region: &str) -> io::Result<()> {
        if self.clear {
            self.out.write_all(b"\x1b[2J\x1b[H")?;
        }
        self.out.write_all(region.as_bytes())?;
        if !region.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }
}

/// Keeps every frame; the last one is what is currently displayed.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub frames: Vec<String>,
}

#[cfg(test)]
impl MemorySurface {
    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

#[cfg(test)]
impl Surface for MemorySurface {
    fn replace(&mut self, region: &str) -> io::Result<()> {
        self.frames.push(region.to_string());
        Ok(())
    }
}

/// Absent and empty fields both show as the placeholder.
fn or_placeholder(field: Option<&str>) -> &str {
    field.filter(|s| !s.is_empty()).unwrap_or(PLACEHOLDER)
}

fn block(out: &mut String, p: &Product) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", p.title);
    let _ = writeln!(
        out,
        "  Brand: {} | Model: {}",
        or_placeholder(p.brand.as_deref()),
        or_placeholder(p.model.as_deref())
    );
    let _ = writeln!(
        out,
        "  Grade: {} | Refurbished: {}",
        or_placeholder(p.grade.as_deref()),
        if p.refurbished { "Yes" } else { "No" }
    );
    let _ = writeln!(out, "  Price: {} {}", p.price, p.currency_iso);
    let _ = writeln!(out, "  Buy now: {} (Source: {})", p.url, p.source);
}

/// Full results region for `products`: one block per product, or the no-results line.
pub fn render(products: &[&Product]) -> String {
    if products.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }
    let mut out = String::new();
    for (i, p) in products.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        block(&mut out, p);
    }
    out
}

/// Region shown instead of a listing when loading failed.
pub fn render_error(reason: &str) -> String {
    format!("Error loading data: {}\n", reason)
}
