//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are encoded into a byte buffer first and written with one syscall.
//! After the first frame only runs of changed cells are re-emitted.

use std::fmt;
use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, Command, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub const WINDOW_TITLE: &str = "Fronton";

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame flushed to the terminal, `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(32 * 1024),
            enhanced_keys: false,
        }
    }

    /// Switch to raw mode on the alternate screen.
    ///
    /// Terminals that support it are asked to report key releases so held
    /// keys can be tracked exactly.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle(WINDOW_TITLE))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.enhanced_keys {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
            ))?;
        }
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Force the next draw to repaint everything, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then swap it with the previously shown frame.
    ///
    /// On return `fb` holds stale contents the caller is expected to
    /// overwrite; no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_changes_into(&prev, fb, &mut self.buf)?;
                prev
            }
            other => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = other.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the style the terminal currently has so unchanged attributes are
/// not re-sent for every cell.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let prev = self.style;
            let s = cell.style;
            let attrs_changed = prev.map_or(true, |p| p.bold != s.bold || p.dim != s.dim);
            if attrs_changed {
                out.queue(SetWeight {
                    bold: s.bold,
                    dim: s.dim,
                })?;
            }
            // SetWeight starts from a full reset, which also drops colours.
            if attrs_changed || prev.map(|p| p.fg) != Some(s.fg) {
                out.queue(SetForegroundColor(to_color(s.fg)))?;
            }
            if attrs_changed || prev.map(|p| p.bg) != Some(s.bg) {
                out.queue(SetBackgroundColor(to_color(s.bg)))?;
            }
            self.style = Some(s);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        // SGR 0: colours and attributes.
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Reset, then optionally bold and/or dim, in one SGR sequence.
///
/// Used on the per-frame path, where `SetAttribute` would allocate through
/// `Attribute::sgr`.
struct SetWeight {
    bold: bool,
    dim: bool,
}

impl Command for SetWeight {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[0")?;
        if self.bold {
            f.write_str(";1")?;
        }
        if self.dim {
            f.write_str(";2")?;
        }
        f.write_str("m")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode a complete repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for (y, row) in fb.cells().chunks(fb.width().max(1) as usize).enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for &cell in row {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Both frames must have the same dimensions; mismatched frames fall back
/// to a full repaint.
pub fn encode_changes_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }
    let mut pen = Pen::default();
    for_each_changed_run(prev, next, |run| {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            pen.print(out, next.get(x, run.y).unwrap_or_default())?;
        }
        Ok(())
    })?;
    pen.finish(out)
}

/// A horizontal span of cells that changed between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Visit changed spans row by row, without allocating. Frames must be the
/// same size.
pub fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(Run) -> Result<()>,
) -> Result<()> {
    let w = next.width().max(1) as usize;
    let rows = prev.cells().chunks(w).zip(next.cells().chunks(w));
    for (y, (old, new)) in rows.enumerate() {
        let mut start: Option<usize> = None;
        for x in 0..=new.len() {
            let differs = x < new.len() && old[x] != new[x];
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    f(Run {
                        x: s as u16,
                        y: y as u16,
                        len: (x - s) as u16,
                    })?;
                    start = None;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> CellStyle {
        CellStyle::default()
    }

    fn runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
        let mut runs = Vec::new();
        for_each_changed_run(prev, next, |run| {
            runs.push(run);
            Ok(())
        })
        .unwrap();
        runs
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(6, 3);
        let b = FrameBuffer::new(6, 3);
        assert!(runs(&a, &b).is_empty());
    }

    #[test]
    fn adjacent_changes_coalesce_per_row() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style());
        }
        b.put_char(5, 0, 'Y', style());
        b.put_char(0, 1, 'Z', style());

        assert_eq!(
            runs(&a, &b),
            vec![
                Run { x: 1, y: 0, len: 3 },
                Run { x: 5, y: 0, len: 1 },
                Run { x: 0, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn style_only_change_is_a_run() {
        let a = FrameBuffer::new(3, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.put_char(2, 0, ' ', style().bold());
        assert_eq!(runs(&a, &b), vec![Run { x: 2, y: 0, len: 1 }]);
    }

    #[test]
    fn diff_output_only_contains_changed_cells() {
        let mut a = FrameBuffer::new(8, 1);
        a.put_str(0, 0, "abcdefgh", style());
        let mut b = a.clone();
        b.put_char(4, 0, 'Q', style());

        let mut out = Vec::new();
        encode_changes_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('Q'));
        assert!(!text.contains('a'));
        assert!(!text.contains('h'));
    }

    #[test]
    fn full_output_contains_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", style());
        fb.put_str(0, 1, "xyz", style());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("abc"));
        assert!(text.contains("xyz"));
    }

    #[test]
    fn size_mismatch_falls_back_to_full_repaint() {
        let a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.put_str(0, 0, "abc", style());

        let mut diff = Vec::new();
        encode_changes_into(&a, &b, &mut diff).unwrap();
        let mut full = Vec::new();
        encode_full_into(&b, &mut full).unwrap();
        assert_eq!(diff, full);
    }

    #[test]
    fn weight_is_one_sgr_sequence() {
        let mut out = Vec::new();
        out.queue(SetWeight { bold: true, dim: true }).unwrap();
        out.queue(SetWeight { bold: false, dim: false }).unwrap();
        assert_eq!(out, b"\x1b[0;1;2m\x1b[0m");
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        let a = FrameBuffer::new(4, 3);
        let mut b = FrameBuffer::new(4, 3);
        for y in 0..3 {
            b.put_char(0, y, 'X', style());
        }
        let mut seen = 0;
        let res = for_each_changed_run(&a, &b, |_| {
            seen += 1;
            anyhow::bail!("stop")
        });
        assert!(res.is_err());
        assert_eq!(seen, 1);
    }
}
