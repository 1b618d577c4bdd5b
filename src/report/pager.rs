//! Report sinks: one output stream, or a series of row-budgeted pages.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Destination for rendered report blocks.
///
/// A block's lines always land together; sinks that paginate must never
/// split a block across a page boundary.
pub trait ReportSink {
    fn write_block(&mut self, lines: &[String]) -> io::Result<()>;
    /// Flush trailing page furniture.
    fn finish(&mut self) -> io::Result<()>;
}

/// Writes every block to stdout, optionally coloring the header line of
/// each block when attached to a terminal.
pub struct StreamSink {
    out: StandardStream,
    use_color: bool,
    header: Vec<String>,
    footer: Vec<String>,
    started: bool,
}

impl StreamSink {
    pub fn new(use_color: bool, header: Vec<String>, footer: Vec<String>) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            out: StandardStream::stdout(choice),
            use_color,
            header,
            footer,
            started: false,
        }
    }
}

impl ReportSink for StreamSink {
    fn write_block(&mut self, lines: &[String]) -> io::Result<()> {
        if self.started {
            writeln!(self.out)?;
        } else {
            self.started = true;
            for line in &self.header {
                writeln!(self.out, "{}", line)?;
            }
        }

        let mut rest = lines.iter();
        if let Some(first) = rest.next() {
            if self.use_color {
                self.out
                    .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                write!(self.out, "{}", first)?;
                self.out.reset()?;
                writeln!(self.out)?;
            } else {
                writeln!(self.out, "{}", first)?;
            }
        }
        for line in rest {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.started {
            for line in &self.footer {
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()
    }
}

/// Splits output across files of at most `max_rows` report rows each,
/// named `{prefix}-{page:04x}.{ext}`.
///
/// A new page opens when appending the next block would exceed the
/// budget; a block that alone exceeds the budget still gets a page to
/// itself. Failure to create a page file is fatal to the run.
pub struct Pager {
    prefix: String,
    ext: &'static str,
    max_rows: usize,
    header: Vec<String>,
    footer: Vec<String>,
    page: u32,
    rows_on_page: usize,
    current: Option<File>,
}

impl Pager {
    pub fn new(
        prefix: String,
        ext: &'static str,
        max_rows: usize,
        header: Vec<String>,
        footer: Vec<String>,
    ) -> Self {
        Self {
            prefix,
            ext,
            max_rows,
            header,
            footer,
            page: 0,
            rows_on_page: 0,
            current: None,
        }
    }

    /// Path the next call to `open_page` will create.
    fn page_path(&self) -> PathBuf {
        PathBuf::from(format!("{}-{:04x}.{}", self.prefix, self.page, self.ext))
    }

    fn open_page(&mut self) -> io::Result<()> {
        self.close_page()?;
        let mut file = File::create(self.page_path())?;
        for line in &self.header {
            writeln!(file, "{}", line)?;
        }
        self.current = Some(file);
        self.page += 1;
        self.rows_on_page = 0;
        Ok(())
    }

    fn close_page(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.current.take() {
            for line in &self.footer {
                writeln!(file, "{}", line)?;
            }
            file.flush()?;
        }
        Ok(())
    }
}

impl ReportSink for Pager {
    fn write_block(&mut self, lines: &[String]) -> io::Result<()> {
        let over_budget = self.rows_on_page > 0 && self.rows_on_page + lines.len() > self.max_rows;
        if self.current.is_none() || over_budget {
            self.open_page()?;
        }
        if let Some(file) = self.current.as_mut() {
            if self.rows_on_page > 0 {
                writeln!(file)?;
            }
            for line in lines {
                writeln!(file, "{}", line)?;
            }
        }
        self.rows_on_page += lines.len();
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.close_page()
    }
}
