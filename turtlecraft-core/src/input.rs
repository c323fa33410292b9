//! Line sources: program files and the interactive reader

use crate::error::{Error, Result};
use crate::interpreter::PROMPT;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Read a program file into lines. Bytes that are not UTF-8 are replaced,
/// so a bad line is rejected by the validator like any other.
pub fn load_program(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(path.display().to_string())
            .with_operation("input::load_program")
            .set_source(e),
        _ => Error::from(e)
            .with_operation("input::load_program")
            .with_context("path", path.display().to_string()),
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.lines().map(str::to_string).collect())
}

/// Lines from a reader, with a prompt written before each read when a
/// prompt writer is given
pub struct PromptedLines<R, W> {
    reader: R,
    prompt: Option<W>,
    done: bool,
}

impl<R: BufRead, W: Write> PromptedLines<R, W> {
    pub fn new(reader: R, prompt: Option<W>) -> Self {
        Self {
            reader,
            prompt,
            done: false,
        }
    }

    fn show_prompt(&mut self) -> Result<()> {
        if let Some(out) = self.prompt.as_mut() {
            out.write_all(PROMPT.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|e| Error::from(e).with_operation("input::prompt"))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Iterator for PromptedLines<R, W> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Err(e) = self.show_prompt() {
            self.done = true;
            return Some(Err(e));
        }
        // raw bytes: a line that is not UTF-8 still reaches the validator
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                Some(Ok(line.trim_end_matches(['\r', '\n']).to_string()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(Error::from(e).with_operation("input::read_line")))
            }
        }
    }
}
