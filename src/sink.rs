//! Output sinks — where finished documents go.
//!
//! A sink is opened when the session starts (so an unusable target fails
//! before any drawing) and receives each document exactly once, fully
//! assembled, when the session closes.

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::SvgError;

pub trait OutputSink: fmt::Debug {
    /// Name of the target, used to derive the companion document's name.
    fn name(&self) -> &str;

    /// Obtain the target and make sure it is writable.
    fn open(&mut self) -> Result<(), SvgError>;

    /// Write a complete document.
    fn write_document(&mut self, document: &str) -> Result<(), SvgError>;

    /// A new, unopened sink of the same kind with the given name.
    fn sibling(&self, name: &str) -> Box<dyn OutputSink>;
}

// ═══════════════════════════════════════════════════════════════════════
// FileSink
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    name: String,
    file: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.to_string_lossy().into_owned();
        Self { path, name, file: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<(), SvgError> {
        let file = File::create(&self.path).map_err(|source| SvgError::SinkUnavailable {
            name: self.name.clone(),
            source,
        })?;
        self.file = Some(BufWriter::new(file));
        Ok(())
    }

    fn write_document(&mut self, document: &str) -> Result<(), SvgError> {
        if self.file.is_none() {
            self.open()?;
        }
        let name = &self.name;
        let file = self.file.as_mut().ok_or(SvgError::NoOutput)?;
        file.write_all(document.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| SvgError::Write { name: name.clone(), source })?;
        // Dropping the writer closes the file.
        self.file = None;
        Ok(())
    }

    fn sibling(&self, name: &str) -> Box<dyn OutputSink> {
        Box::new(FileSink::new(name))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MemorySink
// ═══════════════════════════════════════════════════════════════════════

/// In-memory sink. Clones share the same buffer, so a caller can keep a
/// handle while the session owns the sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    name: String,
    contents: Rc<RefCell<String>>,
    siblings: Rc<RefCell<Vec<MemorySink>>>,
}

impl MemorySink {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }

    /// Contents of the latest sibling with this name.
    pub fn sibling_contents(&self, name: &str) -> Option<String> {
        self.siblings
            .borrow()
            .iter()
            .rev()
            .find(|s| s.name == name)
            .map(MemorySink::contents)
    }

    pub fn sibling_names(&self) -> Vec<String> {
        self.siblings.borrow().iter().map(|s| s.name.clone()).collect()
    }
}

impl OutputSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<(), SvgError> {
        self.contents.borrow_mut().clear();
        Ok(())
    }

    fn write_document(&mut self, document: &str) -> Result<(), SvgError> {
        self.contents.borrow_mut().push_str(document);
        Ok(())
    }

    fn sibling(&self, name: &str) -> Box<dyn OutputSink> {
        let sibling = MemorySink::new(name);
        self.siblings.borrow_mut().push(sibling.clone());
        Box::new(sibling)
    }
}

/// Name of the frozen-pane companion: `_frozen` goes before the extension.
pub fn frozen_name(name: &str) -> String {
    const SUFFIX: &str = "_frozen";
    let file_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match name[file_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = file_start + dot;
            format!("{}{SUFFIX}{}", &name[..dot], &name[dot..])
        }
        _ => format!("{name}{SUFFIX}"),
    }
}
