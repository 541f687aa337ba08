// ============================================================
// Layer 4 — Paper File Loader
// ============================================================
// Reads a paper (or its abstract) from disk:
//   .txt / .md → read as UTF-8
//   .docx      → parsed with docx-rs, one line per paragraph
//
// .docx files are ZIP archives of XML. docx-rs exposes the
// body as a tree and the text lives in the leaves:
//
//   Document
//     └── Paragraph
//           └── Run
//                 └── Text
//
// Whatever the format, the text goes through the Preprocessor
// before it is handed back.
//
// Reference: docx-rs crate documentation

use anyhow::{bail, Context, Result};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::Preprocessor;
use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// Loads a single paper file.
pub struct PaperFileLoader {
    path: PathBuf,
}

impl PaperFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for PaperFileLoader {
    fn load(&self) -> Result<Document> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let raw = match ext.as_deref() {
            Some("docx")              => read_docx_text(&self.path)?,
            Some("txt") | Some("md")  => fs::read_to_string(&self.path)
                .with_context(|| format!("Cannot read '{}'", self.path.display()))?,
            _ => bail!(
                "Unsupported paper file '{}': expected .txt, .md or .docx",
                self.path.display()
            ),
        };

        let text   = Preprocessor::new().clean(&raw);
        let source = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!("Loaded: {} ({} chars)", source, text.len());
        if text.is_empty() {
            tracing::warn!("'{}' contains no text", self.path.display());
        }

        Ok(Document::new(source, text))
    }
}

/// Extract all paragraph text from a .docx file, one paragraph per line.
fn read_docx_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let docx = read_docx(&bytes).map_err(|e| {
        anyhow::anyhow!("docx-rs parse error in '{}': {:?}", path.display(), e)
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|p| !p.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Runs in one paragraph are parts of the same sentence, so they
/// are concatenated without a separator.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    para.children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        })
        .flat_map(|run| run.children.iter())
        .filter_map(|rc| match rc {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}
