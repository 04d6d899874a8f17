use anyhow::{Context, Result, anyhow};
use std::path::Path;

/// Convert an uploaded resume file to plain text before it goes to
/// the backend. Dispatch is by extension; anything unrecognized is a
/// user-facing error. Extraction failures are terminal for the file —
/// no partial fallback is attempted.
pub fn extract_text(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => extract_plain(path),
        "pdf" => extract_pdf(path),
        "docx" | "doc" => extract_docx(path),
        "" => Err(anyhow!(
            "Cannot tell the file type of {} (no extension)",
            path.display()
        )),
        other => Err(anyhow!(
            "Unsupported file type '.{}'. Supported: .txt, .pdf, .docx, .doc",
            other
        )),
    }
}

pub fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref(),
        Some("txt") | Some("pdf") | Some("docx") | Some("doc")
    )
}

fn extract_plain(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Page-by-page text extraction; page texts are joined by newlines.
/// Pages that fail individually are skipped with a warning rather
/// than failing the document.
fn extract_pdf(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path)
        .with_context(|| format!("Failed to open PDF {}", path.display()))?;

    let mut pages = Vec::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                tracing::warn!("Skipping PDF page {}: {e}", page_num);
            }
        }
    }

    let text = pages.join("\n");
    if text.trim().is_empty() {
        return Err(anyhow!("No text could be extracted from the PDF"));
    }
    Ok(text)
}

fn extract_docx(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| anyhow!("Failed to parse document: {:?}", e))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for p_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = p_child {
                    for r_child in run.children {
                        if let docx_rs::RunChild::Text(t) = r_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    if text.trim().is_empty() {
        return Err(anyhow!("No text could be extracted from the document"));
    }
    Ok(text)
}
