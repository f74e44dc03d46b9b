//! The line-oriented streaming encoding.
//!
//! One JSON record per line: a header, then each frame as it is produced,
//! then a footer with final counts. Because records flush as they are
//! written, a process killed mid-animation still leaves a parseable file —
//! the dropped writer emits a footer with `IsComplete: false` when it can,
//! and a missing footer is read the same way.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use glyphcast_frame::Frame;
use glyphcast_render::RenderMode;

use crate::document::{now_ms, Document, DocumentFrame, DocumentSettings};
use crate::error::{DocumentError, Result};
use crate::{DOCUMENT_TYPE, HEADER_TYPE, SCHEMA_CONTEXT, SCHEMA_VERSION};

/// The streaming header record's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamHeader {
    /// Schema version.
    #[serde(rename = "Version")]
    pub version: String,
    /// Creation time, unix epoch milliseconds.
    #[serde(rename = "Created")]
    pub created_ms: u64,
    /// The source media path, when known.
    #[serde(rename = "SourceFile", default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Which renderer produced the frames.
    #[serde(rename = "RenderMode")]
    pub mode: RenderMode,
    /// Condensed render settings.
    #[serde(rename = "Settings")]
    pub settings: DocumentSettings,
}

impl StreamHeader {
    /// A header for the given mode and settings, stamped now.
    pub fn new(mode: RenderMode, settings: DocumentSettings, source_file: Option<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            created_ms: now_ms(),
            source_file,
            mode,
            settings,
        }
    }
}

/// One line of a streaming file, discriminated by `@type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "@type")]
enum StreamRecord {
    #[serde(rename = "ConsoleImageDocumentHeader")]
    Header(StreamHeader),
    #[serde(rename = "Frame")]
    Frame {
        #[serde(rename = "Index")]
        index: u64,
        #[serde(flatten)]
        frame: DocumentFrame,
    },
    #[serde(rename = "ConsoleImageDocumentFooter")]
    Footer {
        #[serde(rename = "FrameCount")]
        frame_count: u64,
        #[serde(rename = "IsComplete")]
        is_complete: bool,
    },
}

/// Incremental writer for the streaming form.
///
/// Frames are validated for uniform dimensions and flushed record by
/// record. Call [`finish`](Self::finish) for a complete footer; dropping
/// the writer unfinished emits a best-effort footer with
/// `IsComplete: false`.
pub struct StreamingWriter<W: Write> {
    out: Option<W>,
    expect: Option<(u32, u32)>,
    count: u64,
    finished: bool,
}

impl<W: Write> StreamingWriter<W> {
    /// Writes the header record and returns the writer.
    pub fn new(mut out: W, header: &StreamHeader) -> Result<Self> {
        write_record(&mut out, &StreamRecord::Header(header.clone()))?;
        Ok(Self {
            out: Some(out),
            expect: None,
            count: 0,
            finished: false,
        })
    }

    /// Serializes and appends one frame, flushing the record.
    pub fn write_frame(&mut self, frame: &Frame, use_color: bool) -> Result<()> {
        let dims = (frame.width(), frame.height());
        match self.expect {
            None => self.expect = Some(dims),
            Some(expected) if expected != dims => {
                return Err(DocumentError::DimensionMismatch {
                    expected_w: expected.0,
                    expected_h: expected.1,
                    found_w: dims.0,
                    found_h: dims.1,
                });
            }
            Some(_) => {}
        }

        let record = StreamRecord::Frame {
            index: self.count,
            frame: DocumentFrame::from_frame(frame, use_color),
        };
        let out = self.out.as_mut().expect("writer is live until finished");
        write_record(out, &record)?;
        self.count += 1;
        Ok(())
    }

    /// Frames written so far.
    pub fn frame_count(&self) -> u64 {
        self.count
    }

    /// Writes the completion footer and returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        let mut out = self.out.take().expect("writer is live until finished");
        let footer = StreamRecord::Footer {
            frame_count: self.count,
            is_complete: true,
        };
        write_record(&mut out, &footer)?;
        self.finished = true;
        Ok(out)
    }
}

impl<W: Write> Drop for StreamingWriter<W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        // Interrupted write: flush an incomplete footer when feasible so
        // readers see the truncation explicitly.
        if let Some(out) = self.out.as_mut() {
            let footer = StreamRecord::Footer {
                frame_count: self.count,
                is_complete: false,
            };
            if write_record(out, &footer).is_err() {
                log::warn!("could not flush incomplete footer for interrupted stream");
            }
        }
    }
}

/// Opens a buffered streaming writer at `path`.
pub fn create_stream(
    path: impl AsRef<Path>,
    header: &StreamHeader,
) -> Result<StreamingWriter<std::io::BufWriter<std::fs::File>>> {
    let file = std::fs::File::create(path.as_ref())?;
    StreamingWriter::new(std::io::BufWriter::new(file), header)
}

fn write_record<W: Write>(out: &mut W, record: &StreamRecord) -> Result<()> {
    let line = serde_json::to_string(record).map_err(|source| DocumentError::Parse {
        line: None,
        source,
    })?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Sniffs whether `text`'s first line is a streaming header record.
pub(crate) fn looks_like_stream(text: &str) -> bool {
    let first = text.lines().next().unwrap_or("");
    first.contains(HEADER_TYPE) && serde_json::from_str::<StreamRecord>(first).is_ok()
}

/// Parses a full streaming file into a [`Document`].
pub(crate) fn parse(text: &str) -> Result<Document> {
    let mut header: Option<StreamHeader> = None;
    let mut frames: Vec<DocumentFrame> = Vec::new();
    let mut footer: Option<(u64, bool)> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let record: StreamRecord =
            serde_json::from_str(line).map_err(|source| DocumentError::Parse {
                line: Some(line_no),
                source,
            })?;
        match record {
            StreamRecord::Header(h) => {
                if header.is_none() {
                    header = Some(h);
                }
            }
            StreamRecord::Frame { frame, .. } => {
                if header.is_none() {
                    return Err(DocumentError::MissingHeader);
                }
                frames.push(frame);
            }
            StreamRecord::Footer {
                frame_count,
                is_complete,
            } => footer = Some((frame_count, is_complete)),
        }
    }

    let header = header.ok_or(DocumentError::MissingHeader)?;

    // A footer that claims completeness must account for every frame.
    let complete = match footer {
        Some((expected, true)) => {
            if expected != frames.len() as u64 {
                return Err(DocumentError::Truncated {
                    expected,
                    found: frames.len() as u64,
                });
            }
            true
        }
        Some((_, false)) | None => false,
    };

    Ok(Document {
        context: SCHEMA_CONTEXT.to_string(),
        type_tag: DOCUMENT_TYPE.to_string(),
        version: header.version,
        created_ms: header.created_ms,
        source_file: header.source_file,
        mode: header.mode,
        settings: header.settings,
        frames,
        complete,
    })
}
