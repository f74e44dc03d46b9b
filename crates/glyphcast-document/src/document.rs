//! The in-memory document and the standard single-object encoding.

use std::io::{Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use glyphcast_frame::Frame;
use glyphcast_render::RenderMode;

use crate::error::{DocumentError, Result};
use crate::stream;
use crate::{DOCUMENT_TYPE, SCHEMA_CONTEXT, SCHEMA_VERSION};

/// The condensed render settings a document carries — enough to reproduce
/// playback, not the full render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Frame width in cells.
    #[serde(rename = "Width")]
    pub width: u32,
    /// Frame height in cells.
    #[serde(rename = "Height")]
    pub height: u32,
    /// Character aspect ratio the frames were rendered for.
    #[serde(rename = "CharAspect")]
    pub char_aspect: f32,
    /// Whether frame content carries color escapes.
    #[serde(rename = "UseColor")]
    pub use_color: bool,
    /// Playback speed multiplier.
    #[serde(rename = "Speed")]
    pub speed: f32,
    /// Loop count; 0 loops forever.
    #[serde(rename = "LoopCount")]
    pub loop_count: u32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            char_aspect: 0.5,
            use_color: true,
            speed: 1.0,
            loop_count: 0,
        }
    }
}

/// One stored frame: the complete ANSI payload plus timing and shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFrame {
    /// Full serialization of the frame, CRLF row endings, trailing reset.
    #[serde(rename = "Content")]
    pub content: String,
    /// Nominal delay before the next frame, in milliseconds.
    #[serde(rename = "Delay")]
    pub delay_ms: u32,
    /// Width in cells.
    #[serde(rename = "Width")]
    pub width: u32,
    /// Height in cells.
    #[serde(rename = "Height")]
    pub height: u32,
}

impl DocumentFrame {
    /// Serializes a rendered frame into its stored form.
    pub fn from_frame(frame: &Frame, use_color: bool) -> Self {
        Self {
            content: frame.to_ansi(use_color),
            delay_ms: frame.delay_ms(),
            width: frame.width(),
            height: frame.height(),
        }
    }
}

fn default_complete() -> bool {
    true
}

/// A rendered frame sequence with its provenance and playback settings.
///
/// Loaded documents expose the same interface whichever on-disk encoding
/// they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Schema context tag.
    #[serde(rename = "@context")]
    pub context: String,
    /// Root type tag; always [`DOCUMENT_TYPE`](crate::DOCUMENT_TYPE).
    #[serde(rename = "@type")]
    pub type_tag: String,
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
    /// The frames, in playback order.
    #[serde(rename = "Frames")]
    pub frames: Vec<DocumentFrame>,
    /// False when loaded from a streaming file whose footer reported an
    /// interrupted write. Not serialized in the standard form.
    #[serde(skip, default = "default_complete")]
    pub complete: bool,
}

impl Document {
    /// Creates an empty document for the given mode and settings.
    pub fn new(
        mode: RenderMode,
        settings: DocumentSettings,
        source_file: Option<String>,
    ) -> Self {
        Self {
            context: SCHEMA_CONTEXT.to_string(),
            type_tag: DOCUMENT_TYPE.to_string(),
            version: SCHEMA_VERSION.to_string(),
            created_ms: now_ms(),
            source_file,
            mode,
            settings,
            frames: Vec::new(),
            complete: true,
        }
    }

    /// Builds a document from rendered frames, enforcing that every frame
    /// shares the same cell dimensions.
    pub fn from_frames(
        mode: RenderMode,
        mut settings: DocumentSettings,
        source_file: Option<String>,
        frames: &[Frame],
        use_color: bool,
    ) -> Result<Self> {
        let mut doc = Self::new(mode, settings.clone(), source_file);
        for frame in frames {
            doc.push_frame(frame, use_color)?;
        }
        if let Some(first) = doc.frames.first() {
            settings.width = first.width;
            settings.height = first.height;
            doc.settings = settings;
        }
        Ok(doc)
    }

    /// Appends one frame, enforcing uniform dimensions.
    pub fn push_frame(&mut self, frame: &Frame, use_color: bool) -> Result<()> {
        if let Some(first) = self.frames.first() {
            if (frame.width(), frame.height()) != (first.width, first.height) {
                return Err(DocumentError::DimensionMismatch {
                    expected_w: first.width,
                    expected_h: first.height,
                    found_w: frame.width(),
                    found_h: frame.height(),
                });
            }
        }
        self.frames.push(DocumentFrame::from_frame(frame, use_color));
        Ok(())
    }

    /// Number of stored frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True when more than one frame is stored.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Sum of all frame delays, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delay_ms as u64).sum()
    }

    /// Serializes the standard form into a writer.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        serde_json::to_writer_pretty(out, self).map_err(|source| DocumentError::Parse {
            line: None,
            source,
        })
    }

    /// Saves to a path; a `.gz` extension enables gzip compression.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        if is_gz_path(path) {
            let mut enc = GzEncoder::new(file, Compression::default());
            self.write_to(&mut enc)?;
            enc.finish()?;
        } else {
            self.write_to(file)?;
        }
        log::debug!("saved document ({} frames) to {}", self.frames.len(), path.display());
        Ok(())
    }

    /// Reads a document from any source, sniffing gzip and the encoding.
    ///
    /// Dispatch looks at the first record: a streaming header selects the
    /// line-oriented parser, anything else parses as the standard form.
    pub fn read_from<R: Read>(mut input: R) -> Result<Self> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        // Gzip magic.
        if bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B {
            let mut decoded = Vec::new();
            GzDecoder::new(&bytes[..]).read_to_end(&mut decoded)?;
            bytes = decoded;
        }

        let text = String::from_utf8_lossy(&bytes);
        if stream::looks_like_stream(&text) {
            return stream::parse(&text);
        }

        let doc: Document =
            serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
                line: None,
                source,
            })?;
        if doc.type_tag != DOCUMENT_TYPE {
            return Err(DocumentError::SchemaMismatch {
                found: doc.type_tag,
            });
        }
        Ok(doc)
    }

    /// Loads a document from a path (standard or streaming, gzip or plain).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from(file)
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn is_gz_path(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcast_color::Color;
    use glyphcast_frame::Cell;

    fn frame(ch: char, delay: u32) -> Frame {
        let cells = vec![Cell::new(ch).with_fg(Color::GREEN); 6];
        Frame::from_cells(3, 2, cells, delay)
    }

    fn sample_doc(n: usize) -> Document {
        let frames: Vec<Frame> = (0..n)
            .map(|i| frame(char::from(b'a' + i as u8), 40))
            .collect();
        Document::from_frames(
            RenderMode::Braille,
            DocumentSettings::default(),
            Some("clip.gif".to_string()),
            &frames,
            true,
        )
        .unwrap()
    }

    #[test]
    fn five_frame_round_trip() {
        let doc = sample_doc(5);
        let mut buf = Vec::new();
        doc.write_to(&mut buf).unwrap();

        let loaded = Document::read_from(&buf[..]).unwrap();
        assert_eq!(loaded.frame_count(), 5);
        assert!(loaded.is_animated());
        assert_eq!(loaded.total_duration_ms(), 200);
        assert_eq!(loaded.frames, doc.frames);
        assert_eq!(loaded.mode, RenderMode::Braille);
        assert_eq!(loaded.source_file.as_deref(), Some("clip.gif"));
        assert!(loaded.complete);
    }

    #[test]
    fn settings_capture_frame_dimensions() {
        let doc = sample_doc(2);
        assert_eq!(doc.settings.width, 3);
        assert_eq!(doc.settings.height, 2);
    }

    #[test]
    fn content_uses_crlf_and_trailing_reset() {
        let doc = sample_doc(1);
        let content = &doc.frames[0].content;
        assert!(content.contains("\r\n"));
        assert!(content.ends_with("\x1b[0m\r\n"));
    }

    #[test]
    fn mismatched_frame_dimensions_are_rejected() {
        let mut doc = Document::new(
            RenderMode::Ascii,
            DocumentSettings::default(),
            None,
        );
        doc.push_frame(&frame('a', 10), true).unwrap();
        let odd = Frame::from_cells(1, 1, vec![Cell::new('x')], 10);
        assert!(matches!(
            doc.push_frame(&odd, true),
            Err(DocumentError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn no_color_documents_carry_no_escapes() {
        let frames = vec![frame('a', 10)];
        let doc = Document::from_frames(
            RenderMode::Ascii,
            DocumentSettings {
                use_color: false,
                ..DocumentSettings::default()
            },
            None,
            &frames,
            false,
        )
        .unwrap();
        assert!(!doc.frames[0].content.contains('\x1b'));
    }

    #[test]
    fn unknown_root_type_is_a_schema_error() {
        let json = serde_json::json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "SomethingElse",
            "Version": "1.0",
            "Created": 0,
            "RenderMode": "Ascii",
            "Settings": DocumentSettings::default(),
            "Frames": [],
        });
        let err = Document::read_from(json.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, DocumentError::SchemaMismatch { found } if found == "SomethingElse"));
    }

    #[test]
    fn garbage_reports_a_parse_error() {
        let err = Document::read_from(&b"{not json"[..]).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { line: None, .. }));
    }

    #[test]
    fn still_documents_are_not_animated() {
        let doc = sample_doc(1);
        assert!(!doc.is_animated());
    }
}
