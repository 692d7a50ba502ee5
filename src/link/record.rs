/// Link record definitions
///
/// A `LinkRecord` is created by the extractor, annotated once by the prober
/// and only ever re-pointed at a new URL by the conversion step.
use std::fmt;

/// Which backing field a link was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Book chapter body text
    ChapterContent,
    /// Course section summary text
    SectionSummary,
    /// External URL resource, where the whole field is the link
    ExternalUrl,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChapterContent => "chapter_content",
            Self::SectionSummary => "section_summary",
            Self::ExternalUrl => "external_url",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The row a link belongs to, tagged by the field it must be written back into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSource {
    ChapterContent { chapter_id: i64 },
    SectionSummary { section_id: i64 },
    ExternalUrl { url_id: i64 },
}

impl LinkSource {
    /// Returns the kind of field this source refers to
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::ChapterContent { .. } => SourceKind::ChapterContent,
            Self::SectionSummary { .. } => SourceKind::SectionSummary,
            Self::ExternalUrl { .. } => SourceKind::ExternalUrl,
        }
    }

    /// Returns the primary key of the owning row in its table
    pub fn row_id(&self) -> i64 {
        match *self {
            Self::ChapterContent { chapter_id } => chapter_id,
            Self::SectionSummary { section_id } => section_id,
            Self::ExternalUrl { url_id } => url_id,
        }
    }
}

impl fmt::Display for LinkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind(), self.row_id())
    }
}

/// Display metadata carried for reporting only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMetadata {
    pub course_fullname: Option<String>,
    pub course_shortname: Option<String>,
    /// Name of the containing course section
    pub container_name: Option<String>,
    pub title: Option<String>,
    pub book_name: Option<String>,
}

/// One row fetched from the backing store, ready for link extraction
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub source: LinkSource,
    pub text: String,
    pub metadata: RowMetadata,
}

/// The outcome of probing one URL
///
/// A transport failure has `status_code == 0` and non-empty error text;
/// a response has its numeric status and empty error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status_code: u16,
    pub transport_error: String,
}

impl ProbeOutcome {
    /// Creates an outcome for a server that answered
    pub fn response(status_code: u16) -> Self {
        Self {
            status_code,
            transport_error: String::new(),
        }
    }

    /// Creates an outcome for a request that never got a response
    pub fn transport_failure(error: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            transport_error: error.into(),
        }
    }

    /// Returns true if no HTTP response was received
    pub fn is_transport_failure(&self) -> bool {
        !self.transport_error.is_empty()
    }
}

/// One discovered URL occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Position of this match among all matches of the extraction pass,
    /// counting skipped ones. Identity key for result association.
    pub index: usize,

    /// The matched link
    pub url: String,

    /// Row and field the link came from
    pub source: LinkSource,

    /// Display metadata of the owning row
    pub metadata: RowMetadata,

    outcome: Option<ProbeOutcome>,
}

impl LinkRecord {
    /// Creates an unprobed record
    pub fn new(index: usize, url: impl Into<String>, source: LinkSource, metadata: RowMetadata) -> Self {
        Self {
            index,
            url: url.into(),
            source,
            metadata,
            outcome: None,
        }
    }

    /// Returns the probe outcome, if this record has been probed
    pub fn outcome(&self) -> Option<&ProbeOutcome> {
        self.outcome.as_ref()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.outcome.as_ref().map(|o| o.status_code)
    }

    pub fn transport_error(&self) -> Option<&str> {
        self.outcome.as_ref().map(|o| o.transport_error.as_str())
    }

    pub fn is_probed(&self) -> bool {
        self.outcome.is_some()
    }

    /// Records the probe outcome
    ///
    /// A record is probed at most once; a second outcome is ignored and
    /// logged, keeping the first.
    pub fn set_outcome(&mut self, outcome: ProbeOutcome) {
        if self.outcome.is_some() {
            tracing::warn!("Ignoring second probe outcome for {}", self.url);
            return;
        }
        self.outcome = Some(outcome);
    }

    /// Returns a fresh, unprobed copy pointing at `url`
    ///
    /// Index, source and metadata are preserved so the copy can be joined
    /// back to this record.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self::new(self.index, url, self.source, self.metadata.clone())
    }
}
