//! SQLite content store implementation
//!
//! This module provides a SQLite-based implementation of the ContentStore trait.

use crate::link::{LinkSource, RowMetadata, Scheme, SourceRow};
use crate::store::schema::initialize_schema;
use crate::store::traits::{ContentStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const CHAPTER_ROWS_SQL: &str = "
    SELECT bc.id, c.fullname, c.shortname, cs.name, b.name, bc.title, bc.content
    FROM book_chapters bc
    JOIN book b ON b.id = bc.bookid
    JOIN course c ON c.id = b.course
    LEFT JOIN course_sections cs ON cs.id = b.section
    WHERE bc.content LIKE ?1 AND (?2 IS NULL OR c.fullname = ?2)
    ORDER BY bc.id";

const SUMMARY_ROWS_SQL: &str = "
    SELECT cs.id, c.fullname, c.shortname, cs.name, cs.summary
    FROM course_sections cs
    JOIN course c ON c.id = cs.course
    WHERE cs.summary LIKE ?1 AND (?2 IS NULL OR c.fullname = ?2)
    ORDER BY cs.id";

const EXTERNAL_URL_ROWS_SQL: &str = "
    SELECT u.id, c.fullname, c.shortname, cs.name, u.name, u.externalurl
    FROM url u
    JOIN course c ON c.id = u.course
    LEFT JOIN course_sections cs ON cs.id = u.section
    WHERE u.externalurl LIKE ?1 AND (?2 IS NULL OR c.fullname = ?2)
    ORDER BY u.id";

/// SQLite content store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a content database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StoreError)` - Failed to open database
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===== Content Authoring =====

    pub fn add_course(&mut self, fullname: &str, shortname: &str) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO course (fullname, shortname) VALUES (?1, ?2)",
            params![fullname, shortname],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_section(&mut self, course: i64, name: Option<&str>, summary: &str) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO course_sections (course, name, summary) VALUES (?1, ?2, ?3)",
            params![course, name, summary],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_book(&mut self, course: i64, section: Option<i64>, name: &str) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO book (course, section, name) VALUES (?1, ?2, ?3)",
            params![course, section, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_chapter(&mut self, book: i64, title: &str, content: &str) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO book_chapters (bookid, title, content) VALUES (?1, ?2, ?3)",
            params![book, title, content],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_external_url(
        &mut self,
        course: i64,
        section: Option<i64>,
        name: &str,
        externalurl: &str,
    ) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO url (course, section, name, externalurl) VALUES (?1, ?2, ?3, ?4)",
            params![course, section, name, externalurl],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn query_rows<F>(&self, sql: &str, scheme: Scheme, course: Option<&str>, map: F) -> StoreResult<Vec<SourceRow>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<SourceRow>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params![scheme.like_pattern(), course], map)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl ContentStore for SqliteStore {
    // ===== Extraction Reads =====

    fn fetch_chapter_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>> {
        self.query_rows(CHAPTER_ROWS_SQL, scheme, course, |row| {
            Ok(SourceRow {
                source: LinkSource::ChapterContent {
                    chapter_id: row.get(0)?,
                },
                metadata: RowMetadata {
                    course_fullname: row.get(1)?,
                    course_shortname: row.get(2)?,
                    container_name: row.get(3)?,
                    book_name: row.get(4)?,
                    title: row.get(5)?,
                },
                text: row.get(6)?,
            })
        })
    }

    fn fetch_summary_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>> {
        self.query_rows(SUMMARY_ROWS_SQL, scheme, course, |row| {
            Ok(SourceRow {
                source: LinkSource::SectionSummary {
                    section_id: row.get(0)?,
                },
                metadata: RowMetadata {
                    course_fullname: row.get(1)?,
                    course_shortname: row.get(2)?,
                    container_name: row.get(3)?,
                    ..Default::default()
                },
                text: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })
    }

    fn fetch_external_url_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>> {
        self.query_rows(EXTERNAL_URL_ROWS_SQL, scheme, course, |row| {
            Ok(SourceRow {
                source: LinkSource::ExternalUrl { url_id: row.get(0)? },
                metadata: RowMetadata {
                    course_fullname: row.get(1)?,
                    course_shortname: row.get(2)?,
                    container_name: row.get(3)?,
                    title: row.get(4)?,
                    book_name: None,
                },
                text: row.get(5)?,
            })
        })
    }

    // ===== Rewrite Access =====

    fn read_field(&self, source: &LinkSource) -> StoreResult<String> {
        let (sql, id) = match *source {
            LinkSource::ChapterContent { chapter_id } => {
                ("SELECT content FROM book_chapters WHERE id = ?1", chapter_id)
            }
            LinkSource::SectionSummary { section_id } => {
                ("SELECT summary FROM course_sections WHERE id = ?1", section_id)
            }
            LinkSource::ExternalUrl { url_id } => ("SELECT externalurl FROM url WHERE id = ?1", url_id),
        };

        let value: Option<Option<String>> = self
            .conn
            .query_row(sql, params![id], |row| row.get(0))
            .optional()?;

        match value {
            Some(text) => Ok(text.unwrap_or_default()),
            None => Err(StoreError::RowNotFound(*source)),
        }
    }

    fn write_field(&mut self, source: &LinkSource, value: &str) -> StoreResult<()> {
        let (sql, id) = match *source {
            LinkSource::ChapterContent { chapter_id } => {
                ("UPDATE book_chapters SET content = ?1 WHERE id = ?2", chapter_id)
            }
            LinkSource::SectionSummary { section_id } => {
                ("UPDATE course_sections SET summary = ?1 WHERE id = ?2", section_id)
            }
            LinkSource::ExternalUrl { url_id } => {
                ("UPDATE url SET externalurl = ?1 WHERE id = ?2", url_id)
            }
        };

        let changed = self.conn.execute(sql, params![value, id])?;
        if changed == 0 {
            return Err(StoreError::RowNotFound(*source));
        }
        Ok(())
    }

    // ===== Lookup =====

    fn list_courses(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT fullname FROM course ORDER BY fullname")?;

        let courses = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(courses)
    }
}
