//! Database schema definitions
//!
//! This module contains the SQL schema of the content database: courses,
//! their sections, books with chapters, and external URL resources.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Courses
CREATE TABLE IF NOT EXISTS course (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fullname TEXT NOT NULL,
    shortname TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_course_fullname ON course(fullname);

-- Course sections, each with an HTML summary
CREATE TABLE IF NOT EXISTS course_sections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course INTEGER NOT NULL REFERENCES course(id),
    name TEXT,
    summary TEXT
);

CREATE INDEX IF NOT EXISTS idx_course_sections_course ON course_sections(course);

-- Books placed in a course section
CREATE TABLE IF NOT EXISTS book (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course INTEGER NOT NULL REFERENCES course(id),
    section INTEGER REFERENCES course_sections(id),
    name TEXT NOT NULL
);

-- Book chapters with HTML content
CREATE TABLE IF NOT EXISTS book_chapters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bookid INTEGER NOT NULL REFERENCES book(id),
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_book_chapters_book ON book_chapters(bookid);

-- External URL resources
CREATE TABLE IF NOT EXISTS url (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course INTEGER NOT NULL REFERENCES course(id),
    section INTEGER REFERENCES course_sections(id),
    name TEXT NOT NULL,
    externalurl TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_url_course ON url(course);
"#;

/// Initializes the database schema
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
