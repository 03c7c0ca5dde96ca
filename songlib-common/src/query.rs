//! Filtered, paginated song listing
//!
//! Turns the optional query parameters of a list request into a single
//! `SELECT ... LIMIT ? OFFSET ?` over songs joined with their group.
//!
//! Malformed `page`/`limit` values fall back to their defaults and an
//! unparseable `releaseDate` filter is dropped. Neither is an error.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::db::models::{parse_date, SongRecord};
use crate::db::songs::SONG_RECORD_COLUMNS;
use crate::{Error, Result};

/// Page used when `page` is missing, non-numeric or below 1
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is missing, non-numeric or below 1
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw list parameters exactly as they arrive in the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongListParams {
    pub id: Option<String>,
    pub group: Option<String>,
    /// Song title
    pub song: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    /// Wire name `releaseDate`
    pub release_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SongListParams {
    /// Collect parameters from decoded query-string pairs
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "id" => &mut params.id,
                "group" => &mut params.group,
                "song" => &mut params.song,
                "text" => &mut params.text,
                "link" => &mut params.link,
                "releaseDate" => &mut params.release_date,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Page number and size after defaulting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Rows per page
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build pagination from raw parameter strings
    ///
    /// # Examples
    /// ```
    /// use songlib_common::query::Pagination;
    ///
    /// let p = Pagination::from_params(Some("2"), Some("5"));
    /// assert_eq!((p.page, p.limit, p.offset()), (2, 5, 5));
    ///
    /// // Invalid values fall back to page 1, limit 10
    /// let p = Pagination::from_params(Some("0"), Some("abc"));
    /// assert_eq!((p.page, p.limit), (1, 10));
    /// ```
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Offset for SQL LIMIT/OFFSET query
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

/// Validated song filters; every field is optional and they combine with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub id: Option<i64>,
    /// Group name, exact match
    pub group: Option<String>,
    /// Song title, exact match
    pub title: Option<String>,
    /// Substring of the lyrics
    pub text: Option<String>,
    /// Link, exact match
    pub link: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl SongFilter {
    /// Validate raw parameters
    ///
    /// Empty strings count as absent. A non-integer `id` is rejected with
    /// [`Error::InvalidInput`]; an unparseable `releaseDate` is ignored.
    pub fn from_params(params: &SongListParams) -> Result<Self> {
        let id = match non_empty(&params.id) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| Error::InvalidInput(format!("Invalid id filter: {}", raw)))?,
            ),
            None => None,
        };

        let release_date = non_empty(&params.release_date).and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                warn!(release_date = raw, "Ignoring malformed releaseDate filter");
            }
            parsed
        });

        Ok(Self {
            id,
            group: non_empty(&params.group).map(str::to_string),
            title: non_empty(&params.song).map(str::to_string),
            text: non_empty(&params.text).map(str::to_string),
            link: non_empty(&params.link).map(str::to_string),
            release_date,
        })
    }

    /// Append a WHERE clause for the supplied filters
    pub fn push_conditions(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let mut has_where = false;

        if let Some(id) = self.id {
            push_clause(builder, &mut has_where);
            builder.push("s.id = ").push_bind(id);
        }
        if let Some(group) = &self.group {
            push_clause(builder, &mut has_where);
            builder.push("g.name = ").push_bind(group.clone());
        }
        if let Some(title) = &self.title {
            push_clause(builder, &mut has_where);
            builder.push("s.song = ").push_bind(title.clone());
        }
        if let Some(date) = self.release_date {
            push_clause(builder, &mut has_where);
            builder.push("s.release_date = ").push_bind(date);
        }
        if let Some(text) = &self.text {
            push_clause(builder, &mut has_where);
            builder
                .push("s.text LIKE ")
                .push_bind(format!("%{}%", escape_like(text)))
                .push(" ESCAPE '\\'");
        }
        if let Some(link) = &self.link {
            push_clause(builder, &mut has_where);
            builder.push("s.link = ").push_bind(link.clone());
        }
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Sqlite>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Escape LIKE wildcards so the needle matches literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the list query for a filter and page
pub fn build_list_query(
    filter: &SongFilter,
    pagination: Pagination,
) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM songs s JOIN groups g ON g.id = s.group_id",
        SONG_RECORD_COLUMNS
    ));

    filter.push_conditions(&mut builder);

    // Insertion order; keeps pages stable between requests
    builder
        .push(" ORDER BY s.id LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    builder
}

/// Fetch one page of songs matching `filter`
pub async fn list_songs(
    pool: &SqlitePool,
    filter: &SongFilter,
    pagination: Pagination,
) -> Result<Vec<SongRecord>> {
    debug!(?filter, ?pagination, "Listing songs");

    let songs = build_list_query(filter, pagination)
        .build_query_as::<SongRecord>()
        .fetch_all(pool)
        .await?;

    Ok(songs)
}
