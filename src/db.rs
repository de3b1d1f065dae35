use sqlx::{sqlite::SqlitePoolOptions, FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::warn;

/// Content kinds managed by the admin desk. The slug doubles as the table
/// name and as the discriminator in `content_tags` and `search_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Entries,
    Quotations,
    Blogmarks,
    Notes,
    Quotebacks,
    Tags,
    Comments,
    Series,
}

impl ContentKind {
    pub const ALL: [ContentKind; 8] = [
        ContentKind::Entries,
        ContentKind::Quotations,
        ContentKind::Blogmarks,
        ContentKind::Notes,
        ContentKind::Quotebacks,
        ContentKind::Tags,
        ContentKind::Comments,
        ContentKind::Series,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ContentKind::Entries => "entries",
            ContentKind::Quotations => "quotations",
            ContentKind::Blogmarks => "blogmarks",
            ContentKind::Notes => "notes",
            ContentKind::Quotebacks => "quotebacks",
            ContentKind::Tags => "tags",
            ContentKind::Comments => "comments",
            ContentKind::Series => "series",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Quoteback {
    pub id: i64,
    pub quote_text: String,
    pub commentary: String,
    pub title: String,
    pub slug: String,
    pub source_url: String,
    pub page_title: String,
    pub author: String,
    pub favicon: Option<String>,
    pub created: String,
    pub is_draft: bool,
    pub series_id: Option<i64>,
    pub card_image: String,
    pub metadata: String,
    pub import_ref: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: i64,
    pub tag: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

/// One row of an admin list screen, shaped the same for every kind so a
/// single template can render them all. Kinds without a slug or draft flag
/// leave those blank.
#[derive(Debug, Clone, FromRow)]
pub struct ListRow {
    pub id: i64,
    pub label: String,
    pub slug: String,
    pub created: String,
    pub tag_summary: String,
    pub is_draft: Option<bool>,
    pub extra: String,
}

/// Query parameters accepted by the list screens. Which of these a screen
/// actually exposes is declared in the admin layer.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub q: Option<String>,
    pub draft: Option<bool>,
    pub year: Option<String>,
    pub series: Option<i64>,
    pub visible: Option<bool>,
    pub spam: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS series (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                slug TEXT NOT NULL,
                body TEXT NOT NULL DEFAULT '',
                created TEXT NOT NULL,
                is_draft INTEGER NOT NULL DEFAULT 0,
                series_id INTEGER REFERENCES series(id),
                card_image TEXT NOT NULL DEFAULT '',
                metadata TEXT NOT NULL DEFAULT '',
                import_ref TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotations (
                id INTEGER PRIMARY KEY,
                quotation TEXT NOT NULL,
                source TEXT NOT NULL,
                source_url TEXT NOT NULL DEFAULT '',
                slug TEXT NOT NULL,
                created TEXT NOT NULL,
                is_draft INTEGER NOT NULL DEFAULT 0,
                import_ref TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blogmarks (
                id INTEGER PRIMARY KEY,
                link_url TEXT NOT NULL,
                link_title TEXT NOT NULL,
                commentary TEXT NOT NULL DEFAULT '',
                slug TEXT NOT NULL,
                created TEXT NOT NULL,
                is_draft INTEGER NOT NULL DEFAULT 0,
                import_ref TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY,
                body TEXT NOT NULL,
                slug TEXT NOT NULL,
                created TEXT NOT NULL,
                is_draft INTEGER NOT NULL DEFAULT 0,
                import_ref TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotebacks (
                id INTEGER PRIMARY KEY,
                quote_text TEXT NOT NULL,
                commentary TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL DEFAULT '',
                slug TEXT NOT NULL,
                source_url TEXT NOT NULL DEFAULT '',
                page_title TEXT NOT NULL DEFAULT '',
                author TEXT NOT NULL DEFAULT '',
                favicon TEXT,
                created TEXT NOT NULL,
                is_draft INTEGER NOT NULL DEFAULT 0,
                series_id INTEGER REFERENCES series(id),
                card_image TEXT NOT NULL DEFAULT '',
                metadata TEXT NOT NULL DEFAULT '',
                import_ref TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY,
                tag TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS content_tags (
                kind TEXT NOT NULL,
                content_id INTEGER NOT NULL,
                tag_id INTEGER NOT NULL REFERENCES tags(id),
                UNIQUE(kind, content_id, tag_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_content_tags_lookup
            ON content_tags(kind, content_id)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY,
                content_kind TEXT NOT NULL,
                content_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL DEFAULT '',
                url TEXT NOT NULL DEFAULT '',
                body TEXT NOT NULL,
                created TEXT NOT NULL,
                visible_on_site INTEGER NOT NULL DEFAULT 1,
                spam_status TEXT NOT NULL DEFAULT 'ok'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE VIRTUAL TABLE IF NOT EXISTS search_index
            USING fts5(kind UNINDEXED, content_id UNINDEXED, body)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self, kind: ContentKind) -> anyhow::Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.slug());
        let count: (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count.0)
    }

    /// Rows for one admin list screen: search, filters and pagination per
    /// the given ListFilter.
    pub async fn list(&self, kind: ContentKind, filter: &ListFilter) -> anyhow::Result<Vec<ListRow>> {
        match kind {
            ContentKind::Entries => {
                self.list_content("entries", "e.title", "''", filter).await
            }
            ContentKind::Quotations => {
                self.list_content("quotations", "substr(e.quotation, 1, 80)", "e.source", filter)
                    .await
            }
            ContentKind::Blogmarks => {
                self.list_content("blogmarks", "e.link_title", "e.link_url", filter)
                    .await
            }
            ContentKind::Notes => {
                self.list_content("notes", "substr(e.body, 1, 80)", "''", filter)
                    .await
            }
            ContentKind::Quotebacks => {
                self.list_content(
                    "quotebacks",
                    "CASE WHEN e.title != '' THEN e.title ELSE e.page_title END",
                    "e.source_url",
                    filter,
                )
                .await
            }
            ContentKind::Tags => self.list_tags(filter).await,
            ContentKind::Comments => self.list_comments(filter).await,
            ContentKind::Series => self.list_series(filter).await,
        }
    }

    async fn list_content(
        &self,
        table: &str,
        label_expr: &str,
        extra_expr: &str,
        filter: &ListFilter,
    ) -> anyhow::Result<Vec<ListRow>> {
        let searching = filter
            .q
            .as_deref()
            .map(|q| !q.trim().is_empty())
            .unwrap_or(false);

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT e.id AS id, {label_expr} AS label, e.slug AS slug, \
             e.created AS created, e.is_draft AS is_draft, {extra_expr} AS extra, \
             COALESCE((SELECT GROUP_CONCAT(t.tag, ' ') FROM content_tags ct \
             JOIN tags t ON t.id = ct.tag_id \
             WHERE ct.kind = '{table}' AND ct.content_id = e.id), '') AS tag_summary \
             FROM {table} e"
        ));

        if searching {
            qb.push(" JOIN search_index ON search_index.kind = ");
            qb.push_bind(table.to_string());
            qb.push(" AND search_index.content_id = e.id");
        }

        qb.push(" WHERE 1=1");

        if searching {
            qb.push(" AND search_index MATCH ");
            qb.push_bind(filter.q.as_deref().unwrap_or_default().trim().to_string());
        }
        if let Some(draft) = filter.draft {
            qb.push(" AND e.is_draft = ");
            qb.push_bind(draft);
        }
        if let Some(year) = &filter.year {
            qb.push(" AND strftime('%Y', e.created) = ");
            qb.push_bind(year.clone());
        }
        if let Some(series) = filter.series {
            qb.push(" AND e.series_id = ");
            qb.push_bind(series);
        }

        if searching {
            qb.push(" ORDER BY bm25(search_index)");
        } else {
            qb.push(" ORDER BY e.created DESC, e.id DESC");
        }
        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        match qb.build_query_as::<ListRow>().fetch_all(&self.pool).await {
            Ok(rows) => Ok(rows),
            // FTS5 rejects malformed query syntax; show no matches instead
            Err(sqlx::Error::Database(e)) if searching => {
                warn!("search query rejected: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Tag screen: prefix match, shortest tags first.
    async fn list_tags(&self, filter: &ListFilter) -> anyhow::Result<Vec<ListRow>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT t.id AS id, t.tag AS label, '' AS slug, '' AS created, \
             '' AS tag_summary, NULL AS is_draft, '' AS extra FROM tags t",
        );

        match filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                qb.push(" WHERE t.tag LIKE ");
                qb.push_bind(format!("{}%", q));
                qb.push(" ORDER BY length(t.tag), t.tag");
            }
            None => {
                qb.push(" ORDER BY t.tag");
            }
        }
        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        Ok(qb.build_query_as::<ListRow>().fetch_all(&self.pool).await?)
    }

    async fn list_comments(&self, filter: &ListFilter) -> anyhow::Result<Vec<ListRow>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT c.id AS id, c.name || ': ' || substr(c.body, 1, 60) AS label, \
             '' AS slug, c.created AS created, '' AS tag_summary, NULL AS is_draft, \
             c.spam_status AS extra FROM comments c WHERE 1=1",
        );

        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", q);
            qb.push(" AND (c.body LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR c.name LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR c.url LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR c.email LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if let Some(visible) = filter.visible {
            qb.push(" AND c.visible_on_site = ");
            qb.push_bind(visible);
        }
        if let Some(spam) = &filter.spam {
            qb.push(" AND c.spam_status = ");
            qb.push_bind(spam.clone());
        }
        if let Some(year) = &filter.year {
            qb.push(" AND strftime('%Y', c.created) = ");
            qb.push_bind(year.clone());
        }

        qb.push(" ORDER BY c.created DESC, c.id DESC LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        Ok(qb.build_query_as::<ListRow>().fetch_all(&self.pool).await?)
    }

    async fn list_series(&self, filter: &ListFilter) -> anyhow::Result<Vec<ListRow>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT s.id AS id, s.title AS label, s.slug AS slug, '' AS created, \
             '' AS tag_summary, NULL AS is_draft, '' AS extra FROM series s \
             ORDER BY s.title LIMIT ",
        );
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        Ok(qb.build_query_as::<ListRow>().fetch_all(&self.pool).await?)
    }

    // Quoteback CRUD -----------------------------------------------------

    pub async fn get_quoteback(&self, id: i64) -> anyhow::Result<Option<Quoteback>> {
        let quoteback = sqlx::query_as::<_, Quoteback>("SELECT * FROM quotebacks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quoteback)
    }

    /// Insert a quoteback; the id field on the argument is ignored.
    pub async fn insert_quoteback(&self, q: &Quoteback) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO quotebacks (quote_text, commentary, title, slug, source_url,
                page_title, author, favicon, created, is_draft, series_id,
                card_image, metadata, import_ref)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&q.quote_text)
        .bind(&q.commentary)
        .bind(&q.title)
        .bind(&q.slug)
        .bind(&q.source_url)
        .bind(&q.page_title)
        .bind(&q.author)
        .bind(&q.favicon)
        .bind(&q.created)
        .bind(q.is_draft)
        .bind(q.series_id)
        .bind(&q.card_image)
        .bind(&q.metadata)
        .bind(&q.import_ref)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update_quoteback(&self, q: &Quoteback) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE quotebacks
            SET quote_text = ?, commentary = ?, title = ?, slug = ?, source_url = ?,
                page_title = ?, author = ?, favicon = ?, created = ?, is_draft = ?,
                series_id = ?, card_image = ?, metadata = ?
            WHERE id = ?
            "#,
        )
        .bind(&q.quote_text)
        .bind(&q.commentary)
        .bind(&q.title)
        .bind(&q.slug)
        .bind(&q.source_url)
        .bind(&q.page_title)
        .bind(&q.author)
        .bind(&q.favicon)
        .bind(&q.created)
        .bind(q.is_draft)
        .bind(q.series_id)
        .bind(&q.card_image)
        .bind(&q.metadata)
        .bind(q.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Search index -------------------------------------------------------

    /// Replace the search document for a record.
    pub async fn update_search_index(
        &self,
        kind: ContentKind,
        content_id: i64,
        body: &str,
    ) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM search_index WHERE kind = ? AND content_id = ?")
            .bind(kind.slug())
            .bind(content_id)
            .execute(&self.pool)
            .await?;

        sqlx::query("INSERT INTO search_index (kind, content_id, body) VALUES (?, ?, ?)")
            .bind(kind.slug())
            .bind(content_id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Tags ---------------------------------------------------------------

    /// Replace a record's tag set, creating unseen tags along the way.
    pub async fn set_tags(
        &self,
        kind: ContentKind,
        content_id: i64,
        tags: &[String],
    ) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM content_tags WHERE kind = ? AND content_id = ?")
            .bind(kind.slug())
            .bind(content_id)
            .execute(&self.pool)
            .await?;

        for name in tags {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }

            sqlx::query("INSERT INTO tags (tag) VALUES (?) ON CONFLICT(tag) DO NOTHING")
                .bind(&name)
                .execute(&self.pool)
                .await?;

            let (tag_id,): (i64,) = sqlx::query_as("SELECT id FROM tags WHERE tag = ?")
                .bind(&name)
                .fetch_one(&self.pool)
                .await?;

            sqlx::query(
                "INSERT INTO content_tags (kind, content_id, tag_id) VALUES (?, ?, ?) \
                 ON CONFLICT(kind, content_id, tag_id) DO NOTHING",
            )
            .bind(kind.slug())
            .bind(content_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn get_tags(&self, kind: ContentKind, content_id: i64) -> anyhow::Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT t.tag FROM content_tags ct JOIN tags t ON t.id = ct.tag_id \
             WHERE ct.kind = ? AND ct.content_id = ? ORDER BY t.tag",
        )
        .bind(kind.slug())
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(tag,)| tag).collect())
    }

    /// Prefix lookup for tag autocomplete, shortest matches first.
    pub async fn search_tags(&self, prefix: &str, limit: i64) -> anyhow::Result<Vec<Tag>> {
        let prefix = prefix.trim();
        let tags = if prefix.is_empty() {
            sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY tag LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, Tag>(
                "SELECT * FROM tags WHERE tag LIKE ? ORDER BY length(tag), tag LIMIT ?",
            )
            .bind(format!("{}%", prefix))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(tags)
    }

    // Series -------------------------------------------------------------

    pub async fn all_series(&self) -> anyhow::Result<Vec<Series>> {
        let series = sqlx::query_as::<_, Series>("SELECT * FROM series ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(series)
    }

    pub async fn insert_series(&self, title: &str, slug: &str) -> anyhow::Result<i64> {
        let result = sqlx::query("INSERT INTO series (title, slug) VALUES (?, ?)")
            .bind(title)
            .bind(slug)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    // Other content kinds: rows arrive from the publishing side; these
    // writers keep the admin's list screens and search index exercised.

    pub async fn insert_entry(
        &self,
        title: &str,
        slug: &str,
        body: &str,
        created: &str,
        is_draft: bool,
        series_id: Option<i64>,
    ) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO entries (title, slug, body, created, is_draft, series_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(slug)
        .bind(body)
        .bind(created)
        .bind(is_draft)
        .bind(series_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.update_search_index(ContentKind::Entries, id, &format!("{} {}", title, body))
            .await?;
        Ok(id)
    }

    pub async fn insert_quotation(
        &self,
        quotation: &str,
        source: &str,
        source_url: &str,
        slug: &str,
        created: &str,
        is_draft: bool,
    ) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO quotations (quotation, source, source_url, slug, created, is_draft) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(quotation)
        .bind(source)
        .bind(source_url)
        .bind(slug)
        .bind(created)
        .bind(is_draft)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.update_search_index(
            ContentKind::Quotations,
            id,
            &format!("{} {}", quotation, source),
        )
        .await?;
        Ok(id)
    }

    pub async fn insert_blogmark(
        &self,
        link_url: &str,
        link_title: &str,
        commentary: &str,
        slug: &str,
        created: &str,
        is_draft: bool,
    ) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO blogmarks (link_url, link_title, commentary, slug, created, is_draft) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(link_url)
        .bind(link_title)
        .bind(commentary)
        .bind(slug)
        .bind(created)
        .bind(is_draft)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.update_search_index(
            ContentKind::Blogmarks,
            id,
            &format!("{} {}", link_title, commentary),
        )
        .await?;
        Ok(id)
    }

    pub async fn insert_note(
        &self,
        body: &str,
        slug: &str,
        created: &str,
        is_draft: bool,
    ) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO notes (body, slug, created, is_draft) VALUES (?, ?, ?, ?)",
        )
        .bind(body)
        .bind(slug)
        .bind(created)
        .bind(is_draft)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.update_search_index(ContentKind::Notes, id, body).await?;
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_comment(
        &self,
        content_kind: ContentKind,
        content_id: i64,
        name: &str,
        body: &str,
        created: &str,
        visible_on_site: bool,
        spam_status: &str,
    ) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO comments (content_kind, content_id, name, body, created, \
             visible_on_site, spam_status) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(content_kind.slug())
        .bind(content_id)
        .bind(name)
        .bind(body)
        .bind(created)
        .bind(visible_on_site)
        .bind(spam_status)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
