//! Admin desk routes: dashboard, per-kind list screens (search and filters
//! declared per screen, not hard-wired into handlers), and the quoteback
//! form whose save path runs the metadata fetch pipeline.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use url::Url;

use crate::db::{ContentKind, Database, ListFilter, Quoteback, Series};
use crate::fetch::{FaviconFile, MetadataFetcher, PageMetadata};

pub struct AppState {
    pub db: Arc<Database>,
    pub fetcher: Arc<MetadataFetcher>,
    pub media_dir: PathBuf,
    pub page_size: i64,
}

/// How a screen's search box behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    None,
    /// Websearch-style free text against the search index, ranked
    Fts,
    /// Prefix match ordered by tag length
    TagPrefix,
    /// Substring match over comment body/name/url/email
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenFilter {
    Draft,
    Year,
    Series,
    Visible,
    Spam,
}

/// Declarative list-screen configuration: one entry per content kind drives
/// the single generic list handler and template.
pub struct Screen {
    pub kind: ContentKind,
    pub title: &'static str,
    pub search: SearchMode,
    pub filters: &'static [ScreenFilter],
    /// Header for the kind-specific column; empty when unused
    pub extra_header: &'static str,
}

pub const SCREENS: &[Screen] = &[
    Screen {
        kind: ContentKind::Entries,
        title: "Entries",
        search: SearchMode::Fts,
        filters: &[ScreenFilter::Draft, ScreenFilter::Year, ScreenFilter::Series],
        extra_header: "",
    },
    Screen {
        kind: ContentKind::Quotations,
        title: "Quotations",
        search: SearchMode::Fts,
        filters: &[ScreenFilter::Draft, ScreenFilter::Year],
        extra_header: "Source",
    },
    Screen {
        kind: ContentKind::Blogmarks,
        title: "Blogmarks",
        search: SearchMode::Fts,
        filters: &[ScreenFilter::Draft, ScreenFilter::Year],
        extra_header: "Link",
    },
    Screen {
        kind: ContentKind::Notes,
        title: "Notes",
        search: SearchMode::Fts,
        filters: &[ScreenFilter::Draft, ScreenFilter::Year],
        extra_header: "",
    },
    Screen {
        kind: ContentKind::Quotebacks,
        title: "Quotebacks",
        search: SearchMode::Fts,
        filters: &[ScreenFilter::Draft, ScreenFilter::Year],
        extra_header: "Source domain",
    },
    Screen {
        kind: ContentKind::Tags,
        title: "Tags",
        search: SearchMode::TagPrefix,
        filters: &[],
        extra_header: "",
    },
    Screen {
        kind: ContentKind::Comments,
        title: "Comments",
        search: SearchMode::Text,
        filters: &[ScreenFilter::Visible, ScreenFilter::Spam, ScreenFilter::Year],
        extra_header: "Spam status",
    },
    Screen {
        kind: ContentKind::Series,
        title: "Series",
        search: SearchMode::None,
        filters: &[],
        extra_header: "",
    },
];

pub fn screen_for(kind: ContentKind) -> &'static Screen {
    SCREENS
        .iter()
        .find(|s| s.kind == kind)
        .expect("every kind has a screen")
}

// Template structs
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub panels: Vec<Panel>,
}

pub struct Panel {
    pub title: &'static str,
    pub slug: &'static str,
    pub count: i64,
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub title: &'static str,
    pub kind: &'static str,
    pub extra_header: &'static str,
    pub search_enabled: bool,
    pub show_draft: bool,
    pub show_year: bool,
    pub show_series: bool,
    pub show_visible: bool,
    pub show_spam: bool,
    pub can_create: bool,
    pub q: String,
    pub draft: String,
    pub year: String,
    pub series: String,
    pub visible: String,
    pub spam: String,
    pub rows: Vec<RowView>,
    pub prev_url: String,
    pub next_url: String,
}

pub struct RowView {
    pub label: String,
    pub slug: String,
    pub created: String,
    pub tag_summary: String,
    pub draft: String,
    pub extra: String,
    pub edit_url: String,
}

#[derive(Template)]
#[template(path = "quoteback_form.html")]
pub struct QuotebackFormTemplate {
    pub heading: String,
    pub action: String,
    pub form: QuotebackFormView,
    pub series: Vec<SeriesOption>,
}

pub struct SeriesOption {
    pub id: i64,
    pub title: String,
    pub selected: bool,
}

pub struct QuotebackFormView {
    pub quote_text: String,
    pub commentary: String,
    pub title: String,
    pub slug: String,
    pub source_url: String,
    pub fetch_metadata: bool,
    pub page_title: String,
    pub author: String,
    pub favicon: String,
    pub created: String,
    pub is_draft: bool,
    pub card_image: String,
    pub metadata: String,
    pub tags: String,
    pub import_ref: String,
}

impl QuotebackFormView {
    fn empty() -> Self {
        Self {
            quote_text: String::new(),
            commentary: String::new(),
            title: String::new(),
            slug: String::new(),
            source_url: String::new(),
            fetch_metadata: true,
            page_title: String::new(),
            author: String::new(),
            favicon: String::new(),
            created: String::new(),
            is_draft: false,
            card_image: String::new(),
            metadata: String::new(),
            tags: String::new(),
            import_ref: String::new(),
        }
    }

    fn from_record(record: &Quoteback, tags: &[String]) -> Self {
        Self {
            quote_text: record.quote_text.clone(),
            commentary: record.commentary.clone(),
            title: record.title.clone(),
            slug: record.slug.clone(),
            source_url: record.source_url.clone(),
            fetch_metadata: true,
            page_title: record.page_title.clone(),
            author: record.author.clone(),
            favicon: record.favicon.clone().unwrap_or_default(),
            created: record.created.clone(),
            is_draft: record.is_draft,
            card_image: record.card_image.clone(),
            metadata: record.metadata.clone(),
            tags: tags.join(", "),
            import_ref: record.import_ref.clone().unwrap_or_default(),
        }
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Custom error type
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", self.0),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let media = ServeDir::new(&state.media_dir);
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
        .route("/tags/search", get(tags_search))
        .route("/quotebacks/new", get(quoteback_new).post(quoteback_create))
        .route(
            "/quotebacks/:id/edit",
            get(quoteback_edit).post(quoteback_update),
        )
        .route("/:kind", get(list_screen))
        .nest_service("/media", media)
        .with_state(state)
}

// Route handlers
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let mut panels = Vec::new();
    for screen in SCREENS {
        let count = state.db.count(screen.kind).await?;
        panels.push(Panel {
            title: screen.title,
            slug: screen.kind.slug(),
            count,
        });
    }

    Ok(HtmlTemplate(DashboardTemplate { panels }))
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub draft: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub visible: Option<String>,
    #[serde(default)]
    pub spam: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

fn parse_flag(value: &Option<String>) -> Option<bool> {
    match value.as_deref() {
        Some("1") | Some("true") => Some(true),
        Some("0") | Some("false") => Some(false),
        _ => None,
    }
}

fn parse_id(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.parse().ok())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub async fn list_screen(
    State(state): State<Arc<AppState>>,
    Path(kind_slug): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let Some(kind) = ContentKind::from_slug(&kind_slug) else {
        return Ok((StatusCode::NOT_FOUND, "No such screen").into_response());
    };
    let screen = screen_for(kind);

    let page = parse_id(&query.page).unwrap_or(1).max(1);

    // Only the filters a screen declares take effect
    let mut filter = ListFilter {
        limit: state.page_size + 1,
        offset: (page - 1) * state.page_size,
        ..Default::default()
    };
    if screen.search != SearchMode::None {
        filter.q = non_blank(&query.q);
    }
    for f in screen.filters {
        match f {
            ScreenFilter::Draft => filter.draft = parse_flag(&query.draft),
            ScreenFilter::Year => filter.year = non_blank(&query.year),
            ScreenFilter::Series => filter.series = parse_id(&query.series),
            ScreenFilter::Visible => filter.visible = parse_flag(&query.visible),
            ScreenFilter::Spam => filter.spam = non_blank(&query.spam),
        }
    }

    let mut db_rows = state.db.list(kind, &filter).await?;
    let has_more = db_rows.len() as i64 > state.page_size;
    db_rows.truncate(state.page_size as usize);

    let rows = db_rows
        .into_iter()
        .map(|row| {
            let extra = if kind == ContentKind::Quotebacks {
                source_domain(&row.extra)
            } else {
                row.extra
            };
            RowView {
                label: row.label,
                slug: row.slug,
                created: row.created.chars().take(10).collect(),
                tag_summary: row.tag_summary,
                draft: match row.is_draft {
                    Some(true) => "draft".to_string(),
                    Some(false) => "live".to_string(),
                    None => String::new(),
                },
                extra,
                edit_url: if kind == ContentKind::Quotebacks {
                    format!("/quotebacks/{}/edit", row.id)
                } else {
                    String::new()
                },
            }
        })
        .collect();

    let url_for_page = |p: i64| list_url(screen.kind.slug(), &query, p);

    Ok(HtmlTemplate(ListTemplate {
        title: screen.title,
        kind: screen.kind.slug(),
        extra_header: screen.extra_header,
        search_enabled: screen.search != SearchMode::None,
        show_draft: screen.filters.contains(&ScreenFilter::Draft),
        show_year: screen.filters.contains(&ScreenFilter::Year),
        show_series: screen.filters.contains(&ScreenFilter::Series),
        show_visible: screen.filters.contains(&ScreenFilter::Visible),
        show_spam: screen.filters.contains(&ScreenFilter::Spam),
        can_create: kind == ContentKind::Quotebacks,
        q: query.q.clone().unwrap_or_default(),
        draft: query.draft.clone().unwrap_or_default(),
        year: query.year.clone().unwrap_or_default(),
        series: query.series.clone().unwrap_or_default(),
        visible: query.visible.clone().unwrap_or_default(),
        spam: query.spam.clone().unwrap_or_default(),
        rows,
        prev_url: if page > 1 { url_for_page(page - 1) } else { String::new() },
        next_url: if has_more { url_for_page(page + 1) } else { String::new() },
    })
    .into_response())
}

fn list_url(kind: &str, query: &ListQuery, page: i64) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in [
        ("q", &query.q),
        ("draft", &query.draft),
        ("year", &query.year),
        ("series", &query.series),
        ("visible", &query.visible),
        ("spam", &query.spam),
    ] {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            serializer.append_pair(key, v);
        }
    }
    serializer.append_pair("page", &page.to_string());
    format!("/{}?{}", kind, serializer.finish())
}

fn source_domain(source_url: &str) -> String {
    Url::parse(source_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[derive(Deserialize)]
pub struct TagSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct TagSuggestion {
    pub id: i64,
    pub tag: String,
}

pub async fn tags_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TagSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tags = state
        .db
        .search_tags(query.q.as_deref().unwrap_or_default(), 20)
        .await?;

    let suggestions: Vec<TagSuggestion> = tags
        .into_iter()
        .map(|t| TagSuggestion { id: t.id, tag: t.tag })
        .collect();

    Ok(axum::Json(suggestions))
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}

// Quoteback form --------------------------------------------------------

#[derive(Deserialize, Default)]
pub struct QuotebackForm {
    #[serde(default)]
    pub quote_text: String,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub source_url: String,
    /// Checkbox: present in the form body only when ticked
    #[serde(default)]
    pub fetch_metadata: Option<String>,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub is_draft: Option<String>,
    #[serde(default)]
    pub series_id: String,
    #[serde(default)]
    pub card_image: String,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub tags: String,
}

pub async fn quoteback_new(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let series = series_options(&state, None).await?;
    Ok(HtmlTemplate(QuotebackFormTemplate {
        heading: "New quoteback".to_string(),
        action: "/quotebacks/new".to_string(),
        form: QuotebackFormView::empty(),
        series,
    }))
}

pub async fn quoteback_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QuotebackForm>,
) -> Result<impl IntoResponse, AppError> {
    save_quoteback(&state, None, form).await?;
    Ok(Redirect::to("/quotebacks"))
}

pub async fn quoteback_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let Some(record) = state.db.get_quoteback(id).await? else {
        return Ok((StatusCode::NOT_FOUND, "No such quoteback").into_response());
    };
    let tags = state.db.get_tags(ContentKind::Quotebacks, id).await?;
    let series = series_options(&state, record.series_id).await?;

    Ok(HtmlTemplate(QuotebackFormTemplate {
        heading: format!("Edit quoteback #{}", id),
        action: format!("/quotebacks/{}/edit", id),
        form: QuotebackFormView::from_record(&record, &tags),
        series,
    })
    .into_response())
}

pub async fn quoteback_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<QuotebackForm>,
) -> Result<Response, AppError> {
    let Some(existing) = state.db.get_quoteback(id).await? else {
        return Ok((StatusCode::NOT_FOUND, "No such quoteback").into_response());
    };
    save_quoteback(&state, Some(existing), form).await?;
    Ok(Redirect::to("/quotebacks").into_response())
}

async fn series_options(
    state: &AppState,
    selected: Option<i64>,
) -> anyhow::Result<Vec<SeriesOption>> {
    let series = state.db.all_series().await?;
    Ok(series
        .into_iter()
        .map(|s: Series| SeriesOption {
            selected: Some(s.id) == selected,
            id: s.id,
            title: s.title,
        })
        .collect())
}

/// Whether a save should hit the network at all: the fetch toggle must be on
/// and a source URL present, and the record must be new, or still missing a
/// page title, or have had its source URL edited.
pub fn should_fetch_metadata(
    fetch_enabled: bool,
    record: &Quoteback,
    is_new: bool,
    form_changed: bool,
    source_url_changed: bool,
) -> bool {
    fetch_enabled
        && !record.source_url.is_empty()
        && (is_new
            || record.page_title.is_empty()
            || (form_changed && source_url_changed))
}

/// Fill-if-blank merge of fetched metadata into the record. The favicon is
/// handled separately since it involves a second download.
pub fn apply_metadata(record: &mut Quoteback, metadata: &PageMetadata) {
    if record.page_title.is_empty() {
        record.page_title = metadata.title.clone();
    }

    if record.author.is_empty() && !metadata.author.is_empty() {
        record.author = metadata.author.clone();
    }
}

fn checkbox(value: &Option<String>) -> bool {
    value.is_some()
}

pub fn tag_list(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn slugify(value: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in value.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn record_from_form(existing: Option<&Quoteback>, form: &QuotebackForm) -> Quoteback {
    Quoteback {
        id: existing.map(|e| e.id).unwrap_or(0),
        quote_text: form.quote_text.clone(),
        commentary: form.commentary.clone(),
        title: form.title.clone(),
        slug: form.slug.trim().to_string(),
        source_url: form.source_url.trim().to_string(),
        page_title: form.page_title.trim().to_string(),
        author: form.author.trim().to_string(),
        favicon: existing.and_then(|e| e.favicon.clone()),
        created: if form.created.trim().is_empty() {
            existing
                .map(|e| e.created.clone())
                .unwrap_or_else(|| Utc::now().to_rfc3339())
        } else {
            form.created.trim().to_string()
        },
        is_draft: checkbox(&form.is_draft),
        series_id: form.series_id.trim().parse().ok(),
        card_image: form.card_image.clone(),
        metadata: form.metadata.clone(),
        import_ref: existing.and_then(|e| e.import_ref.clone()),
    }
}

fn record_differs(record: &Quoteback, existing: &Quoteback) -> bool {
    record.quote_text != existing.quote_text
        || record.commentary != existing.commentary
        || record.title != existing.title
        || record.slug != existing.slug
        || record.source_url != existing.source_url
        || record.page_title != existing.page_title
        || record.author != existing.author
        || record.is_draft != existing.is_draft
        || record.series_id != existing.series_id
        || record.card_image != existing.card_image
        || record.metadata != existing.metadata
}

/// Build the record a save would persist: decide whether to fetch, merge
/// fill-if-blank, attach the favicon, prepopulate a blank slug. Does not
/// touch the database, so callers can inspect the merged record before
/// committing it.
pub async fn prepare_quoteback(
    state: &AppState,
    existing: Option<&Quoteback>,
    form: &QuotebackForm,
) -> anyhow::Result<Quoteback> {
    let is_new = existing.is_none();
    let fetch_enabled = checkbox(&form.fetch_metadata);

    let mut record = record_from_form(existing, form);

    let form_changed = existing
        .map(|e| record_differs(&record, e))
        .unwrap_or(true);
    let source_url_changed = existing
        .map(|e| e.source_url != record.source_url)
        .unwrap_or(false);

    if should_fetch_metadata(fetch_enabled, &record, is_new, form_changed, source_url_changed) {
        let metadata = state.fetcher.fetch_page_metadata(&record.source_url).await;
        apply_metadata(&mut record, &metadata);

        if !metadata.favicon_url.is_empty() && record.favicon.is_none() {
            if let Some(favicon) = state.fetcher.download_favicon(&metadata.favicon_url).await {
                record.favicon = Some(store_favicon(&state.media_dir, &favicon).await?);
            }
        }
    }

    if record.slug.is_empty() {
        let basis = if record.page_title.is_empty() {
            &record.title
        } else {
            &record.page_title
        };
        record.slug = slugify(basis);
    }

    Ok(record)
}

/// The admin form's save path: prepare the record, then persist it along
/// with its tags and search document. The save itself always succeeds even
/// when every fetch soft-fails.
pub async fn save_quoteback(
    state: &AppState,
    existing: Option<Quoteback>,
    form: QuotebackForm,
) -> anyhow::Result<i64> {
    let is_new = existing.is_none();
    let record = prepare_quoteback(state, existing.as_ref(), &form).await?;

    let id = if is_new {
        state.db.insert_quoteback(&record).await?
    } else {
        state.db.update_quoteback(&record).await?;
        record.id
    };

    let tags = tag_list(&form.tags);
    state.db.set_tags(ContentKind::Quotebacks, id, &tags).await?;

    let document = format!(
        "{} {} {} {} {}",
        record.quote_text,
        record.page_title,
        record.author,
        record.commentary,
        tags.join(" ")
    );
    state
        .db
        .update_search_index(ContentKind::Quotebacks, id, &document)
        .await?;

    Ok(id)
}

/// Write a favicon under `{media_dir}/favicons/`, renaming on collision,
/// and return the stored path relative to the media dir.
async fn store_favicon(media_dir: &FsPath, favicon: &FaviconFile) -> anyhow::Result<String> {
    let dir = media_dir.join("favicons");
    tokio::fs::create_dir_all(&dir).await?;

    let filename = available_name(&dir, &favicon.filename).await?;
    tokio::fs::write(dir.join(&filename), &favicon.bytes).await?;

    Ok(format!("favicons/{}", filename))
}

async fn available_name(dir: &FsPath, filename: &str) -> anyhow::Result<String> {
    if !tokio::fs::try_exists(dir.join(filename)).await? {
        return Ok(filename.to_string());
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), format!(".{}", ext)),
        None => (filename.to_string(), String::new()),
    };

    let mut n = 1;
    loop {
        let candidate = format!("{}-{}{}", stem, n, ext);
        if !tokio::fs::try_exists(dir.join(&candidate)).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn blank_quoteback() -> Quoteback {
        Quoteback {
            id: 0,
            quote_text: String::new(),
            commentary: String::new(),
            title: String::new(),
            slug: String::new(),
            source_url: "https://example.com/post".to_string(),
            page_title: String::new(),
            author: String::new(),
            favicon: None,
            created: Utc::now().to_rfc3339(),
            is_draft: false,
            series_id: None,
            card_image: String::new(),
            metadata: String::new(),
            import_ref: None,
        }
    }

    mod should_fetch_tests {
        use super::*;

        #[test]
        fn test_new_record_fetches() {
            let record = blank_quoteback();
            assert!(should_fetch_metadata(true, &record, true, true, false));
        }

        #[test]
        fn test_missing_page_title_fetches() {
            let record = blank_quoteback();
            assert!(should_fetch_metadata(true, &record, false, false, false));
        }

        #[test]
        fn test_changed_url_fetches() {
            let mut record = blank_quoteback();
            record.page_title = "Existing".to_string();
            assert!(should_fetch_metadata(true, &record, false, true, true));
        }

        #[test]
        fn test_unchanged_url_with_title_does_not_fetch() {
            let mut record = blank_quoteback();
            record.page_title = "Existing".to_string();
            assert!(!should_fetch_metadata(true, &record, false, true, false));
        }

        #[test]
        fn test_url_changed_but_form_unchanged_does_not_fetch() {
            // The conjunction matters: a "changed" URL only counts when the
            // form as a whole reports a change
            let mut record = blank_quoteback();
            record.page_title = "Existing".to_string();
            assert!(!should_fetch_metadata(true, &record, false, false, true));
        }

        #[test]
        fn test_disabled_toggle_never_fetches() {
            let record = blank_quoteback();
            assert!(!should_fetch_metadata(false, &record, true, true, true));
        }

        #[test]
        fn test_missing_source_url_never_fetches() {
            let mut record = blank_quoteback();
            record.source_url = String::new();
            assert!(!should_fetch_metadata(true, &record, true, true, false));
        }
    }

    mod merge_tests {
        use super::*;

        fn metadata() -> PageMetadata {
            PageMetadata {
                title: "Fetched Title".to_string(),
                author: "Fetched Author".to_string(),
                favicon_url: "https://example.com/favicon.ico".to_string(),
            }
        }

        #[test]
        fn test_blank_fields_are_filled() {
            let mut record = blank_quoteback();
            apply_metadata(&mut record, &metadata());
            assert_eq!(record.page_title, "Fetched Title");
            assert_eq!(record.author, "Fetched Author");
        }

        #[test]
        fn test_existing_page_title_is_kept() {
            let mut record = blank_quoteback();
            record.page_title = "Existing".to_string();
            apply_metadata(&mut record, &metadata());
            assert_eq!(record.page_title, "Existing");
        }

        #[test]
        fn test_existing_author_is_kept() {
            let mut record = blank_quoteback();
            record.author = "Original Author".to_string();
            apply_metadata(&mut record, &metadata());
            assert_eq!(record.author, "Original Author");
        }

        #[test]
        fn test_empty_fetched_author_does_not_overwrite() {
            let mut record = blank_quoteback();
            let mut meta = metadata();
            meta.author = String::new();
            apply_metadata(&mut record, &meta);
            assert_eq!(record.author, "");
        }
    }

    mod helper_tests {
        use super::*;

        #[test]
        fn test_slugify() {
            assert_eq!(slugify("Hello, World!"), "hello-world");
            assert_eq!(slugify("  Already--dashed  "), "already-dashed");
            assert_eq!(slugify(""), "");
        }

        #[test]
        fn test_tag_list_parsing() {
            assert_eq!(
                tag_list("rust, blogging , , web"),
                vec!["rust", "blogging", "web"]
            );
            assert!(tag_list("").is_empty());
        }

        #[test]
        fn test_source_domain() {
            assert_eq!(source_domain("https://x.com/a/b"), "x.com");
            assert_eq!(source_domain("not a url"), "");
        }

        #[tokio::test]
        async fn test_available_name_suffixes_on_collision() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("favicon.ico"), b"x").unwrap();
            std::fs::write(dir.path().join("favicon-1.ico"), b"x").unwrap();

            let name = available_name(dir.path(), "favicon.ico").await.unwrap();
            assert_eq!(name, "favicon-2.ico");

            let fresh = available_name(dir.path(), "other.png").await.unwrap();
            assert_eq!(fresh, "other.png");
        }
    }

    mod route_tests {
        use super::*;

        async fn create_test_state() -> (Arc<AppState>, tempfile::TempDir) {
            let db = Database::new("sqlite::memory:").await.unwrap();
            db.initialize().await.unwrap();

            let media = tempfile::tempdir().unwrap();
            let state = Arc::new(AppState {
                db: Arc::new(db),
                fetcher: Arc::new(MetadataFetcher::new(&FetchConfig::default())),
                media_dir: media.path().to_path_buf(),
                page_size: 25,
            });
            (state, media)
        }

        async fn body_string(response: Response) -> String {
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            String::from_utf8(bytes.to_vec()).unwrap()
        }

        #[tokio::test]
        async fn test_health_endpoint() {
            let (state, _media) = create_test_state().await;
            let app = router(state);

            let response = app
                .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn test_dashboard_lists_every_screen() {
            let (state, _media) = create_test_state().await;
            let app = router(state);

            let response = app
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_string(response).await;
            for screen in SCREENS {
                assert!(body.contains(screen.title), "missing {}", screen.title);
            }
        }

        #[tokio::test]
        async fn test_list_screen_renders_rows() {
            let (state, _media) = create_test_state().await;
            state
                .db
                .insert_entry("Visible Entry", "visible", "body", &Utc::now().to_rfc3339(), false, None)
                .await
                .unwrap();
            let app = router(state);

            let response = app
                .oneshot(Request::builder().uri("/entries").body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_string(response).await;
            assert!(body.contains("Visible Entry"));
        }

        #[tokio::test]
        async fn test_unknown_kind_is_404() {
            let (state, _media) = create_test_state().await;
            let app = router(state);

            let response = app
                .oneshot(Request::builder().uri("/widgets").body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        #[tokio::test]
        async fn test_new_quoteback_form_renders() {
            let (state, _media) = create_test_state().await;
            let app = router(state);

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/quotebacks/new")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_string(response).await;
            assert!(body.contains("fetch_metadata"));
            assert!(body.contains("source_url"));
        }

        #[tokio::test]
        async fn test_edit_missing_quoteback_is_404() {
            let (state, _media) = create_test_state().await;
            let app = router(state);

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/quotebacks/99/edit")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        #[tokio::test]
        async fn test_tags_search_returns_json() {
            let (state, _media) = create_test_state().await;
            let id = state.db.insert_quoteback(&blank_quoteback()).await.unwrap();
            state
                .db
                .set_tags(
                    ContentKind::Quotebacks,
                    id,
                    &["py".to_string(), "python".to_string()],
                )
                .await
                .unwrap();
            let app = router(state);

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/tags/search?q=py")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_string(response).await;
            // Shortest match first
            let py_pos = body.find("\"py\"").unwrap();
            let python_pos = body.find("\"python\"").unwrap();
            assert!(py_pos < python_pos);
        }

        #[tokio::test]
        async fn test_draft_filter_applies_on_declared_screens() {
            let (state, _media) = create_test_state().await;
            let now = Utc::now().to_rfc3339();
            state
                .db
                .insert_entry("Live One", "live", "body", &now, false, None)
                .await
                .unwrap();
            state
                .db
                .insert_entry("Draft One", "draft", "body", &now, true, None)
                .await
                .unwrap();
            let app = router(state);

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/entries?draft=1")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            let body = body_string(response).await;
            assert!(body.contains("Draft One"));
            assert!(!body.contains("Live One"));
        }
    }
}
