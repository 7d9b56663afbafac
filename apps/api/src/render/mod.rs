//! HTML → PDF rendering through a headless Chrome session.
//!
//! One browser per request, no pooling. The browser process and the temporary
//! HTML file are owned by `render_blocking`, so both are released on every
//! exit path when they drop.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use thiserror::Error;
use tracing::{debug, info};

pub mod handlers;

const CONTENT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const FONT_SETTLE_DELAY: Duration = Duration::from_millis(500);

// A4 in inches.
const PAGE_WIDTH_IN: f64 = 8.27;
const PAGE_HEIGHT_IN: f64 = 11.69;
const MARGIN_IN: f64 = 0.2;
const SCALE: f64 = 0.98;

const BROWSER_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
];

/// Install locations probed after the configured override.
const WELL_KNOWN_BROWSER_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files\\Google\\Chrome\\chrome.exe",
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no Chrome executable found")]
    BrowserNotFound,

    #[error("browser error: {0}")]
    Browser(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<anyhow::Error> for RenderError {
    fn from(e: anyhow::Error) -> Self {
        RenderError::Browser(format!("{e:#}"))
    }
}

/// Turns a complete HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Returns the first existing path: the override, then the well-known list.
pub fn find_browser(override_path: Option<&str>) -> Option<PathBuf> {
    override_path
        .into_iter()
        .chain(WELL_KNOWN_BROWSER_PATHS.iter().copied())
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

/// Fixed print settings: A4, 0.2in margins, 0.98 scale, backgrounds on.
pub fn pdf_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        landscape: Some(false),
        display_header_footer: Some(false),
        print_background: Some(true),
        scale: Some(SCALE),
        paper_width: Some(PAGE_WIDTH_IN),
        paper_height: Some(PAGE_HEIGHT_IN),
        margin_top: Some(MARGIN_IN),
        margin_bottom: Some(MARGIN_IN),
        margin_left: Some(MARGIN_IN),
        margin_right: Some(MARGIN_IN),
        ..Default::default()
    }
}

#[derive(Debug, Clone)]
pub struct ChromePdfRenderer {
    browser_override: Option<String>,
}

impl ChromePdfRenderer {
    pub fn new(browser_override: Option<String>) -> Self {
        Self { browser_override }
    }
}

#[async_trait]
impl PdfRenderer for ChromePdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let browser_path =
            find_browser(self.browser_override.as_deref()).ok_or(RenderError::BrowserNotFound)?;
        info!("Rendering PDF with {}", browser_path.display());

        // headless_chrome is synchronous
        let html = html.to_string();
        tokio::task::spawn_blocking(move || render_blocking(&browser_path, &html)).await?
    }
}

fn render_blocking(browser_path: &Path, html: &str) -> Result<Vec<u8>, RenderError> {
    let mut page = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".html")
        .tempfile()?;
    page.write_all(html.as_bytes())?;
    page.flush()?;
    let url = format!("file://{}", page.path().display());

    let options = LaunchOptions::default_builder()
        .path(Some(browser_path.to_path_buf()))
        .headless(true)
        .sandbox(false)
        .args(BROWSER_ARGS.iter().map(OsStr::new).collect())
        .build()
        .map_err(|e| RenderError::Browser(format!("invalid launch options: {e}")))?;

    let browser = Browser::new(options)?;
    let tab = browser.new_tab()?;
    tab.set_default_timeout(CONTENT_LOAD_TIMEOUT);

    tab.navigate_to(&url)?.wait_until_navigated()?;
    tab.evaluate("document.fonts.ready.then(() => true)", true)?;
    std::thread::sleep(FONT_SETTLE_DELAY);

    let pdf = tab.print_to_pdf(Some(pdf_options()))?;
    debug!("PDF rendered ({} bytes)", pdf.len());
    Ok(pdf)
}
