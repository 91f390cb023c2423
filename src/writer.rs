//! Report writer: one JSON and one CSV snapshot per run under
//! `reports/<sanitized-channel>/`, plus the optional HTML report.

use crate::date::run_timestamp;
use crate::models::CommentRecord;
use crate::render::render_html_report;
use crate::util::{sanitize_channel_name, write_atomic};
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Paths written by one [`ReportWriter::save`].
#[derive(Clone, Debug)]
pub struct SavedReport {
    pub dir: PathBuf,
    pub json: PathBuf,
    pub csv: PathBuf,
    pub html: Option<PathBuf>,
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn cell_text(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Write a single CSV row, quoting only where needed.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { w.write_all(b",")?; } else { first = false; }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

/// CSV with the first record's keys as header; later records are read by
/// those keys, so every record yields exactly one row.
pub fn write_csv<W: Write>(mut w: W, records: &[Value]) -> io::Result<()> {
    let Some(Value::Object(first)) = records.first() else {
        return Ok(());
    };
    let header: Vec<String> = first.keys().cloned().collect();
    write_row(&mut w, &header)?;
    for rec in records {
        let row: Vec<String> = header.iter().map(|k| cell_text(rec.get(k))).collect();
        write_row(&mut w, &row)?;
    }
    Ok(())
}

pub fn csv_string(records: &[Value]) -> io::Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[derive(Clone, Debug)]
pub struct ReportWriter {
    reports_dir: PathBuf,
    render_html: bool,
}

impl ReportWriter {
    pub fn new(reports_dir: impl AsRef<Path>) -> Self {
        Self { reports_dir: reports_dir.as_ref().to_path_buf(), render_html: true }
    }

    pub fn render_html(mut self, yes: bool) -> Self {
        self.render_html = yes;
        self
    }

    /// `reports/<sanitized channel name>`.
    pub fn channel_dir(&self, channel_name: &str) -> PathBuf {
        self.reports_dir.join(sanitize_channel_name(channel_name))
    }

    /// Save with the current local time as the run timestamp.
    /// An empty collection writes nothing and returns `Ok(None)`.
    pub fn save(&self, comments: &[CommentRecord], channel_name: &str) -> Result<Option<SavedReport>> {
        self.save_with_timestamp(comments, channel_name, &run_timestamp())
    }

    pub fn save_with_timestamp(
        &self,
        comments: &[CommentRecord],
        channel_name: &str,
        timestamp: &str,
    ) -> Result<Option<SavedReport>> {
        if comments.is_empty() {
            tracing::info!("No comments to save");
            return Ok(None);
        }

        let dir = self.channel_dir(channel_name);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        let json_path = dir.join(format!("youtube_comments_{timestamp}.json"));
        let json = serde_json::to_vec_pretty(comments).context("serialize comments")?;
        write_atomic(&json_path, &json).with_context(|| format!("write {}", json_path.display()))?;
        tracing::info!("JSON saved: {}", json_path.display());

        let csv_path = dir.join(format!("youtube_comments_{timestamp}.csv"));
        let values: Vec<Value> = comments
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()
            .context("serialize comments")?;
        let mut csv = Vec::new();
        write_csv(&mut csv, &values).context("encode csv")?;
        write_atomic(&csv_path, &csv).with_context(|| format!("write {}", csv_path.display()))?;
        tracing::info!("CSV saved: {}", csv_path.display());

        let html = if self.render_html {
            let html_path = dir.join(format!("youtube_comments_report_{timestamp}.html"));
            match render_html_report(&json_path, Some(html_path.as_path())) {
                Ok(report) => Some(report.path),
                Err(e) => {
                    tracing::warn!("Skipping HTML report: {e}");
                    None
                }
            }
        } else {
            None
        };

        Ok(Some(SavedReport { dir, json: json_path, csv: csv_path, html }))
    }
}
