//! Report orchestration: runs every analyzer over a snapshot and emits the
//! sections as plain text or as a standalone HTML page.

use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::time::Instant;

use flate2::write::GzEncoder;
use flate2::Compression;
use minijinja::{context, Environment};

use crate::analyzers::heap::{largest_loh_entries, HeapStats};
use crate::analyzers::{memory, runtime, threads};
use crate::config::Config;
use crate::core::{Inspect, Record, Result};
use crate::dump;
use crate::dump::Registry;
use crate::snapshot;

const PAGE_TEMPLATE: &str = include_str!("page.html");
const PAGE_TITLE: &str = "Memory Snapshot Analysis";

/// Write the full plain-text report, one line per sink call.
pub fn write_summary<F: FnMut(&str)>(path: &Path, config: &Config, mut sink: F) -> Result<()> {
    generate(path, config, &mut sink, false)
}

/// Render the full report as a standalone HTML page.
pub fn generate_html(path: &Path, config: &Config) -> Result<String> {
    let mut body = String::new();
    generate(
        path,
        config,
        &mut |line: &str| {
            body.push_str(line);
            body.push('\n');
        },
        true,
    )?;
    render_page(PAGE_TITLE, &body)
}

/// Write the HTML page to `output`, plus a gzipped companion next to it.
pub fn write_html_file(page: &str, output: &Path) -> Result<()> {
    fs::write(output, page)?;

    let gz_path = output.with_extension("html.gz");
    let gz_file = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(gz_file, Compression::best());
    encoder.write_all(page.as_bytes())?;
    encoder.finish()?;
    tracing::debug!("wrote compressed companion {}", gz_path.display());
    Ok(())
}

fn render_page(title: &str, body: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("page", PAGE_TEMPLATE)?;
    let template = env.get_template("page")?;
    let page = template.render(context! {
        title => dump::escape(title),
        content => body,
    })?;
    Ok(page)
}

fn generate<F: FnMut(&str)>(path: &Path, config: &Config, sink: &mut F, html: bool) -> Result<()> {
    let timer = Instant::now();
    write_line(
        sink,
        html,
        &format!("[{:.2}s] Loading: {}", timer.elapsed().as_secs_f64(), path.display()),
    );
    let snap = snapshot::load(path)?;
    write_line(
        sink,
        html,
        &format!("[{:.2}s] Loaded", timer.elapsed().as_secs_f64()),
    );
    write_line(sink, html, "");

    let registry = snapshot::default_registry();

    let summary = runtime::runtime_summary(&snap);
    dump_value(&summary, "Runtime Info", registry, sink, html);
    done(sink, html, &timer);

    let regions = memory::memory_regions(&snap);
    dump_table(&regions, "Memory Region Information", registry, sink, html);
    done(sink, html, &timer);

    let stats = HeapStats::collect(&snap);
    let top_types = config.report.top_types;
    let top_strings = config.report.top_strings;

    dump_table(
        &stats.top_types_by_size(top_types),
        &format!("Top {top_types} Types (By Size)"),
        registry,
        sink,
        html,
    );
    write_line(sink, html, "");
    dump_table(
        &stats.top_types_by_count(top_types),
        &format!("Top {top_types} Types (By Count)"),
        registry,
        sink,
        html,
    );
    write_line(sink, html, "");
    dump_table(
        &stats.top_strings_by_count(top_strings),
        &format!("Top {top_strings} Duplicated Strings"),
        registry,
        sink,
        html,
    );
    write_line(sink, html, "");
    dump_table(
        &stats.largest_strings(top_strings, config.report.string_preview),
        &format!("Top {top_strings} Largest Strings"),
        registry,
        sink,
        html,
    );
    write_line(sink, html, "");
    let storage = stats.storage_summary();
    dump_value(&storage, "Total String Storage", registry, sink, html);
    write_line(sink, html, "");
    dump_table(
        &largest_loh_entries(&snap, top_types),
        &format!("Top {top_types} Largest LOH Entries"),
        registry,
        sink,
        html,
    );
    done(sink, html, &timer);

    dump_table(
        &threads::paused_methods(&snap),
        "Paused Managed Methods",
        registry,
        sink,
        html,
    );
    done(sink, html, &timer);

    let all_threads = threads::thread_views(&snap, false);
    dump_collection(&all_threads, "All Managed Threads", registry, sink, html);
    done(sink, html, &timer);

    let failing = threads::thread_views(&snap, true);
    dump_collection(
        &failing,
        "Managed Threads with Exceptions",
        registry,
        sink,
        html,
    );
    done(sink, html, &timer);

    write_line(
        sink,
        html,
        &format!("[{:.2}s] Done!", timer.elapsed().as_secs_f64()),
    );
    Ok(())
}

fn done<F: FnMut(&str)>(sink: &mut F, html: bool, timer: &Instant) {
    write_line(
        sink,
        html,
        &format!("^ Done after {:.2}s", timer.elapsed().as_secs_f64()),
    );
    write_line(sink, html, "");
}

/// Progress line: plain in text mode, escaped paragraph in HTML mode. Blank
/// lines become `<br>`.
fn write_line<F: FnMut(&str)>(sink: &mut F, html: bool, content: &str) {
    if !html {
        sink(content);
    } else if content.is_empty() {
        sink("<br>");
    } else {
        sink(&format!("<p>{}</p>", dump::escape(content)));
    }
}

fn dump_value<F: FnMut(&str)>(
    value: &dyn Inspect,
    title: &str,
    registry: &Registry,
    sink: &mut F,
    html: bool,
) {
    if html {
        dump::dump_html(value, title, registry, &mut *sink);
    } else {
        dump::dump(value, title, registry, &mut *sink);
    }
}

/// Record sequence: HTML table in HTML mode, tree dump in text mode, with the
/// empty case replaced by "None Available".
fn dump_table<T, F>(rows: &Vec<T>, title: &str, registry: &Registry, sink: &mut F, html: bool)
where
    T: Record + 'static,
    F: FnMut(&str),
{
    if html {
        dump::dump_html_table(rows, title, registry, &mut *sink);
    } else if rows.is_empty() {
        dump_value(&"None Available", title, registry, sink, html);
    } else {
        dump_value(rows, title, registry, sink, html);
    }
}

/// Heterogeneous-depth sequence (thread views): tree dump in both modes, with
/// the empty case replaced by "None Available".
fn dump_collection<T, F>(rows: &Vec<T>, title: &str, registry: &Registry, sink: &mut F, html: bool)
where
    T: Inspect + 'static,
    F: FnMut(&str),
{
    if rows.is_empty() {
        dump_value(&"None Available", title, registry, sink, html);
    } else {
        dump_value(rows, title, registry, sink, html);
    }
}
