use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::cli::interactive::InteractiveSession;
use crate::config::Settings;
use crate::error::{LocatorError, Result};
use crate::locator::{Locator, Render};
use crate::readers::{AutoSource, CsvSource, Dataset};
use crate::session::SessionStore;
use crate::utils::filename::generate_default_export_filename;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::{GroupCsvWriter, JsonWriter};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet);

    let radius_override = match &cli.command {
        Commands::Stations { radius_km, .. } => *radius_km,
        _ => None,
    };

    let settings = Settings::load(cli.config.as_deref())?.with_overrides(
        cli.url1,
        cli.url2,
        radius_override,
    )?;
    debug!("Settings: {:?}", settings);

    let source = AutoSource::new(settings.http_timeout());
    let mut locator = Locator::new(settings, source);
    let quiet = cli.quiet;

    match cli.command {
        Commands::Provinces => {
            let dataset = load_dataset(&mut locator, quiet);
            for province in dataset.provinces() {
                println!("{}", province);
            }
        }

        Commands::Districts { province } => {
            let dataset = load_dataset(&mut locator, quiet);
            let mut session = SessionStore::new();
            let selector = locator.selector();
            selector.select_province(&dataset, &mut session, &province)?;

            for district in selector.district_options(&dataset, &session).iter().skip(1) {
                println!("{}", district);
            }
        }

        Commands::Stations {
            province,
            district,
            radius,
            radius_km: _,
            format,
            output,
            save,
        } => {
            let dataset = load_dataset(&mut locator, quiet);
            let mut session = SessionStore::new();
            let selector = locator.selector();

            selector.select_province(&dataset, &mut session, &province)?;
            if let Some(district) = district {
                selector.select_district(&dataset, &mut session, &district)?;
            }

            let mode = locator.default_mode(radius);
            let render = match locator.render(&dataset, &session, mode) {
                Ok(render) => render,
                Err(e) if e.is_benign() => {
                    println!("📍 구/군을 선택해주세요 (--district 또는 --radius)");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            if let Some(ref message) = render.message {
                eprintln!("❌ {}", message);
            }

            let output = match (output, save) {
                (Some(path), _) => Some(path),
                (None, true) => Some(generate_default_export_filename(format.extension())),
                (None, false) => None,
            };
            write_render(&render, format, output)?;
        }

        Commands::Summary => {
            let dataset = load_dataset(&mut locator, quiet);
            println!("{}", dataset.report.summary());
            println!("Provinces: {}", dataset.provinces().len());
        }

        Commands::Interactive { radius } => {
            let mode = locator.default_mode(radius);
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = InteractiveSession::new(&mut locator, mode);
            session.run(stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}

/// Fetch (or reuse) the dataset behind a spinner; failures print a message and yield no rows
pub fn load_dataset<S: CsvSource>(locator: &mut Locator<S>, quiet: bool) -> Arc<Dataset> {
    let progress = ProgressReporter::new_spinner("🚗 충전소 데이터를 불러오는 중입니다...", quiet);
    let (dataset, error) = locator.dataset();
    progress.finish_and_clear();

    match error {
        Some(e) => eprintln!("❌ {}", e),
        None => info!("{} charger rows available", dataset.len()),
    }

    dataset
}

fn write_render(render: &Render, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    match (format, output) {
        (OutputFormat::Text, None) => {
            print!("{}", format_render_text(render));
        }
        (OutputFormat::Text, Some(path)) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, format_render_text(render))?;
            println!("Wrote {} markers to {}", render.view.markers.len(), path.display());
        }
        (OutputFormat::Json, None) => {
            JsonWriter::new().write_view_to(&render.view, io::stdout().lock())?;
        }
        (OutputFormat::Json, Some(path)) => {
            JsonWriter::new().write_view(&render.view, &path)?;
            println!("Wrote {} markers to {}", render.view.markers.len(), path.display());
        }
        (OutputFormat::Csv, None) => {
            GroupCsvWriter::new().write_groups_to(&render.groups, io::stdout().lock())?;
        }
        (OutputFormat::Csv, Some(path)) => {
            GroupCsvWriter::new().write_groups(&render.groups, &path)?;
            println!("Wrote {} stations to {}", render.groups.len(), path.display());
        }
    }

    io::stdout().flush()?;
    Ok(())
}

/// Human-readable marker listing
pub fn format_render_text(render: &Render) -> String {
    let view = &render.view;
    let mut text = String::new();

    text.push_str(&format!(
        "🗺️  Map center ({:.4}, {:.4}), zoom {}\n",
        view.center.0, view.center.1, view.zoom
    ));
    text.push_str(&format!(
        "{} stations, {} chargers\n",
        view.markers.len(),
        view.total_chargers()
    ));

    for (i, marker) in view.markers.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} ({:.5}, {:.5})\n",
            i + 1,
            marker.tooltip,
            marker.latitude,
            marker.longitude
        ));
        // the popup's first line repeats the station name
        for line in marker.popup.to_text().lines().skip(1) {
            text.push_str("   ");
            text.push_str(line);
            text.push('\n');
        }
    }

    text
}

/// Message shown for a selection error; `None` for states that are not faults
pub fn selection_message(error: &LocatorError) -> Option<String> {
    if error.is_benign() {
        None
    } else {
        Some(format!("❌ {}", error))
    }
}
