//! earthcmap - inspect and preview earth-science colormaps
//!
//! This is the command-line entry point for the earthcmap library.

use anyhow::Context;
use std::time::Instant;
use tracing::{error, info};

use earthcmap::config::Command;
use earthcmap::render::{colorbar_strip, save_png};
use earthcmap::{
    build, convert_units, init_tracing, log_error, log_operation_end, log_operation_start,
    log_timed_operation, BuildOptions, CatalogStore, Colormap, Config,
};

fn main() -> anyhow::Result<()> {
    let (config, command) = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting earthcmap v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let store = CatalogStore::new(config.catalog_dir());
    info!("Using catalog directory: {}", store.dir().display());

    match command {
        Command::Categories => {
            for category in store.list_categories()? {
                println!("{}", category);
            }
        }

        Command::List { category } => {
            let filter = category.unwrap_or_else(|| config.default_category_filter());
            let names = store.list_names_by_category(&filter)?;
            println!("{}", serde_json::to_string_pretty(&names)?);
        }

        Command::Show {
            name,
            units,
            extend,
        } => {
            let options = BuildOptions {
                target_units: units,
                extend,
            };
            let (cmap, norm) = log_timed_operation("build_colormap", || {
                build(&store, &name, &options)
            })
            .map_err(|e| {
                log_error(&e, "show");
                e
            })?;

            let output = serde_json::json!({
                "colormap": cmap,
                "norm": norm,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Convert { from, to, values } => {
            let converted = convert_units(&values, &from, &to)?;
            println!("{}", serde_json::to_string(&converted)?);
        }

        Command::Preview {
            name,
            output,
            units,
            width,
            height,
        } => {
            let start = Instant::now();
            log_operation_start("preview", Some(name.as_str()));

            let result = (|| -> earthcmap::Result<()> {
                let options = BuildOptions {
                    target_units: units,
                    ..Default::default()
                };
                let (cmap, _norm) = build(&store, &name, &options)?;
                let img = colorbar_strip(
                    &cmap,
                    width.unwrap_or(config.render.width),
                    height.unwrap_or(config.render.height),
                )?;
                save_png(&img, &output)?;
                info!(
                    colormap = cmap.name(),
                    long_name = cmap.long_name(),
                    entries = cmap.entry_count(),
                    "Preview rendered"
                );
                Ok(())
            })();

            log_operation_end("preview", start, result.is_ok());
            result.with_context(|| format!("Failed to render preview for '{}'", name))?;
        }
    }

    Ok(())
}
