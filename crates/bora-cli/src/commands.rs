//! Command handlers

use crate::cli::{Cli, Commands, FilterArgs, UrgencyArg};
use crate::output::{
    output_classifications, output_groups, output_merge_report, output_quote, output_records,
    output_update_status,
};
use bora_app::app::{
    issue_receipt, quote, run_merge, run_startup_check, DatasetSnapshot, MergeRequest,
    QuoteRequest, UpdateStatus,
};
use bora_app::config::Config;
use bora_domain::model::{QuoteOptions, VehicleCategory};
use bora_domain::service::{classify, QueryParams};
use bora_types::{Error, OutputFormat, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Reset must work even when the stored file no longer parses
    if let Commands::Config { reset: true, .. } = cli.command {
        return cmd_config_reset();
    }

    let config = Config::load_or_default();
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!(%output_format, "configuration loaded");

    match cli.command {
        Commands::Merge { dir, output, xlsx } => cmd_merge(&config, dir, output, xlsx, output_format),

        Commands::Classify { text } => {
            let results: Vec<_> = text
                .into_iter()
                .map(|t| {
                    let category = classify(&t);
                    (t, category)
                })
                .collect();
            output_classifications(output_format, &results)
        }

        Commands::Search { filter, limit } => {
            startup_update_check(&config);
            let params = filter.to_params();
            cmd_search(&config, filter.dataset.as_deref(), &params, limit, output_format)
        }

        Commands::Categories { dataset } => {
            let snapshot = load_snapshot(&config, dataset.as_deref());
            output_groups(output_format, &snapshot.category_groups())
        }

        Commands::Quote {
            fare,
            vehicle,
            pick,
            filter,
            round_trip,
            wait,
            holiday,
            urgency,
            rack,
            no_tax,
            receipt,
        } => {
            startup_update_check(&config);
            let options = QuoteOptions {
                round_trip,
                holiday,
                urgency: urgency.into(),
                rack_fee: rack,
                include_tax: !no_tax,
                ..Default::default()
            }
            .with_wait_text(&wait);
            let request = match pick {
                Some(n) => picked_request(&config, &filter, n, options)?,
                None => free_request(fare.unwrap_or_default(), vehicle, filter, options),
            };
            warn_inert_motorcycle_options(&request, urgency, rack);
            cmd_quote(&config, &request, receipt, output_format)
        }

        Commands::Update { url } => {
            let status = run_startup_check(&config, url.as_deref());
            output_update_status(output_format, &status)
        }

        Commands::Config {
            show,
            set_data_dir,
            set_receipt_dir,
            set_output,
            set_update_url,
            set_update_enabled,
            ..
        } => cmd_config(
            config,
            show,
            set_data_dir,
            set_receipt_dir,
            set_output,
            set_update_url,
            set_update_enabled,
        ),
    }
}

fn cmd_merge(
    config: &Config,
    dir: Option<PathBuf>,
    output: Option<PathBuf>,
    xlsx: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let data_dir = match dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    let output = output.unwrap_or_else(|| data_dir.join(&config.dataset_file));
    let request = MergeRequest {
        xlsx_output: xlsx.then(|| output.with_extension("xlsx")),
        data_dir,
        suffixes: config.source_suffixes.clone(),
        output,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = run_merge(&request, |path| {
        pb.inc(1);
        pb.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
    });
    pb.finish_and_clear();

    output_merge_report(output_format, &result?)
}

fn load_snapshot(config: &Config, dataset: Option<&Path>) -> DatasetSnapshot {
    let snapshot = DatasetSnapshot::load_first(&config.dataset_candidates(dataset));
    if snapshot.is_degraded() {
        eprintln!("No dataset found. Run `bora merge` first or pass --dataset.");
    }
    snapshot
}

fn cmd_search(
    config: &Config,
    dataset: Option<&Path>,
    params: &QueryParams,
    limit: Option<usize>,
    output_format: OutputFormat,
) -> Result<()> {
    let snapshot = load_snapshot(config, dataset);
    let matches = snapshot.query(params);
    let total = matches.len();
    let shown = &matches[..limit.map_or(total, |n| n.min(total))];
    output_records(output_format, shown, total)
}

/// Quote typed in by hand; the category falls back to classifying --dest
fn free_request(
    fare: u64,
    vehicle: Option<String>,
    filter: FilterArgs,
    options: QuoteOptions,
) -> QuoteRequest {
    let destination = filter.dest.unwrap_or_default();
    let category = vehicle
        .map(VehicleCategory::new)
        .unwrap_or_else(|| classify(&destination));
    QuoteRequest {
        base_fare: fare,
        category,
        customer: filter.customer.unwrap_or_default(),
        destination,
        options,
    }
}

/// Quote the `n`th row of the filtered history
fn picked_request(
    config: &Config,
    filter: &FilterArgs,
    n: usize,
    options: QuoteOptions,
) -> Result<QuoteRequest> {
    let snapshot = load_snapshot(config, filter.dataset.as_deref());
    let params = filter.to_params();
    let matched = snapshot.query(&params).len();
    let record = snapshot.pick(&params, n).ok_or_else(|| {
        Error::Dataset(format!("--pick {} is out of range, {} rows match", n, matched))
    })?;
    debug!(row = n, customer = %record.customer_name, "quoting dataset row");
    Ok(QuoteRequest::from_record(record, options))
}

fn warn_inert_motorcycle_options(request: &QuoteRequest, urgency: UrgencyArg, rack: bool) {
    if !request.category.is_motorcycle() && (urgency != UrgencyArg::Normal || rack) {
        eprintln!(
            "Note: --urgency/--rack only apply to 오토바이, ignored for {}",
            request.category
        );
    }
}

fn cmd_quote(
    config: &Config,
    request: &QuoteRequest,
    with_receipt: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let result = quote(request);

    let receipt = if with_receipt {
        let dir = config.receipt_dir()?;
        Some(issue_receipt(
            &config.issuer,
            &dir,
            request,
            &result,
            Local::now().naive_local(),
        )?)
    } else {
        None
    };

    output_quote(output_format, request, &result, receipt.as_deref())
}

/// Interactive commands check for a newer build first when enabled
fn startup_update_check(config: &Config) {
    if let UpdateStatus::Updated { to, artifact, .. } = run_startup_check(config, None) {
        eprintln!("Updated to version {} ({})", to, artifact.display());
    }
}

fn cmd_config_reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    println!("\n{}", config);
    Ok(())
}

fn cmd_config(
    mut config: Config,
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_receipt_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_update_url: Option<String>,
    set_update_enabled: Option<bool>,
) -> Result<()> {
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(dir) = set_receipt_dir {
        config.receipt_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(url) = set_update_url {
        config.update.base_url = Some(url);
        modified = true;
    }

    if let Some(enabled) = set_update_enabled {
        config.update.enabled = enabled;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
