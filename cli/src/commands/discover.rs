use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use colored::*;
use rayon::prelude::*;
use tracing::{error, warn};

use crate::commands::load_facts;
use crate::terminal::{Console, colors, format, print, spinner};
use intake_common::facts::FactSet;
use intake_common::host::DiscoveredHost;
use intake_core::service::DiscoveryService;

pub async fn discover(
    files: Vec<PathBuf>,
    refresh: bool,
    service: &DiscoveryService,
    console: Console,
) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();
    let loaded: Vec<(PathBuf, anyhow::Result<FactSet>)> = load_all(files, console);

    let mut hosts: Vec<DiscoveredHost> = Vec::new();
    let mut failed: usize = 0;
    for (path, facts) in loaded {
        let facts = match facts {
            Ok(facts) => facts,
            Err(e) => {
                error!("{e:#}");
                failed += 1;
                continue;
            }
        };

        match service.import(&facts) {
            Ok(mut host) => {
                if refresh && !service.refresh_facts(&mut host).await {
                    warn!("Keeping the reported facts of {}", host.name);
                }
                hosts.push(host);
            }
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }

    discovery_ends(&hosts, failed, start_time.elapsed(), service, console);
    Ok(())
}

fn load_all(files: Vec<PathBuf>, console: Console) -> Vec<(PathBuf, anyhow::Result<FactSet>)> {
    let total = files.len();
    let handle = spinner::start(&format!("Loading {total} fact files..."), console.quiet);
    let done = AtomicUsize::new(0);

    files
        .into_par_iter()
        .map(|path| {
            let facts = load_facts(&path);
            let count = done.fetch_add(1, Ordering::Relaxed) + 1;
            spinner::report_loading_progress(&handle, count, total);
            (path, facts)
        })
        .collect()
}

fn discovery_ends(
    hosts: &[DiscoveredHost],
    failed: usize,
    total_time: Duration,
    service: &DiscoveryService,
    console: Console,
) {
    if hosts.is_empty() {
        print::header("zero hosts imported", console.quiet);
        print::no_results();
        return;
    }

    if console.quiet > 0 {
        print::blank();
    }

    print::header("discovered hosts", console.quiet);
    for (idx, host) in hosts.iter().enumerate() {
        if console.quiet < 2 {
            print::host_tree(idx, host.name.as_str(), &format::host_details(host, service.taxonomies()));
        }
        if idx + 1 != hosts.len() {
            print::blank();
        }
    }
    print_summary(hosts.len(), failed, total_time, console);
}

fn print_summary(imported: usize, failed: usize, total_time: Duration, console: Console) {
    let imported: ColoredString = format!("{imported} hosts").bold().green();
    let failed: ColoredString = match failed {
        0 => "no errors".normal(),
        n => format!("{n} rejected").bold().red(),
    };
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Import complete: {imported} in {total_time}, {failed}").color(colors::TEXT_DEFAULT);

    match console.quiet {
        0 => {
            print::separator();
            print::centered(&output.to_string());
        }
        _ => {
            print::blank();
            print::status(&output.to_string());
        }
    }
}
