use std::path::Path;

use colored::*;
use time::format_description::well_known::Rfc3339;

use crate::commands::load_facts;
use crate::terminal::{Console, format, print, spinner};
use intake_core::service::DiscoveryService;

pub fn provision(file: &Path, service: &DiscoveryService, console: Console) -> anyhow::Result<()> {
    let facts = {
        let _spinner = spinner::start(&format!("Loading {}...", file.display()), console.quiet);
        load_facts(file)?
    };

    let discovered = service.import(&facts)?;
    let managed = service.provision(discovered.name.as_str())?;

    print::header("managed host", console.quiet);
    print::host_tree(0, &managed.name, &format::host_details(&managed, service.taxonomies()));

    let token: ColoredString = match service.token_for(managed.id) {
        Some(token) => {
            let expires = token.expires.format(&Rfc3339).unwrap_or_else(|_| token.expires.to_string());
            format!("{} (expires {expires})", token.value).normal()
        }
        None => "disabled".dimmed(),
    };

    let build = if managed.build { "pending" } else { "none" };
    print::fields(&[("Build", build.normal()), ("Token", token)]);
    Ok(())
}
