//! `find-xrootd show-uses` command

use anyhow::{bail, Result};

use crate::cli::ShowUsesArgs;
use xrootd_finder::ops::report::{format_uses, inspect_uses};
use xrootd_finder::util::ConfigCache;

pub fn execute(args: ShowUsesArgs, verbose: bool) -> Result<()> {
    let root = super::project_root()?;
    let path = super::cache_path(&root, args.cache);

    if !path.exists() {
        bail!(
            "no configuration cache at {}\nRun `find-xrootd configure` first.",
            path.display()
        );
    }
    let cache = ConfigCache::load(&path)?;

    let statuses = inspect_uses(&cache.uses, args.name.as_deref());
    if let (Some(name), true) = (&args.name, statuses.is_empty()) {
        bail!("no use target named `{}`", name);
    }

    print!("{}", format_uses(&statuses, verbose));
    Ok(())
}
