use std::{
    io::Write,
    path::{self, Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Args, Subcommand};
use filedeck_runtime::favourites::FavouriteStore;
use log::info;

use crate::commands::CommandResult;

#[derive(Debug, Args)]
pub struct FavArgs {
    #[command(subcommand)]
    pub action: FavAction,
}

#[derive(Debug, Subcommand)]
pub enum FavAction {
    /// Mark a file or folder as favourite
    Add { path: PathBuf },
    /// Unmark a favourite
    Remove { path: PathBuf },
    /// Flip the favourite mark
    Toggle { path: PathBuf },
    /// Print every favourite
    List,
    /// Forget all favourites
    Clear,
}

pub fn run(args: FavArgs) -> ExitCode {
    let Some(store) = FavouriteStore::new() else {
        info!("[info] Favourites are currently disabled");
        return ExitCode::SUCCESS;
    };

    match execute(args.action, &store, &mut std::io::stdout().lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(
    action: FavAction,
    store: &FavouriteStore,
    out: &mut impl Write,
) -> CommandResult<ExitCode> {
    let write_err = || format!("Failed to update {}", store.path().display());

    match action {
        FavAction::Add { path } => {
            let path = absolute(&path)?;
            let added = store.add(&path).with_context(write_err)?;
            let verb = if added { "added" } else { "already a favourite" };
            writeln!(out, "{verb}: {}", path.display())?;
        }
        FavAction::Remove { path } => {
            let path = absolute(&path)?;
            let removed = store.remove(&path).with_context(write_err)?;
            let verb = if removed { "removed" } else { "not a favourite" };
            writeln!(out, "{verb}: {}", path.display())?;
        }
        FavAction::Toggle { path } => {
            let path = absolute(&path)?;
            let now = store.toggle(&path).with_context(write_err)?;
            let verb = if now { "added" } else { "removed" };
            writeln!(out, "{verb}: {}", path.display())?;
        }
        FavAction::List => {
            let paths = store.paths();
            if paths.is_empty() {
                writeln!(out, "No favourites yet.")?;
            }
            for path in paths {
                writeln!(out, "{}", path.display())?;
            }
        }
        FavAction::Clear => {
            store.clear().with_context(write_err)?;
            writeln!(out, "Favourites cleared")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn absolute(path: &Path) -> CommandResult<PathBuf> {
    path::absolute(path).with_context(|| format!("Invalid path {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn run_action(action: FavAction, store: &FavouriteStore) -> String {
        let mut out = Vec::new();
        execute(action, store, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_toggle_remove_and_list() {
        let dir = TempDir::new().unwrap();
        let store = FavouriteStore::with_path(dir.path().join("favourites.jsonl"));

        assert_eq!(
            run_action(FavAction::Add { path: "/w/a.p".into() }, &store),
            "added: /w/a.p\n"
        );
        assert_eq!(
            run_action(FavAction::Add { path: "/w/a.p".into() }, &store),
            "already a favourite: /w/a.p\n"
        );
        assert_eq!(
            run_action(FavAction::Toggle { path: "/w/b.i".into() }, &store),
            "added: /w/b.i\n"
        );
        assert_eq!(run_action(FavAction::List, &store), "/w/a.p\n/w/b.i\n");

        assert_eq!(
            run_action(FavAction::Remove { path: "/w/a.p".into() }, &store),
            "removed: /w/a.p\n"
        );
        assert_eq!(run_action(FavAction::List, &store), "/w/b.i\n");
    }

    #[test]
    fn clear_empties_the_store() {
        let dir = TempDir::new().unwrap();
        let store = FavouriteStore::with_path(dir.path().join("favourites.jsonl"));
        run_action(FavAction::Add { path: "/w/a.p".into() }, &store);

        assert_eq!(run_action(FavAction::Clear, &store), "Favourites cleared\n");
        assert_eq!(run_action(FavAction::List, &store), "No favourites yet.\n");
    }
}
