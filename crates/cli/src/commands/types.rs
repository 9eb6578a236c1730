use std::{io::Write, process::ExitCode};

use clap::Args;
use filedeck_engine::FileListView;

use crate::commands::{CommandResult, SourceArgs};

#[derive(Debug, Args)]
pub struct TypesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as NDJSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TypesArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: TypesArgs) -> CommandResult<ExitCode> {
    let (view, _) = args.source.load(None)?;
    write_types(&mut std::io::stdout().lock(), &view, args.json)?;
    Ok(ExitCode::SUCCESS)
}

/// One line per type button, in the order the buttons appear.
fn write_types(out: &mut impl Write, view: &FileListView, json: bool) -> CommandResult<()> {
    for (entry_type, _) in view.type_filter().iter() {
        let count = view
            .entries()
            .iter()
            .filter(|e| e.entry_type == entry_type)
            .count();

        if json {
            let obj = serde_json::json!({
                "type": entry_type.key(),
                "label": entry_type.label(),
                "count": count,
            });
            writeln!(out, "{obj}")?;
        } else {
            writeln!(out, "{:<10} {:<7} {count:>6}", entry_type.label(), entry_type.key())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use filedeck_engine::FileEntry;

    use super::*;

    fn view() -> FileListView {
        FileListView::new(vec![
            FileEntry::file("/w/a.p"),
            FileEntry::folder("/w/src"),
            FileEntry::file("/w/b.p"),
            FileEntry::file("/w/c.i"),
        ])
    }

    #[test]
    fn human_output_counts_each_type() {
        let mut out = Vec::new();
        write_types(&mut out, &view(), false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Folder     folder       1\n\
             Procedure  p            2\n\
             Include    i            1\n"
        );
    }

    #[test]
    fn json_output() {
        let mut out = Vec::new();
        write_types(&mut out, &view(), true).unwrap();

        let first: serde_json::Value =
            serde_json::from_str(String::from_utf8(out).unwrap().lines().next().unwrap()).unwrap();
        assert_eq!(first["type"], "folder");
        assert_eq!(first["count"], 1);
    }
}
