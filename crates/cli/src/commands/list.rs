use std::{
    io::{Stderr, Stdout},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, ValueEnum};
use filedeck_engine::{
    ClickButton, CycleDirection, EntryType, FileListView, FilteredView, Query, Selection,
    decorate, match_positions,
};
use log::debug;

use crate::commands::{CommandResult, SourceArgs};
use crate::printer::{
    ColorChoice, HumanPrinter, JsonPrinter, ListPrintContext, ListPrinter, ListRow, OutputFormat,
    PrinterConfig,
};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output rows as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl OutputOptions {
    /// Create a printer based on the output options.
    pub fn make_printer(&self, limit: Option<usize>) -> Box<dyn ListPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let cfg = PrinterConfig {
            color: self.color,
            limit,
        };

        match format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout()),
        }
    }
}

/// Direction for `--cycle`, as Alt+Left / Alt+Right on the type buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CycleArg {
    Previous,
    Next,
}

impl From<CycleArg> for CycleDirection {
    fn from(arg: CycleArg) -> Self {
        match arg {
            CycleArg::Previous => CycleDirection::Previous,
            CycleArg::Next => CycleDirection::Next,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Filter text; names must contain its chars in order
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Show only these types (comma separated keys, e.g. p,i,cls)
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["hide", "solo"])]
    pub only: Option<Vec<EntryType>>,

    /// Hide these types
    #[arg(long, value_delimiter = ',', conflicts_with = "solo")]
    pub hide: Option<Vec<EntryType>>,

    /// Show a single type, as a right-click on its button would
    #[arg(long)]
    pub solo: Option<EntryType>,

    /// Step the single shown type; repeat to step further
    #[arg(long, value_enum, value_name = "DIR")]
    pub cycle: Vec<CycleArg>,

    /// 1-based visible row to put the cursor on (out of range falls back to the first row)
    #[arg(long, value_name = "ROW")]
    pub select: Option<usize>,

    /// File currently open in the editor; its row is highlighted
    #[arg(long, value_name = "PATH")]
    pub current: Option<PathBuf>,

    /// Maximum number of rows to display
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ListArgs) -> CommandResult<ExitCode> {
    let (mut view, label) = args.source.load(args.current.clone())?;
    apply_type_args(&mut view, &args);

    let query = Query::from_option(args.query.as_deref());
    let filtered = view.apply(&query);

    let mut selection = args
        .select
        .map(|row| Selection::at(row.saturating_sub(1)))
        .unwrap_or_default();
    selection.clamp(filtered.visible_count());

    let mut printer = args.output.make_printer(args.limit);
    print_view(
        printer.as_mut(),
        &filtered,
        &query,
        label,
        args.limit,
        view.total(),
        selection,
    )?;

    Ok(ExitCode::SUCCESS)
}

fn apply_type_args(view: &mut FileListView, args: &ListArgs) {
    let types = view.type_filter_mut();

    if let Some(only) = &args.only {
        types.set_active(Some(only.as_slice()));
    }
    if let Some(hide) = &args.hide {
        types.set_inactive(Some(hide.as_slice()));
    }
    if let Some(solo) = args.solo {
        types.click(solo, ClickButton::Right);
    }
    for &step in &args.cycle {
        if let Some(shown) = types.cycle(step.into()) {
            debug!("cycled to {}", shown.key());
        }
    }

    debug!("{} of {} types active", types.active_count(), types.len());
}

pub(crate) fn print_view(
    printer: &mut dyn ListPrinter,
    filtered: &FilteredView<'_>,
    query: &Query,
    source: &str,
    limit: Option<usize>,
    total: usize,
    selection: Selection,
) -> CommandResult<()> {
    let visible = filtered.visible_count();
    let shown = limit.unwrap_or(visible).min(visible);

    let ctx = ListPrintContext {
        source,
        query: (!query.is_empty()).then(|| query.as_str()),
        total,
        visible,
        truncated: shown < visible,
    };

    printer.begin(&ctx)?;

    for (idx, entry) in filtered.visible().take(shown).enumerate() {
        let matched = match_positions(&entry.name, query.as_str()).unwrap_or_default();
        let row = ListRow {
            rank: idx + 1,
            entry,
            decoration: decorate(entry),
            matched: &matched,
            selected: selection.index() == Some(idx),
        };
        printer.print_row(&row, &ctx)?;
    }

    printer.finish(&ctx)?;
    Ok(())
}
