use clap::Parser;
use log::LevelFilter;
use mapsight::{saves, MapRenderer, Overrides, RenderSummary};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mapsight")]
#[command(author, version, about = "Render dungeon map saves as interactive HTML pages")]
struct Args {
    /// Save file to render (omit to pick one from the saves directory)
    save: Option<PathBuf>,

    /// Directory to list saves from (default: the game's saves folder)
    #[arg(long)]
    saves_dir: Option<PathBuf>,

    /// Output file (.html, or .json for a data export). Default: next to the save
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with custom_colors / custom_labels overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore the built-in colors and labels for the game's descriptors
    #[arg(long)]
    no_builtin_overrides: bool,

    /// Pick the save from a menu even when SAVE is given
    #[arg(short, long)]
    interactive: bool,

    /// Pick the save with a native file dialog
    #[arg(long)]
    gui: bool,

    /// Show raw X/Y coordinates along the grid edges
    #[arg(long)]
    axis_labels: bool,

    /// Page heading (default: the save's file name)
    #[arg(long)]
    title: Option<String>,

    /// Don't offer to open the page in a browser
    #[arg(long)]
    no_open: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    let overrides = match build_overrides(&args) {
        Ok(o) => o,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let renderer = MapRenderer::new()
        .with_overrides(overrides)
        .with_axis_labels(args.axis_labels)
        .with_title(args.title.clone());

    let saves_dir = args.saves_dir.clone().or_else(saves::default_saves_dir);

    // Save given on the command line: one render, no menus
    if let Some(save) = args.save.clone().filter(|_| !args.interactive) {
        let summary = render_or_exit(&renderer, &save, args.output.as_deref());
        offer_open(&args, &summary, false);
        return;
    }

    if args.gui && run_gui(&args, &renderer, saves_dir.as_deref()) {
        return;
    }

    interactive_session(&args, &renderer, saves_dir.as_deref());
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Warn
    } else if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn build_overrides(args: &Args) -> mapsight::Result<Overrides> {
    let base = if args.no_builtin_overrides {
        Overrides::default()
    } else {
        Overrides::builtin()
    };

    match args.config {
        Some(ref path) => Ok(base.merge(Overrides::load(path)?)),
        None => Ok(base),
    }
}

/// Any load or validation failure ends the process with status 1.
fn render_or_exit(renderer: &MapRenderer, save: &Path, output: Option<&Path>) -> RenderSummary {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| saves::default_output_path(save));

    match renderer.render(save, &output) {
        Ok(summary) => {
            log::info!(
                "{}x{} grid: {} tiles, {} descriptors, {} empty cells",
                summary.width,
                summary.height,
                summary.tiles,
                summary.descriptors,
                summary.empty_cells
            );
            summary
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn interactive_session(args: &Args, renderer: &MapRenderer, saves_dir: Option<&Path>) {
    loop {
        let Some(save) = pick_save(saves_dir) else {
            eprintln!("\nNo save file selected.");
            return;
        };

        let summary = render_or_exit(renderer, &save, args.output.as_deref());
        offer_open(args, &summary, false);

        if !ask_yes_no("\nGenerate another map? (y/n): ") {
            break;
        }
    }
    eprintln!("\nProgram finished.");
}

/// Numbered menu of discovered saves plus a custom-path entry. `None` on EOF.
fn pick_save(saves_dir: Option<&Path>) -> Option<PathBuf> {
    let save_files = match saves_dir {
        Some(dir) if dir.is_dir() => saves::list_saves(dir),
        Some(dir) => {
            log::warn!("Saves directory not found or is not a directory: {}", dir.display());
            Vec::new()
        }
        None => {
            log::warn!("Could not determine the home directory");
            Vec::new()
        }
    };

    if save_files.is_empty() {
        log::warn!("No JSON save files found in the saves directory.");
        return prompt_custom_path();
    }

    eprintln!("\nAvailable Save Files:");
    for (i, path) in save_files.iter().enumerate() {
        let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        eprintln!("{}. {}", i + 1, stem);
    }
    let options = save_files.len() + 1;
    eprintln!("{}. Enter a custom file path", options);

    let choice = loop {
        let input = prompt(&format!("\nEnter the number of the file to render (1-{}): ", options))?;
        match saves::parse_choice(&input, options) {
            Some(c) => break c,
            None => eprintln!("Please enter a valid number between 1 and {}.", options),
        }
    };

    if choice <= save_files.len() {
        Some(save_files[choice - 1].clone())
    } else {
        prompt_custom_path()
    }
}

fn prompt_custom_path() -> Option<PathBuf> {
    loop {
        let input = prompt("Enter the full path to the JSON file: ")?;
        let path = saves::clean_path_input(&input);
        if saves::is_json_file(&path) {
            return Some(path);
        }
        eprintln!("Invalid file path or not a JSON file. Please try again.");
    }
}

fn ask_yes_no(question: &str) -> bool {
    loop {
        let Some(answer) = prompt(question) else {
            return false;
        };
        match answer.trim().to_lowercase().as_str() {
            "y" => return true,
            "n" => return false,
            _ => eprintln!("Invalid input. Please enter 'y' or 'n'."),
        }
    }
}

/// Print `message` and read one line. `None` once stdin is closed.
fn prompt(message: &str) -> Option<String> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

fn offer_open(args: &Args, summary: &RenderSummary, auto: bool) {
    if args.no_open {
        return;
    }

    if auto {
        let _ = open::that(&summary.output);
        return;
    }

    // Only ask when someone is there to answer
    if args.quiet || !io::stdin().is_terminal() {
        return;
    }

    let Some(input) = prompt("\nOpen map in browser? [Y/n] ") else {
        return;
    };
    let input = input.trim().to_lowercase();
    if input.is_empty() || input == "y" || input == "yes" {
        if let Err(e) = open::that(&summary.output) {
            log::error!("Failed to open map: {}", e);
        }
    }
}

/// Pick and render one save through a file dialog. `false` when the dialog
/// is not available and the terminal menu should run instead.
#[cfg(feature = "gui")]
fn run_gui(args: &Args, renderer: &MapRenderer, saves_dir: Option<&Path>) -> bool {
    match pick_save_gui(saves_dir) {
        Some(save) => {
            let summary = render_or_exit(renderer, &save, args.output.as_deref());
            // In GUI mode, open without asking
            offer_open(args, &summary, true);
        }
        None => eprintln!("No save file selected."),
    }
    true
}

#[cfg(not(feature = "gui"))]
fn run_gui(_args: &Args, _renderer: &MapRenderer, _saves_dir: Option<&Path>) -> bool {
    log::warn!("GUI mode not available in this build; falling back to the terminal menu");
    false
}

#[cfg(feature = "gui")]
fn pick_save_gui(saves_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Select save file to render")
        .add_filter("Save files", &["json"]);
    if let Some(dir) = saves_dir.filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}
