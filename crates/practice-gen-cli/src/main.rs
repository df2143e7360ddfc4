use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use practice_gen_core::{
    next_output_dir, parse, Catalog, Composer, Config, LocalFs, PracticeGenError, Result,
};

mod args;
mod interactive;
mod report;

use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = resolve_root(cli.root);
    let output = Output {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        None => handle_generate(&root, None, None, output),
        Some(Commands::Generate {
            select,
            output: out_dir,
        }) => handle_generate(&root, select.as_deref(), out_dir.as_deref(), output),
        Some(Commands::List { json }) => handle_list(&root, json),
        Some(Commands::Config { action }) => handle_config(action, &root),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

#[derive(Clone, Copy)]
struct Output {
    verbose: bool,
    quiet: bool,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "practice_gen=debug,practice_gen_core=debug"
    } else if quiet {
        "error"
    } else {
        "practice_gen=warn,practice_gen_core=warn"
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "practice-gen", &mut io::stdout());
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = cli_root {
        return root;
    }

    if let Ok(root) = std::env::var("PRACTICE_GEN_ROOT") {
        return PathBuf::from(root);
    }

    PathBuf::from(".")
}

fn load_catalog(root: &Path, config: &Config, local: &LocalFs) -> Result<Catalog> {
    Catalog::load(local, &config.categories_dir(root), &config.library)
}

fn handle_generate(
    root: &Path,
    select: Option<&str>,
    out_dir: Option<&Path>,
    output: Output,
) -> Result<()> {
    let config = Config::load(root)?;
    let local = LocalFs::new(config.ignore_rules()?);
    let catalog = load_catalog(root, &config, &local)?;

    let target = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => next_output_dir(
            &config.output_parent(root),
            &config.output.prefix,
            config.output.width,
        )?,
    };

    let selection = match select {
        Some(raw) => parse(raw)?.validate(&catalog)?,
        None => {
            print_welcome(&target);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut stdout = io::stdout();
            match interactive::ask_selection(&mut input, &mut stdout, &catalog)? {
                Some(selection) => selection,
                None => {
                    println!();
                    println!("No selection made; nothing was created.");
                    return Ok(());
                }
            }
        }
    };

    let on_file = |status: &str, path: &str| {
        let status_str = match status {
            "TEMPLATE" => format!("[{}]", status).dimmed(),
            "SAMPLE" => format!("[{}]", status).cyan(),
            _ => format!("[{}]", status).green(),
        };
        println!("  {} {}", status_str, path);
    };
    let on_file: Option<&dyn Fn(&str, &str)> = if output.verbose {
        Some(&on_file)
    } else {
        None
    };

    let composer = Composer::new(
        &local,
        &catalog,
        config.templates_dir(root),
        &config.library,
    );
    let report = composer.compose(&selection, &target, on_file)?;

    if output.quiet {
        return Ok(());
    }

    println!();
    for line in report::summary_lines(&selection, &report) {
        println!("{}", line);
    }
    println!();
    for line in report::next_steps(&report.output_root) {
        println!("{}", line);
    }
    println!();

    Ok(())
}

fn print_welcome(target: &Path) {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| target.display().to_string());

    println!();
    println!("{}", "Welcome to the Practice Problem Set Generator".cyan());
    println!();
    println!("This generator will create a practice test based on your input.");
    println!("You can choose how many problems from each category to include in your test.");
    println!();
    println!(
        "This program will generate a folder called {} at {}.",
        name.blue(),
        target
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    );
}

fn handle_list(root: &Path, json: bool) -> Result<()> {
    let config = Config::load(root)?;
    let local = LocalFs::new(config.ignore_rules()?);
    let catalog = load_catalog(root, &config, &local)?;

    if json {
        let text = serde_json::to_string_pretty(&catalog.summary()).map_err(io::Error::from)?;
        println!("{}", text);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No categories found in {}", catalog.root().display());
        return Ok(());
    }

    interactive::print_categories(&mut io::stdout(), &catalog)?;
    Ok(())
}

fn handle_config(action: ConfigAction, root: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(root)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(PracticeGenError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(root)?;
            config.set(&key, &value)?;
            config.save(root)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(root)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(root);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(root)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
