use anyhow::{Context, Result};
use clap::Parser;
use serde_yaml::Value;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use squiffy::config::Config;
use squiffy::context::Executors;
use squiffy::layout::{Alignment, PanelStyle};
use squiffy::menu::{Menu, MenuOption, Payload, Signal, Submenu};
use squiffy::state::YamlState;
use squiffy::ui::watcher::terminal_size;
use squiffy::ui::{self, Application, InputWatcher, TerminalWatcher};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "squiffy", about = "Terminal menu navigation demo")]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// State file, overrides the configured one
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Log file; stdout is reserved for the menu
    #[arg(long, default_value = "squiffy.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // Initialize panic handler for better error messages
    std::panic::set_hook(Box::new(|panic_info| {
        // Restore terminal before showing panic
        let _ = ui::terminal::restore();
        eprintln!("{}", panic_info);
    }));

    if let Err(e) = run(args).await {
        ui::terminal::restore()?;
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    log::info!("squiffy starting with {:?}", config.settings);

    let state_path = match args.state.or_else(|| config.settings.state_path.clone()) {
        Some(path) => path,
        None => YamlState::default_path()?,
    };
    let state = YamlState::load(&state_path)
        .with_context(|| format!("Failed to load state: {}", state_path.display()))?;

    let menu = demo_menu(&config.style, state)?;
    let mut app = Application::new(menu, &config.settings);

    let screen = if config.settings.autoscale {
        TerminalWatcher::spawn(config.settings.frame_period())
    } else {
        TerminalWatcher::fixed(terminal_size().unwrap_or_default())
    };
    let input = InputWatcher::spawn();

    ui::terminal::init()?;
    app.run(&mut io::stdout(), screen, input).await?;
    ui::terminal::restore()?;

    // the alternate screen is gone, so leftover errors go to the main one
    if let Some(report) = app.shutdown_report() {
        println!("{}", report);
    }

    log::info!("squiffy stopped");
    Ok(())
}

fn demo_menu(style: &PanelStyle, state: YamlState) -> Result<Menu> {
    let centered = style.clone().with_alignment(Alignment::Center);

    let submenus = vec![
        Submenu::new("main", "squiffy")
            .with_subtitle("Main menu")
            .with_option(MenuOption::submenu(1, "Settings", "settings"))
            .with_option(MenuOption::submenu(2, "About", "about"))
            .with_option(MenuOption::quit(3, "Quit"))
            .with_footer("Type a number and press Enter")
            .with_style(style.clone()),
        Submenu::new("settings", "Settings")
            .with_option(MenuOption::action(1, "sound", "Toggle sound"))
            .with_option(MenuOption::back(2, "Back"))
            .with_option(MenuOption::main(3, "Main menu"))
            .with_style(style.clone()),
        Submenu::new("about", "About")
            .with_message("Bordered panels, numbered options and nothing else.")
            .with_option(MenuOption::back(1, "Back"))
            .with_style(centered),
    ];

    let mut sound = state.get("sound").and_then(Value::as_bool).unwrap_or(true);
    let mut executors = Executors::new();
    executors.add("settings", "sound", move |_| {
        sound = !sound;
        let mut payload = Payload::new();
        payload.insert(Value::from("sound"), Value::from(sound));
        Some(Signal::ok_with(payload))
    });

    let menu = Menu::new(submenus, "main")?
        .with_context(Box::new(executors))
        .with_state(Box::new(state));
    Ok(menu)
}
