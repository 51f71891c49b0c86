use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "webbot")]
#[command(about = "Scripted WebDriver automation")]
#[command(version)]
struct Cli {
    /// Script file to run
    script: PathBuf,

    /// Run in headless mode (overrides script)
    #[arg(long)]
    headless: bool,

    /// Set a parameter (can be used multiple times)
    #[arg(short = 'P', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate script without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> webbot::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let params = webbot::Params::from_args(&cli.params)?;

    let mut script = webbot::Script::load_with_params(&cli.script, &params)?;

    if cli.check {
        println!("Script valid: {}", script.name);
        println!("  Target: {}", script.target.url);
        println!("  Actions: {}", script.actions.len());
        if !script.params.is_empty() {
            println!("  Parameters: {}", script.params.len());
            for (name, def) in &script.params {
                let req = if def.required { " (required)" } else { "" };
                let desc = def.description.as_deref().unwrap_or("");
                println!("    - {}{}: {}", name, req, desc);
            }
        }
        println!("  Driver: {} (port {})", script.browser.driver, script.browser.port);
        return Ok(());
    }

    if cli.headless {
        script.browser.headless = true;
    }

    println!("Running: {}", script.name);

    let report = webbot::run(&script).await?;

    println!();
    println!("✓ Done");
    println!("  Actions: {}", report.actions_executed);
    if report.actions_skipped > 0 {
        println!("  Skipped: {}", report.actions_skipped);
    }
    println!("  Duration: {}ms", report.duration_ms);

    Ok(())
}
