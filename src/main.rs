use eyre::{Result, WrapErr};
use scanui::{App, ConnectivityMonitor, HttpBackend, ScanBackend, ScanController, Toggles};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = scanui::cli::parse();

    // Initialize logging first
    if let Err(e) = scanui::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {:#}", e);
    }

    // Add a divider to separate runs
    log::info!("================================================================================");
    log::info!("NEW SESSION STARTING: backend={}", cli.backend_url);
    log::info!("================================================================================");

    let backend: Arc<dyn ScanBackend> = Arc::new(HttpBackend::new(&cli.backend_url, cli.health_timeout())?);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let controller = ScanController::new(Arc::clone(&backend), events_tx.clone());

    if cli.no_tui {
        let request = cli.scan_request();
        if request.ip_range.is_empty() {
            eyre::bail!("--ip-range is required with --no-tui");
        }

        println!("Scanning {} ({})...", request.ip_range, request.scan_type.label());
        let outcome = controller
            .submit(request.clone())
            .await
            .wrap_err_with(|| format!("Scan of {} failed", request.ip_range))?;

        let toggles = Toggles {
            show_json: cli.json,
            show_raw: cli.raw,
        };
        scanui::pretty::print_outcome(&request, &outcome, toggles);
        return Ok(());
    }

    let monitor = ConnectivityMonitor::new(backend, cli.health_interval()).spawn(events_tx);

    let mut terminal = scanui::init_terminal()?;
    let app = App::new(
        controller,
        events_rx,
        scanui::tui::ScanForm::from_request(cli.scan_request()),
        cli.backend_url.clone(),
        cli.tick_rate(),
    )
    .with_monitor(monitor);

    // Run the TUI application
    let result = app.run(&mut terminal);

    // Restore terminal
    scanui::restore_terminal(&mut terminal)?;

    // Handle any TUI errors
    result?;

    Ok(())
}
