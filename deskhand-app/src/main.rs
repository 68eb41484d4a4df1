use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deskhand_app::{App, Config, InputDisposition};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so the transcript on stdout stays clean.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deskhand=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    Deskhand Desktop Assistant                    ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = Config::load_or_default()?;
    println!("Model: {}", config.model);
    println!();

    let mut app = App::initialize(config).await?;
    println!("Assistant started. Type your prompt and press Enter.");

    // Reader task so the surface loop only ever waits on channels.
    let (input_tx, mut input_rx) = mpsc::channel::<String>(8);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if input_tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }
    });

    loop {
        tokio::select! {
            maybe_line = input_rx.recv() => {
                match maybe_line {
                    Some(line) => match app.surface.handle_input(&line) {
                        InputDisposition::Submit(text) => app.dispatcher.submit(text),
                        InputDisposition::Handled(output) => {
                            for line in output {
                                println!("{line}");
                            }
                        }
                        InputDisposition::Exit => break,
                    },
                    // stdin closed; shut down the same way 'exit' does.
                    None => break,
                }
            }
            Some(event) = app.events.recv() => {
                for line in app.surface.handle_event(event) {
                    println!("{line}");
                }
            }
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}
