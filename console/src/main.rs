//! Terminal host for the product catalog administration screen.
//!
//! # Design
//! A single-threaded cooperative loop: user commands arrive as stdin lines,
//! HTTP round-trips run on tokio's blocking pool, and their completions come
//! back over a channel. No user action waits for the network.

use std::io::{self, Stdout};
use std::process::ExitCode;

use catalog_core::{AdminScreen, Completion, ProductClient, RequestId, SubmitError};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use catalog_console::command::{Command, HELP};
use catalog_console::config::Config;
use catalog_console::error::ConsoleError;
use catalog_console::terminal::{ConsoleNotifier, ConsolePrompt};
use catalog_console::{observability, transport};

type Screen = AdminScreen<ConsoleNotifier<Stdout>, ConsolePrompt<Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::parse();
    if let Err(err) = observability::init(&config.logging) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "console stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), ConsoleError> {
    tracing::info!(api_url = %config.api_url, "starting console");
    let agent = transport::agent(config.timeout());
    let mut screen: Screen = AdminScreen::new(
        ProductClient::new(&config.api_url),
        ConsoleNotifier::new(io::stdout()),
        ConsolePrompt::new(io::stdout()),
    );
    let (tx, mut rx) = mpsc::unbounded_channel::<(RequestId, Completion)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    screen.mount();

    loop {
        for dispatch in screen.take_dispatches() {
            let agent = agent.clone();
            let tx = tx.clone();
            tokio::task::spawn_blocking(move || {
                let completion = transport::execute(&agent, dispatch.request);
                if tx.send((dispatch.id, completion)).is_err() {
                    tracing::debug!(id = %dispatch.id, "console closed before completion");
                }
            });
        }
        println!("{}", screen.view());

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(&mut screen, command),
                    Err(err) => println!("{err}"),
                }
            }
            Some((id, completion)) = rx.recv() => screen.complete(id, completion),
        }
    }

    tracing::info!(in_flight = screen.in_flight(), "console closed");
    Ok(())
}

fn apply(screen: &mut Screen, command: Command) {
    match command {
        Command::Refresh => {
            screen.refetch();
        }
        Command::Edit(id) => {
            if !screen.edit_by_id(&id) {
                println!("no product {id} in the list");
            }
        }
        Command::Set(field, value) => {
            if let Err(err) = screen.set_field(field, value) {
                println!("{err}");
            }
        }
        Command::Clear => screen.clear_form(),
        Command::Submit => match screen.submit() {
            Ok(id) => tracing::debug!(%id, "submission dispatched"),
            Err(SubmitError::Invalid(errors)) => {
                tracing::debug!(fields = errors.len(), "submission rejected");
            }
            Err(err) => println!("{err}"),
        },
        Command::Delete(id) => screen.request_delete(id),
        Command::Answer(confirmed) => {
            if screen.gate().awaiting().is_none() {
                println!("nothing to confirm");
            }
            screen.answer_confirmation(confirmed);
        }
        Command::Theme => {
            screen.toggle_color_mode();
        }
        Command::Show => {}
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
